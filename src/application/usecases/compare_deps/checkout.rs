//! 기준(base) 리비전 체크아웃 단계.
//!
//! fetch는 티어 순서대로 시도하고 실패는 로그만 남긴다.
//! reset은 ref -> id 순서로 시도하며, 둘 다 실패하면 실행을 중단한다.

use std::path::Path;

use anyhow::{Result, anyhow};

use crate::application::ports::FetchSpec;
use crate::application::usecases::compare_deps::CompareDependenciesUseCase;
use crate::domain::error::RunError;
use crate::domain::trigger::RevisionTarget;

/// 시도할 fetch 티어 목록. 값이 없는 티어는 건너뛴다.
pub(super) fn fetch_tiers(target: &RevisionTarget) -> Vec<FetchSpec> {
    let mut tiers = Vec::with_capacity(3);
    if let Some(git_ref) = &target.git_ref {
        tiers.push(FetchSpec::Ref(git_ref.clone()));
    }
    if let Some(id) = &target.id {
        tiers.push(FetchSpec::Revision(id.clone()));
    }
    tiers.push(FetchSpec::All);
    tiers
}

/// reset 후보(ref 먼저).
pub(super) fn reset_candidates(target: &RevisionTarget) -> Vec<&str> {
    [target.git_ref.as_deref(), target.id.as_deref()]
        .into_iter()
        .flatten()
        .collect()
}

/// 작업 트리를 base 리비전으로 옮긴다. 성공한 fetch 티어(없으면 None)를 돌려준다.
pub(super) async fn checkout_base(
    use_case: &CompareDependenciesUseCase<'_>,
    workdir: &Path,
    target: &RevisionTarget,
) -> Result<Option<FetchSpec>> {
    let mut fetched = None;
    for tier in fetch_tiers(target) {
        use_case.reporter.status("Fetch", &describe(&tier));
        match use_case.source_control.fetch(workdir, &tier).await {
            Ok(()) => {
                fetched = Some(tier);
                break;
            }
            Err(err) => {
                tracing::warn!(tier = ?tier, "fetch failed: {err:#}");
                use_case
                    .reporter
                    .status("Fetch", &format!("failed, trying next tier: {err}"));
            }
        }
    }
    if fetched.is_none() {
        tracing::warn!("all fetch tiers failed; resetting with local objects only");
    }

    let mut last_error = None;
    for candidate in reset_candidates(target) {
        match use_case.source_control.reset_hard(workdir, candidate).await {
            Ok(()) => {
                use_case
                    .reporter
                    .status("Checkout", &format!("working tree at {candidate}"));
                return Ok(fetched);
            }
            Err(err) => {
                tracing::warn!(revision = candidate, "reset failed: {err:#}");
                last_error = Some(err);
            }
        }
    }

    Err(RunError::CheckoutExhausted {
        target: target.label(),
        source: last_error.unwrap_or_else(|| anyhow!("no ref or revision id to reset to")),
    }
    .into())
}

/// 사용자 설정 정리 스크립트. 실패는 치명적이다.
pub(super) async fn run_clean_script(
    use_case: &CompareDependenciesUseCase<'_>,
    workdir: &Path,
    script: &str,
) -> Result<()> {
    use_case.reporter.status("Clean", script);
    use_case
        .commands
        .run_shell(workdir, script)
        .await
        .map_err(RunError::CleanScript)?;
    Ok(())
}

fn describe(tier: &FetchSpec) -> String {
    match tier {
        FetchSpec::Ref(git_ref) => format!("origin {git_ref} (depth 1)"),
        FetchSpec::Revision(id) => format!("origin {id} (depth 1)"),
        FetchSpec::All => "origin (all refs)".to_string(),
    }
}
