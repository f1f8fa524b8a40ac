//! 비교 실행 컨텍스트(트리거/설정/기준 리비전) 준비 단계.

use anyhow::{Context, Result};

use crate::application::config::{Config, RunSettings};
use crate::application::usecases::compare_deps::{CompareDependenciesUseCase, RunOptions};
use crate::domain::trigger::{RevisionTarget, TriggerContext};

/// 유스케이스 전 구간에서 공유되는 실행 상태.
pub(super) struct ExecutionContext {
    pub config: Config,
    pub settings: RunSettings,
    pub trigger: TriggerContext,
    pub base: RevisionTarget,
}

/// 트리거 검증이 가장 먼저 일어나고, 이 단계에서는 작업 트리를 건드리지 않는다.
pub(super) fn load_execution_context(
    use_case: &CompareDependenciesUseCase<'_>,
    options: &RunOptions,
) -> Result<ExecutionContext> {
    let trigger = use_case.event_source.load()?;
    let base = trigger.event.resolve_base_revision()?;

    let mut config = use_case
        .config_repo
        .load()
        .context("failed to load wpdeps config")?;
    config.merge_from(options.overrides.clone());
    let settings = config.run_settings(options.base_dir.clone(), options.dry_run);

    use_case.reporter.section("Session");
    use_case.reporter.kv("Event", trigger.event.name());
    if let Some(repository) = &trigger.repository {
        use_case.reporter.kv("Repository", &repository.to_string());
    }
    if let Some(pr) = trigger.event.pull_request() {
        use_case.reporter.kv("Pull", &format!("#{}", pr.number));
        use_case.reporter.kv("Head", &pr.head_sha);
    }
    use_case.reporter.kv("Base", &base.label());
    use_case
        .reporter
        .kv("Workdir", &settings.workdir.display().to_string());
    use_case.reporter.kv("Pattern", &settings.pattern);
    use_case.reporter.kv("Exclude", &settings.exclude);
    use_case.reporter.kv(
        "Mode",
        if settings.dry_run {
            "dry-run"
        } else {
            "post-comment"
        },
    );

    Ok(ExecutionContext {
        config,
        settings,
        trigger,
        base,
    })
}
