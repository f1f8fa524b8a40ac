//! 현재/기준 리비전의 에셋 의존성을 비교하고 리포트를 게시하는 오케스트레이션 유스케이스.

mod build_cycle;
mod checkout;
mod context;
mod publish;

#[cfg(test)]
mod testing;

use std::path::PathBuf;

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::{
    CommandRunner, CommentGatewayFactory, ConfigRepository, EventSource, PackageManagerDetector,
    ReportRenderer, Reporter, SnapshotReader, SourceControl, TokenResolver,
};
use crate::domain::report::UpsertOutcome;
use crate::domain::snapshot::{ChangeRecord, ChangeStatus, diff_snapshots, has_changes};

use build_cycle::{Revision, run_build_cycle};
use checkout::{checkout_base, run_clean_script};
use context::load_execution_context;
use publish::publish_report;

/// 실행 시 CLI에서 넘어오는 옵션.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// 설정 파일/액션 입력 위에 덮어쓸 값
    pub overrides: Config,
    /// `cwd`가 상대 경로일 때 기준이 되는 디렉터리
    pub base_dir: PathBuf,
    /// 게시하지 않고 리포트를 출력만 한다
    pub dry_run: bool,
}

/// 실행 결과 요약.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub records: Vec<ChangeRecord>,
    pub body: String,
    pub outcome: UpsertOutcome,
}

/// 트리거 해석부터 두 번의 빌드, diff, 코멘트 업서트까지 전체 흐름을 조율한다.
pub struct CompareDependenciesUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub token_resolver: &'a dyn TokenResolver,
    pub event_source: &'a dyn EventSource,
    pub commands: &'a dyn CommandRunner,
    pub source_control: &'a dyn SourceControl,
    pub detector: &'a dyn PackageManagerDetector,
    pub snapshot_reader: &'a dyn SnapshotReader,
    pub renderer: &'a dyn ReportRenderer,
    pub gateway_factory: &'a dyn CommentGatewayFactory,
    pub reporter: &'a dyn Reporter,
}

impl<'a> CompareDependenciesUseCase<'a> {
    /// 비교 실행 진입점.
    /// 리포팅 단계 이전의 실패는 모두 치명적이고, 리포팅 실패는 결과 티어만 바꾼다.
    pub async fn execute(&self, options: RunOptions) -> Result<RunSummary> {
        let ctx = load_execution_context(self, &options)?;
        let settings = &ctx.settings;

        self.reporter.section("Current Revision");
        let profile = self.detector.detect(&settings.workdir);
        let current = run_build_cycle(self, settings, &profile, Revision::Current).await?;

        self.reporter.section("Checkout Base");
        checkout_base(self, &settings.workdir, &ctx.base).await?;
        if let Some(script) = &settings.clean_script {
            run_clean_script(self, &settings.workdir, script).await?;
        }

        self.reporter.section("Base Revision");
        let profile = self.detector.detect(&settings.workdir);
        let base = run_build_cycle(self, settings, &profile, Revision::Base).await?;

        self.reporter.section("Compare");
        let records = diff_snapshots(&base, &current);
        let changed = records
            .iter()
            .filter(|r| r.status != ChangeStatus::Unchanged)
            .count();
        self.reporter.kv("Assets", &records.len().to_string());
        self.reporter.kv("Changed", &changed.to_string());
        if !has_changes(&records) {
            self.reporter.status("Compare", "no dependency changes detected");
        }

        let body = self.renderer.render(&records, settings.render);

        self.reporter.section("Report");
        let outcome = publish_report(self, &ctx, &body).await;
        self.reporter.status("Report", outcome.label());

        self.reporter.raw("All done!");
        Ok(RunSummary {
            records,
            body,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::application::ports::FetchSpec;
    use crate::domain::error::RunError;
    use crate::domain::report::MARKER_TOKEN;

    #[tokio::test]
    async fn unsupported_trigger_fails_before_any_side_effect() {
        let harness = Harness::new(Fixture::unsupported("schedule"));
        let err = harness.use_case().execute(RunOptions::default()).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RunError>(),
            Some(RunError::UnsupportedTrigger(name)) if name == "schedule"
        ));
        assert!(harness.commands.calls().is_empty());
        assert!(harness.source_control.calls().is_empty());
        assert!(harness.gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn pull_request_run_builds_twice_and_creates_report() {
        let harness = Harness::new(Fixture::pull_request());
        let summary = harness.use_case().execute(RunOptions::default()).await.unwrap();

        assert_eq!(summary.outcome, UpsertOutcome::Created);
        assert_eq!(summary.records.len(), 1);
        assert_eq!(summary.records[0].status, ChangeStatus::Changed);

        assert_eq!(
            harness.commands.calls(),
            vec![
                "npm install",
                "npm run build",
                "npm install",
                "npm run build",
            ]
        );
        assert_eq!(
            harness.source_control.calls(),
            vec![
                "discard".to_string(),
                "fetch Ref(\"trunk\")".to_string(),
                "reset trunk".to_string(),
                "discard".to_string(),
            ]
        );

        let created = harness.gateway.created();
        assert_eq!(created.len(), 1);
        assert!(created[0].contains(MARKER_TOKEN));
        assert_eq!(harness.reporter.lines().last().map(String::as_str), Some("All done!"));
    }

    #[tokio::test]
    async fn package_manager_is_detected_again_for_base_build() {
        let harness = Harness::new(Fixture::pull_request());
        harness
            .detector
            .then_found("yarn.lock")
            .then_found("pnpm-lock.yaml");

        harness.use_case().execute(RunOptions::default()).await.unwrap();

        assert_eq!(
            harness.commands.calls(),
            vec![
                "yarn install --frozen-lockfile",
                "yarn run build",
                "pnpm install --frozen-lockfile",
                "pnpm run build",
            ]
        );
    }

    #[tokio::test]
    async fn session_shows_head_and_base_revisions() {
        let harness = Harness::new(Fixture::pull_request());
        harness.use_case().execute(RunOptions::default()).await.unwrap();

        let lines = harness.reporter.lines();
        assert!(lines.contains(&"Pull: #42".to_string()));
        assert!(lines.contains(&"Head: he4d".to_string()));
        assert!(lines.contains(&"Base: trunk (b4se)".to_string()));
    }

    #[tokio::test]
    async fn push_run_skips_commenting() {
        let harness = Harness::new(Fixture::push());
        let summary = harness.use_case().execute(RunOptions::default()).await.unwrap();

        assert_eq!(summary.outcome, UpsertOutcome::Skipped);
        assert!(harness.gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_install_aborts_without_report() {
        let harness = Harness::new(Fixture::pull_request());
        harness.commands.fail_on("npm install");

        let err = harness.use_case().execute(RunOptions::default()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RunError>(),
            Some(RunError::BuildStage { .. })
        ));
        assert!(harness.source_control.calls().is_empty());
        assert!(harness.gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_base_build_aborts_without_report() {
        let harness = Harness::new(Fixture::pull_request());
        harness
            .detector
            .then_found("package-lock.json")
            .then_found("pnpm-lock.yaml");
        harness.commands.fail_on("pnpm run build");

        let err = harness.use_case().execute(RunOptions::default()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RunError>(),
            Some(RunError::BuildStage {
                stage: crate::domain::error::BuildStage::Build,
                revision: "base",
                ..
            })
        ));
        assert_eq!(
            harness.commands.calls(),
            vec!["npm ci", "npm run build", "pnpm install --frozen-lockfile", "pnpm run build"]
        );
        assert!(harness.gateway.calls().is_empty());
        assert!(!harness.reporter.lines().iter().any(|l| l == "All done!"));
    }

    #[tokio::test]
    async fn clean_script_runs_after_checkout_and_its_failure_is_fatal() {
        let harness = Harness::new(Fixture::pull_request());
        let options = RunOptions {
            overrides: Config {
                defaults: crate::application::config::DefaultsConfig {
                    clean_script: Some("rm -rf build".to_string()),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };

        harness.use_case().execute(options.clone()).await.unwrap();
        assert!(harness.commands.calls().contains(&"sh -c rm -rf build".to_string()));

        let failing = Harness::new(Fixture::pull_request());
        failing.commands.fail_on("sh -c rm -rf build");
        let err = failing.use_case().execute(options).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<RunError>(), Some(RunError::CleanScript(_))));
        assert!(failing.gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn checkout_exhaustion_is_fatal() {
        let harness = Harness::new(Fixture::pull_request());
        harness.source_control.fail_fetch(FetchSpec::Ref("trunk".to_string()));
        harness.source_control.fail_reset("trunk");
        harness.source_control.fail_reset("b4se");

        let err = harness.use_case().execute(RunOptions::default()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RunError>(),
            Some(RunError::CheckoutExhausted { .. })
        ));
    }

    #[tokio::test]
    async fn reporting_failures_never_fail_the_run() {
        let harness = Harness::new(Fixture::pull_request());
        harness.gateway.fail_all();

        let summary = harness.use_case().execute(RunOptions::default()).await.unwrap();
        assert_eq!(summary.outcome, UpsertOutcome::PrintedRaw);
        assert!(harness.reporter.lines().iter().any(|l| l.contains(MARKER_TOKEN)));
    }

    #[tokio::test]
    async fn dry_run_prints_instead_of_posting() {
        let harness = Harness::new(Fixture::pull_request());
        let options = RunOptions {
            dry_run: true,
            ..Default::default()
        };

        let summary = harness.use_case().execute(options).await.unwrap();
        assert_eq!(summary.outcome, UpsertOutcome::PrintedRaw);
        assert!(harness.gateway.calls().is_empty());
    }
}
