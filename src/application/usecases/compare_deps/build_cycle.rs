//! 한 리비전에 대한 install -> build -> 작업 트리 복원 -> 스냅샷 읽기 단계.

use anyhow::Result;

use crate::application::config::RunSettings;
use crate::application::usecases::compare_deps::CompareDependenciesUseCase;
use crate::domain::error::{BuildStage, RunError};
use crate::domain::package_manager::PackageManagerProfile;
use crate::domain::snapshot::DependencySnapshot;

/// 어느 쪽 빌드인지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Revision {
    Current,
    Base,
}

impl Revision {
    fn label(self) -> &'static str {
        match self {
            Revision::Current => "current",
            Revision::Base => "base",
        }
    }
}

/// 각 단계 실패는 재시도 없이 `RunError::BuildStage`로 전파된다.
pub(super) async fn run_build_cycle(
    use_case: &CompareDependenciesUseCase<'_>,
    settings: &RunSettings,
    profile: &PackageManagerProfile,
    revision: Revision,
) -> Result<DependencySnapshot> {
    let workdir = settings.workdir.as_path();
    let stage_error = |stage: BuildStage| {
        move |source: anyhow::Error| RunError::BuildStage {
            stage,
            revision: revision.label(),
            source,
        }
    };

    use_case.reporter.kv("Manager", profile.name());

    use_case
        .reporter
        .status("Install", &profile.install_command_line());
    use_case
        .commands
        .run(workdir, &profile.install_command)
        .await
        .map_err(stage_error(BuildStage::Install))?;

    let build_command = profile.run_script_command(&settings.build_script);
    use_case.reporter.status("Build", &build_command.join(" "));
    use_case
        .commands
        .run(workdir, &build_command)
        .await
        .map_err(stage_error(BuildStage::Build))?;

    use_case
        .reporter
        .status("Reset", "discarding changes to tracked files");
    use_case
        .source_control
        .discard_changes(workdir)
        .await
        .map_err(stage_error(BuildStage::ResetWorkingTree))?;

    let snapshot = use_case
        .snapshot_reader
        .read(workdir, &settings.pattern, &settings.exclude)
        .map_err(stage_error(BuildStage::ReadSnapshot))?;

    use_case
        .reporter
        .kv("Assets", &snapshot.len().to_string());
    tracing::debug!(revision = revision.label(), assets = snapshot.len(), "snapshot captured");
    Ok(snapshot)
}
