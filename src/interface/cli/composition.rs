//! 애플리케이션 조립(composition root) 모듈.

use crate::application::usecases::compare_deps::CompareDependenciesUseCase;
use crate::application::usecases::inspect::{InspectConfigUseCase, InspectSnapshotUseCase};
use crate::infrastructure::adapters::{
    ConsoleReporter, EnvTokenResolver, GitHubGatewayFactory, JsonConfigRepository,
    LockfileDetector, MarkdownRendererAdapter,
};
use crate::infrastructure::event::GitHubEventSource;
use crate::infrastructure::git::GitCli;
use crate::infrastructure::manifest::AssetManifestReader;
use crate::infrastructure::process::TokioCommandRunner;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    token_resolver: EnvTokenResolver,
    event_source: GitHubEventSource,
    commands: TokioCommandRunner,
    source_control: GitCli,
    detector: LockfileDetector,
    snapshot_reader: AssetManifestReader,
    renderer: MarkdownRendererAdapter,
    gateway_factory: GitHubGatewayFactory,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self {
            config_repo: JsonConfigRepository,
            token_resolver: EnvTokenResolver,
            event_source: GitHubEventSource,
            commands: TokioCommandRunner,
            source_control: GitCli::default(),
            detector: LockfileDetector,
            snapshot_reader: AssetManifestReader,
            renderer: MarkdownRendererAdapter,
            gateway_factory: GitHubGatewayFactory,
            reporter: ConsoleReporter,
        }
    }
}

impl AppComposition {
    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    pub fn inspect_snapshot_usecase(&self) -> InspectSnapshotUseCase<'_> {
        InspectSnapshotUseCase {
            config_repo: &self.config_repo,
            snapshot_reader: &self.snapshot_reader,
        }
    }

    /// 의존성 비교 유스케이스를 생성한다.
    pub fn compare_usecase(&self) -> CompareDependenciesUseCase<'_> {
        CompareDependenciesUseCase {
            config_repo: &self.config_repo,
            token_resolver: &self.token_resolver,
            event_source: &self.event_source,
            commands: &self.commands,
            source_control: &self.source_control,
            detector: &self.detector,
            snapshot_reader: &self.snapshot_reader,
            renderer: &self.renderer,
            gateway_factory: &self.gateway_factory,
            reporter: &self.reporter,
        }
    }
}
