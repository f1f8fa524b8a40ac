//! 실행 없이 상태를 확인하는 점검용 유스케이스(설정 병합 결과, 현재 스냅샷).

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::config::Config;
use crate::application::ports::{ConfigRepository, SnapshotReader};

/// 현재 적용 중인 설정을 사람이 읽기 쉬운 JSON으로 반환한다.
pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl<'a> InspectConfigUseCase<'a> {
    pub fn execute(&self) -> Result<String> {
        self.config_repo.inspect_pretty_json()
    }
}

/// 빌드를 돌리지 않고 작업 트리에 이미 있는 매니페스트로 스냅샷을 만든다.
/// 패턴/제외 규칙이 의도대로 잡히는지 확인하는 용도.
pub struct InspectSnapshotUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub snapshot_reader: &'a dyn SnapshotReader,
}

impl<'a> InspectSnapshotUseCase<'a> {
    pub fn execute(&self, overrides: Config, base_dir: PathBuf) -> Result<String> {
        let mut config = self
            .config_repo
            .load()
            .context("failed to load wpdeps config")?;
        config.merge_from(overrides);
        let settings = config.run_settings(base_dir, true);

        let snapshot = self
            .snapshot_reader
            .read(&settings.workdir, &settings.pattern, &settings.exclude)
            .with_context(|| {
                format!("failed to read snapshot in {}", settings.workdir.display())
            })?;
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }
}
