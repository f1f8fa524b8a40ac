//! 실행을 중단시키는 치명적 오류 분류.
//!
//! 리포팅 단계의 오류는 여기 포함되지 않는다. 각 티어에서 로그로 남기고 다음 티어로 넘긴다.

use thiserror::Error;

/// 빌드 사이클의 어느 단계에서 실패했는지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Install,
    Build,
    ResetWorkingTree,
    ReadSnapshot,
}

impl std::fmt::Display for BuildStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BuildStage::Install => "install",
            BuildStage::Build => "build",
            BuildStage::ResetWorkingTree => "reset working tree",
            BuildStage::ReadSnapshot => "read snapshot",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("unsupported trigger event: '{0}' (expected push, pull_request or pull_request_target)")]
    UnsupportedTrigger(String),

    #[error("{0} event carries neither a base ref nor a base revision id")]
    UnresolvableBase(String),

    #[error("{stage} failed for {revision} revision")]
    BuildStage {
        stage: BuildStage,
        revision: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to check out base revision {target}")]
    CheckoutExhausted {
        target: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("clean script failed")]
    CleanScript(#[source] anyhow::Error),
}
