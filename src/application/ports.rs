//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;
use crate::domain::package_manager::PackageManagerProfile;
use crate::domain::report::{IssueComment, RenderOptions};
use crate::domain::snapshot::{ChangeRecord, DependencySnapshot};
use crate::domain::trigger::{RepositoryRef, TriggerContext};

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 설정에서 코멘트 게시용 토큰을 해석하는 포트.
pub trait TokenResolver: Send + Sync {
    fn resolve(&self, config: &Config) -> Option<String>;
}

/// 트리거 이벤트 payload를 읽어 검증된 이벤트로 돌려주는 포트.
/// 지원하지 않는 이벤트는 여기서 `RunError::UnsupportedTrigger`로 거부된다.
pub trait EventSource: Send + Sync {
    fn load(&self) -> Result<TriggerContext>;
}

/// 외부 명령 실행 결과.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// 외부 프로세스 실행 포트. 0이 아닌 종료 코드는 오류다.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, workdir: &Path, command: &[String]) -> Result<CommandOutput>;
    async fn run_shell(&self, workdir: &Path, script: &str) -> Result<CommandOutput>;
}

/// `origin`에서 가져올 대상.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchSpec {
    /// 브랜치 이름, 얕게(depth 1).
    Ref(String),
    /// 특정 리비전 id, 얕게(depth 1).
    Revision(String),
    /// refspec 없이 전체.
    All,
}

/// 작업 트리의 소스 관리 상태를 바꾸는 포트.
#[async_trait]
pub trait SourceControl: Send + Sync {
    async fn fetch(&self, workdir: &Path, tier: &FetchSpec) -> Result<()>;
    /// `git reset --hard <target>`
    async fn reset_hard(&self, workdir: &Path, target: &str) -> Result<()>;
    /// 빌드가 수정한 추적 파일을 마지막 커밋 상태로 되돌린다.
    async fn discard_changes(&self, workdir: &Path) -> Result<()>;
}

/// lockfile로 패키지 매니저를 고르는 포트.
pub trait PackageManagerDetector: Send + Sync {
    fn detect(&self, workdir: &Path) -> PackageManagerProfile;
}

/// 작업 트리에서 에셋 의존성 스냅샷을 읽는 포트.
pub trait SnapshotReader: Send + Sync {
    fn read(&self, workdir: &Path, pattern: &str, exclude: &str) -> Result<DependencySnapshot>;
}

/// diff 결과를 코멘트 본문으로 렌더링하는 포트.
pub trait ReportRenderer: Send + Sync {
    fn render(&self, records: &[ChangeRecord], options: RenderOptions) -> String;
}

/// 리포트 코멘트 게시 API 포트. 각 호출은 독립적으로 실패할 수 있다.
#[async_trait]
pub trait CommentGateway: Send + Sync {
    async fn list_comments(&self, issue_number: u64) -> Result<Vec<IssueComment>>;
    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<()>;
    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<()>;
    /// `event: COMMENT` 리뷰(머지를 막지 않음).
    async fn create_review_comment(&self, pull_number: u64, body: &str) -> Result<()>;
}

/// 저장소/토큰에 맞는 코멘트 게이트웨이를 생성하는 팩토리 포트.
pub trait CommentGatewayFactory: Send + Sync {
    fn build(&self, repository: &RepositoryRef, config: &Config, token: String)
    -> Result<Box<dyn CommentGateway>>;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn raw(&self, line: &str);
}
