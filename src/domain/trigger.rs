//! 워크플로 트리거 이벤트와 비교 기준(base) 리비전 해석 모듈.

use crate::domain::error::RunError;

/// 실행 1회에 한 번 주어지는 트리거 이벤트.
/// 경계(이벤트 payload 로딩)에서 한 번만 검증되고 이후에는 불변이다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    Push {
        before: String,
        git_ref: String,
    },
    PullRequest(PullRequestEvent),
    PullRequestTarget(PullRequestEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    pub base_sha: String,
    pub base_ref: String,
    pub number: u64,
    pub head_sha: String,
}

/// `owner/repo` 저장소 식별자.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub repo: String,
}

impl RepositoryRef {
    /// `owner/repo` 문자열을 분해한다.
    pub fn parse(full_name: &str) -> Option<Self> {
        let (owner, repo) = full_name.trim().split_once('/')?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// 경계에서 읽어 들인 트리거 정보 묶음.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerContext {
    pub event: TriggerEvent,
    /// 코멘트 대상 저장소. 알 수 없으면 코멘트 대신 로그 출력으로 떨어진다.
    pub repository: Option<RepositoryRef>,
}

/// 비교 기준 리비전. `git_ref`는 push 이벤트에서 비어 있을 수 있다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionTarget {
    pub git_ref: Option<String>,
    pub id: Option<String>,
}

impl RevisionTarget {
    /// 사람이 읽기 쉬운 표기(ref 우선).
    pub fn label(&self) -> String {
        match (&self.git_ref, &self.id) {
            (Some(r), Some(id)) => format!("{r} ({id})"),
            (Some(r), None) => r.clone(),
            (None, Some(id)) => id.clone(),
            (None, None) => "<unknown>".to_string(),
        }
    }
}

impl TriggerEvent {
    /// GitHub 이벤트 이름을 지원 이벤트로 분류한다.
    /// 지원하지 않는 이벤트는 어떤 부수효과보다 먼저 거부된다.
    pub fn ensure_supported(event_name: &str) -> Result<(), RunError> {
        match event_name {
            "push" | "pull_request" | "pull_request_target" => Ok(()),
            other => Err(RunError::UnsupportedTrigger(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TriggerEvent::Push { .. } => "push",
            TriggerEvent::PullRequest(_) => "pull_request",
            TriggerEvent::PullRequestTarget(_) => "pull_request_target",
        }
    }

    /// 코멘트를 남길 PR 번호. push에는 코멘트 대상이 없다.
    pub fn pull_number(&self) -> Option<u64> {
        self.pull_request().map(|pr| pr.number)
    }

    pub fn pull_request(&self) -> Option<&PullRequestEvent> {
        match self {
            TriggerEvent::Push { .. } => None,
            TriggerEvent::PullRequest(pr) | TriggerEvent::PullRequestTarget(pr) => Some(pr),
        }
    }

    /// 이벤트 종류별 규칙으로 base 리비전을 해석한다.
    /// - push: `{ref, before}`
    /// - pull_request(_target): `{base.ref, base.sha}`
    pub fn resolve_base_revision(&self) -> Result<RevisionTarget, RunError> {
        let (git_ref, id) = match self {
            TriggerEvent::Push { before, git_ref } => (git_ref, before),
            TriggerEvent::PullRequest(pr) | TriggerEvent::PullRequestTarget(pr) => {
                (&pr.base_ref, &pr.base_sha)
            }
        };

        let target = RevisionTarget {
            git_ref: non_empty(git_ref),
            id: non_empty(id),
        };

        if target.git_ref.is_none() && target.id.is_none() {
            return Err(RunError::UnresolvableBase(self.name().to_string()));
        }
        Ok(target)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
