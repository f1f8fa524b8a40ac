//! GitHub Actions 이벤트 payload 로더.
//!
//! `GITHUB_EVENT_NAME`으로 지원 여부를 먼저 판정하고, 그 다음에만 payload 파일을 읽는다.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::application::ports::EventSource;
use crate::domain::trigger::{PullRequestEvent, RepositoryRef, TriggerContext, TriggerEvent};

/// 환경변수 기반 이벤트 소스.
#[derive(Debug, Clone, Default)]
pub struct GitHubEventSource;

impl EventSource for GitHubEventSource {
    fn load(&self) -> Result<TriggerContext> {
        let name = env::var("GITHUB_EVENT_NAME").unwrap_or_default();
        TriggerEvent::ensure_supported(&name)?;

        let path = env::var("GITHUB_EVENT_PATH")
            .map(PathBuf::from)
            .context("GITHUB_EVENT_PATH is not set")?;
        let payload = fs::read_to_string(&path)
            .with_context(|| format!("failed to read event payload at {}", path.display()))?;

        parse_event(&name, &payload, env::var("GITHUB_REPOSITORY").ok().as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct PushPayload {
    #[serde(default)]
    before: String,
    #[serde(rename = "ref", default)]
    git_ref: String,
    repository: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: Option<u64>,
    pull_request: PullRequestBody,
    repository: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestBody {
    number: Option<u64>,
    base: BranchPayload,
    head: BranchPayload,
}

#[derive(Debug, Deserialize)]
struct BranchPayload {
    sha: String,
    #[serde(rename = "ref", default)]
    git_ref: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    full_name: String,
}

/// 이벤트 이름과 payload JSON을 닫힌 이벤트 타입으로 변환한다.
/// 저장소는 `GITHUB_REPOSITORY` 값을 우선하고 없으면 payload의 `repository.full_name`을 쓴다.
pub fn parse_event(name: &str, payload: &str, repository: Option<&str>) -> Result<TriggerContext> {
    TriggerEvent::ensure_supported(name)?;

    let (event, payload_repo) = match name {
        "push" => {
            let push: PushPayload =
                serde_json::from_str(payload).context("invalid push event payload")?;
            (
                TriggerEvent::Push {
                    before: push.before,
                    git_ref: short_ref(&push.git_ref),
                },
                push.repository,
            )
        }
        _ => {
            let pr: PullRequestPayload =
                serde_json::from_str(payload).context("invalid pull request event payload")?;
            let number = pr
                .pull_request
                .number
                .or(pr.number)
                .context("pull request payload carries no number")?;
            let body = PullRequestEvent {
                base_sha: pr.pull_request.base.sha,
                base_ref: pr.pull_request.base.git_ref,
                number,
                head_sha: pr.pull_request.head.sha,
            };
            let event = if name == "pull_request_target" {
                TriggerEvent::PullRequestTarget(body)
            } else {
                TriggerEvent::PullRequest(body)
            };
            (event, pr.repository)
        }
    };

    let repository = repository
        .and_then(RepositoryRef::parse)
        .or_else(|| payload_repo.and_then(|r| RepositoryRef::parse(&r.full_name)));

    Ok(TriggerContext { event, repository })
}

/// `refs/heads/main` -> `main`. 태그 등 다른 ref는 그대로 둔다.
fn short_ref(git_ref: &str) -> String {
    git_ref
        .strip_prefix("refs/heads/")
        .unwrap_or(git_ref)
        .to_string()
}
