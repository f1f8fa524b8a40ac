//! GitHub REST API 연동 구현(이슈 코멘트/PR 리뷰).

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::application::ports::CommentGateway;
use crate::domain::report::IssueComment;
use crate::domain::trigger::RepositoryRef;

const PER_PAGE: usize = 100;

pub struct GitHubClient {
    client: Client,
    api_base: String,
    owner: String,
    repo: String,
    token: String,
}

impl GitHubClient {
    /// 저장소 대상 클라이언트를 생성한다. `api_base`는 절대 URL이어야 한다.
    pub fn new(api_base: &str, repository: &RepositoryRef, token: String) -> Result<Self> {
        let parsed = Url::parse(api_base)
            .with_context(|| format!("github: invalid API base URL '{api_base}'"))?;
        Ok(Self {
            client: Client::new(),
            api_base: parsed.as_str().trim_end_matches('/').to_string(),
            owner: repository.owner.clone(),
            repo: repository.repo.clone(),
            token,
        })
    }

    fn repo_endpoint(&self) -> String {
        format!("{}/repos/{}/{}", self.api_base, self.owner, self.repo)
    }

    fn issue_comments_endpoint(&self, issue_number: u64) -> String {
        format!("{}/issues/{}/comments", self.repo_endpoint(), issue_number)
    }

    fn issue_comment_endpoint(&self, comment_id: u64) -> String {
        format!("{}/issues/comments/{}", self.repo_endpoint(), comment_id)
    }

    fn reviews_endpoint(&self, pull_number: u64) -> String {
        format!("{}/pulls/{}/reviews", self.repo_endpoint(), pull_number)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        // 공통 헤더/인증 적용.
        self.client
            .request(method, url)
            .header("User-Agent", "wpdeps")
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .bearer_auth(&self.token)
    }
}

/// 실패 상태 코드면 응답 본문을 포함한 오류로 바꾼다.
async fn read_body(resp: Response, action: &str) -> Result<String> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .with_context(|| format!("github: failed to read {action} body"))?;
    if !status.is_success() {
        anyhow::bail!("github: failed to {action} ({status}): {body}");
    }
    Ok(body)
}

#[derive(Debug, Deserialize)]
struct IssueCommentResponse {
    id: u64,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    user: Option<UserResponse>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    #[serde(rename = "type", default)]
    kind: String,
}

impl From<IssueCommentResponse> for IssueComment {
    fn from(c: IssueCommentResponse) -> Self {
        IssueComment {
            id: c.id,
            body: c.body.unwrap_or_default(),
            author_is_bot: c.user.is_some_and(|u| u.kind == "Bot"),
        }
    }
}

#[async_trait]
impl CommentGateway for GitHubClient {
    async fn list_comments(&self, issue_number: u64) -> Result<Vec<IssueComment>> {
        let mut comments = Vec::new();
        let mut page = 1;

        loop {
            let resp = self
                .request(Method::GET, self.issue_comments_endpoint(issue_number))
                .query(&[("per_page", PER_PAGE.to_string()), ("page", page.to_string())])
                .send()
                .await
                .context("github: failed to list comments")?;
            let body = read_body(resp, "list comments").await?;
            let batch: Vec<IssueCommentResponse> =
                serde_json::from_str(&body).context("github: invalid comments JSON")?;

            let last_page = batch.len() < PER_PAGE;
            comments.extend(batch.into_iter().map(IssueComment::from));
            if last_page {
                break;
            }
            page += 1;
        }

        Ok(comments)
    }

    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<()> {
        let resp = self
            .request(Method::PATCH, self.issue_comment_endpoint(comment_id))
            .json(&json!({ "body": body }))
            .send()
            .await
            .context("github: failed to update comment")?;
        read_body(resp, "update comment").await?;
        Ok(())
    }

    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<()> {
        let resp = self
            .request(Method::POST, self.issue_comments_endpoint(issue_number))
            .json(&json!({ "body": body }))
            .send()
            .await
            .context("github: failed to create comment")?;
        read_body(resp, "create comment").await?;
        Ok(())
    }

    async fn create_review_comment(&self, pull_number: u64, body: &str) -> Result<()> {
        let resp = self
            .request(Method::POST, self.reviews_endpoint(pull_number))
            .json(&json!({ "body": body, "event": "COMMENT" }))
            .send()
            .await
            .context("github: failed to create review")?;
        read_body(resp, "create review").await?;
        Ok(())
    }
}
