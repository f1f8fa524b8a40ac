//! 코멘트 게이트웨이 포트 구현 어댑터.

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::{CommentGateway, CommentGatewayFactory};
use crate::domain::trigger::RepositoryRef;
use crate::infrastructure::github::GitHubClient;

/// GitHub REST 클라이언트를 만드는 팩토리 어댑터.
pub struct GitHubGatewayFactory;

impl CommentGatewayFactory for GitHubGatewayFactory {
    fn build(
        &self,
        repository: &RepositoryRef,
        config: &Config,
        token: String,
    ) -> Result<Box<dyn CommentGateway>> {
        Ok(Box::new(GitHubClient::new(
            &config.api_base(),
            repository,
            token,
        )?))
    }
}
