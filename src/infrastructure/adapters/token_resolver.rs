//! 코멘트 게시 토큰 해석 포트 구현.

use crate::application::config::Config;
use crate::application::ports::TokenResolver;
use crate::infrastructure::config::resolve_repo_token;

/// 설정(inline/env)에 기반해 런타임 토큰을 해석한다.
pub struct EnvTokenResolver;

impl TokenResolver for EnvTokenResolver {
    fn resolve(&self, config: &Config) -> Option<String> {
        let resolution = resolve_repo_token(config);
        tracing::debug!(
            source = resolution.source.as_deref().unwrap_or("none"),
            "resolved repo token source"
        );
        resolution.token
    }
}
