//! 설정 값(token/action input)을 실제 런타임 값으로 해석하는 유틸리티.
//!
//! - 환경변수 접근은 인프라 계층에서만 수행한다.

use std::env;

use crate::application::config::{Config, DefaultsConfig, GitHubConfig};

/// 토큰 해석 결과. 토큰 값 자체는 진단 출력에 쓰지 않는다.
#[derive(Debug, Clone)]
pub struct TokenResolution {
    pub token: Option<String>,
    pub source: Option<String>,
}

/// `repo_token` 직접값 -> `token_env` 환경변수 순서로 토큰을 찾는다.
pub fn resolve_repo_token(config: &Config) -> TokenResolution {
    resolve_repo_token_with(config, |name| env::var(name).ok())
}

pub(crate) fn resolve_repo_token_with(
    config: &Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> TokenResolution {
    if let Some(token) = non_blank(config.github.repo_token.as_deref()) {
        return TokenResolution {
            token: Some(token),
            source: Some("inline".to_string()),
        };
    }

    let env_name = config.token_env();
    match non_blank(lookup(&env_name).as_deref()) {
        Some(token) => TokenResolution {
            token: Some(token),
            source: Some(format!("env:{env_name}")),
        },
        None => TokenResolution {
            token: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}

/// GitHub Action 입력(`INPUT_<NAME>`)을 설정 레이어로 변환한다.
/// 러너는 하이픈을 그대로 두므로 하이픈/밑줄 표기를 모두 확인한다.
pub fn action_inputs() -> Config {
    action_inputs_with(|name| env::var(name).ok())
}

pub(crate) fn action_inputs_with(lookup: impl Fn(&str) -> Option<String>) -> Config {
    let input = |name: &str| {
        let upper = name.to_ascii_uppercase();
        lookup(&format!("INPUT_{upper}"))
            .or_else(|| lookup(&format!("INPUT_{}", upper.replace('-', "_"))))
            .and_then(|v| non_blank(Some(v.as_str())))
    };
    let flag = |name: &str| input(name).map(|v| parse_bool(&v));

    Config {
        defaults: DefaultsConfig {
            pattern: input("pattern"),
            exclude: input("exclude"),
            build_script: input("build-script"),
            clean_script: input("clean-script"),
            collapse_unchanged: flag("collapse-unchanged"),
            omit_unchanged: flag("omit-unchanged"),
            cwd: input("cwd"),
        },
        github: GitHubConfig {
            repo_token: input("repo-token"),
            token_env: None,
            api_base: lookup("GITHUB_API_URL").and_then(|v| non_blank(Some(v.as_str()))),
        },
    }
}

/// Action의 boolean 입력 규칙(true/True/TRUE 등). 나머지는 false.
fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
