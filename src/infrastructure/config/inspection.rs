//! 적용 설정 진단(inspection) 뷰 모델.

use std::collections::BTreeMap;
use std::env;

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_repo_token;
use crate::application::config::DefaultsConfig;

/// 진단 출력에서 가용 여부를 확인하는 외부 도구.
const TOOLS: [&str; 4] = ["git", "npm", "yarn", "pnpm"];

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective: EffectiveSettings,
    pub github: GitHubInspection,
    pub tools: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveSettings {
    pub pattern: String,
    pub exclude: String,
    pub build_script: String,
    pub clean_script: Option<String>,
    pub collapse_unchanged: bool,
    pub omit_unchanged: bool,
    pub cwd: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GitHubInspection {
    pub api_base: String,
    pub token_source: Option<String>,
    pub token_resolved: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        let render = config.render_options();
        let token = resolve_repo_token(config);

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: config.defaults.clone(),
            effective: EffectiveSettings {
                pattern: config.pattern(),
                exclude: config.exclude(),
                build_script: config.build_script(),
                clean_script: config.clean_script(),
                collapse_unchanged: render.collapse_unchanged,
                omit_unchanged: render.omit_unchanged,
                cwd: config.defaults.cwd.clone(),
            },
            github: GitHubInspection {
                api_base: config.api_base(),
                token_source: token.source,
                token_resolved: token.token.is_some(),
            },
            tools: TOOLS
                .iter()
                .map(|tool| (tool.to_string(), on_path(tool)))
                .collect(),
        }
    }
}

/// PATH에서 실행 파일을 찾는다.
fn on_path(program: &str) -> bool {
    let Some(path_var) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&path_var).any(|dir| {
        let candidate = dir.join(program);
        candidate.is_file() || (cfg!(windows) && candidate.with_extension("cmd").is_file())
    })
}
