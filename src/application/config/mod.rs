//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수/프로세스 접근은 `infrastructure`에서만 수행한다.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::report::RenderOptions;

pub const DEFAULT_PATTERN: &str = "**/*.asset.php";
pub const DEFAULT_EXCLUDE: &str = "{**/node_modules/**,**/vendor/**}";
pub const DEFAULT_BUILD_SCRIPT: &str = "build";
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    /// 스냅샷/빌드 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// 코멘트 게시용 GitHub 설정
    #[serde(default)]
    pub github: GitHubConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct DefaultsConfig {
    /// 매니페스트 파일 glob
    pub pattern: Option<String>,
    /// 제외 glob (`{a,b}` 대안 표기 허용)
    pub exclude: Option<String>,
    /// `<manager> run <build_script>`로 실행할 스크립트 이름
    pub build_script: Option<String>,
    /// base 체크아웃 직후 실행할 셸 명령(선택)
    pub clean_script: Option<String>,
    /// 변경 없는 에셋을 접힌 블록으로 표시
    pub collapse_unchanged: Option<bool>,
    /// 변경 없는 에셋을 아예 생략
    pub omit_unchanged: Option<bool>,
    /// 작업 디렉터리 override
    pub cwd: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct GitHubConfig {
    /// 고정 토큰(민감정보: 권장하지 않음)
    pub repo_token: Option<String>,
    /// 토큰을 읽을 환경변수 이름(기본 GITHUB_TOKEN)
    pub token_env: Option<String>,
    /// API base URL override(선택)
    pub api_base: Option<String>,
}

/// 실행 직전 확정된 설정. 오케스트레이터는 이 값만 본다.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub workdir: PathBuf,
    pub pattern: String,
    pub exclude: String,
    pub build_script: String,
    pub clean_script: Option<String>,
    pub render: RenderOptions,
    pub dry_run: bool,
}

impl Config {
    pub fn pattern(&self) -> String {
        self.defaults
            .pattern
            .clone()
            .unwrap_or_else(|| DEFAULT_PATTERN.to_string())
    }

    pub fn exclude(&self) -> String {
        self.defaults
            .exclude
            .clone()
            .unwrap_or_else(|| DEFAULT_EXCLUDE.to_string())
    }

    pub fn build_script(&self) -> String {
        self.defaults
            .build_script
            .clone()
            .unwrap_or_else(|| DEFAULT_BUILD_SCRIPT.to_string())
    }

    /// 빈 문자열은 미지정으로 본다.
    pub fn clean_script(&self) -> Option<String> {
        self.defaults
            .clean_script
            .clone()
            .filter(|s| !s.trim().is_empty())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            collapse_unchanged: self.defaults.collapse_unchanged.unwrap_or(false),
            omit_unchanged: self.defaults.omit_unchanged.unwrap_or(false),
        }
    }

    pub fn api_base(&self) -> String {
        self.github
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    pub fn token_env(&self) -> String {
        self.github
            .token_env
            .clone()
            .unwrap_or_else(|| DEFAULT_TOKEN_ENV.to_string())
    }

    /// `cwd` 설정을 기준 디렉터리에 대해 해석해 실행 설정을 만든다.
    pub fn run_settings(&self, base_dir: PathBuf, dry_run: bool) -> RunSettings {
        let workdir = match self.defaults.cwd.as_deref().map(str::trim) {
            Some(cwd) if !cwd.is_empty() => base_dir.join(cwd),
            _ => base_dir,
        };

        RunSettings {
            workdir,
            pattern: self.pattern(),
            exclude: self.exclude(),
            build_script: self.build_script(),
            clean_script: self.clean_script(),
            render: self.render_options(),
            dry_run,
        }
    }

    /// 후순위 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
        self.github.merge_from(other.github);
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.pattern.is_some() {
            self.pattern = other.pattern;
        }
        if other.exclude.is_some() {
            self.exclude = other.exclude;
        }
        if other.build_script.is_some() {
            self.build_script = other.build_script;
        }
        if other.clean_script.is_some() {
            self.clean_script = other.clean_script;
        }
        if other.collapse_unchanged.is_some() {
            self.collapse_unchanged = other.collapse_unchanged;
        }
        if other.omit_unchanged.is_some() {
            self.omit_unchanged = other.omit_unchanged;
        }
        if other.cwd.is_some() {
            self.cwd = other.cwd;
        }
    }
}

impl GitHubConfig {
    pub fn merge_from(&mut self, other: GitHubConfig) {
        if other.repo_token.is_some() {
            self.repo_token = other.repo_token;
        }
        if other.token_env.is_some() {
            self.token_env = other.token_env;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
    }
}
