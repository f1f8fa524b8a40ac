//! 빌드 산출물의 `*.asset.php` 매니페스트를 읽어 의존성 스냅샷을 만든다.
//!
//! 매니페스트 형식(WordPress dependency extraction):
//! `<?php return array('dependencies' => array('react', 'wp-i18n'), 'version' => '3f1c..');`

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::application::ports::SnapshotReader;
use crate::domain::snapshot::{AssetManifest, DependencySnapshot};

const MANIFEST_SUFFIX: &str = ".asset.php";

static DEPENDENCIES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"['"]dependencies['"]\s*=>\s*(?:array\s*\(|\[)([^\)\]]*)[\)\]]"#)
        .expect("dependencies regex")
});
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"['"]version['"]\s*=>\s*['"]([^'"]*)['"]"#).expect("version regex")
});
static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]([^'"]+)['"]"#).expect("quoted regex"));

/// 파일 시스템 기반 스냅샷 리더.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetManifestReader;

impl SnapshotReader for AssetManifestReader {
    fn read(&self, workdir: &Path, pattern: &str, exclude: &str) -> Result<DependencySnapshot> {
        read_snapshot(workdir, pattern, exclude)
    }
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// 제외 규칙. `dir/**` 꼴은 디렉터리 자체도 가지치기 대상이 된다.
struct ExcludeRules {
    paths: Vec<Pattern>,
    dirs: Vec<Pattern>,
}

impl ExcludeRules {
    fn compile(exclude: &str) -> Result<Self> {
        let mut rules = Self {
            paths: Vec::new(),
            dirs: Vec::new(),
        };
        for alternative in expand_braces(exclude) {
            let alternative = alternative.trim();
            if alternative.is_empty() {
                continue;
            }
            rules.paths.push(compile_glob(alternative, "exclude")?);
            if let Some(dir) = alternative.strip_suffix("/**") {
                rules.dirs.push(compile_glob(dir, "exclude")?);
            }
        }
        Ok(rules)
    }

    fn prunes_dir(&self, relative: &str) -> bool {
        self.dirs.iter().any(|p| p.matches_with(relative, MATCH_OPTIONS))
    }

    fn skips_file(&self, relative: &str) -> bool {
        self.paths.iter().any(|p| p.matches_with(relative, MATCH_OPTIONS))
    }
}

fn compile_glob(pattern: &str, kind: &str) -> Result<Pattern> {
    Pattern::new(pattern).with_context(|| format!("invalid {kind} glob '{pattern}'"))
}

/// `pattern`에 맞고 `exclude`에 걸리지 않는 매니페스트를 모두 읽는다.
/// 제외된 디렉터리(`node_modules` 등)는 내려가지 않고, 디렉터리 심볼릭 링크는 따라가지 않는다.
pub fn read_snapshot(root: &Path, pattern: &str, exclude: &str) -> Result<DependencySnapshot> {
    let includes = expand_braces(pattern)
        .iter()
        .map(|p| compile_glob(p.trim(), "manifest"))
        .collect::<Result<Vec<_>>>()?;
    let excludes = ExcludeRules::compile(exclude)?;

    let mut snapshot = DependencySnapshot::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir)
            .with_context(|| format!("failed to list {}", dir.display()))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
            let path = entry.path();
            let relative = relative_id(root, &path);
            let file_type = entry
                .file_type()
                .with_context(|| format!("failed to stat {}", path.display()))?;

            if file_type.is_dir() {
                if !excludes.prunes_dir(&relative) {
                    pending.push(path);
                }
                continue;
            }
            if !path.is_file()
                || !includes.iter().any(|p| p.matches_with(&relative, MATCH_OPTIONS))
                || excludes.skips_file(&relative)
            {
                continue;
            }

            let contents = fs::read_to_string(&path)
                .with_context(|| format!("failed to read manifest {}", path.display()))?;
            snapshot.insert(asset_id(&relative), parse_manifest(&contents));
        }
    }

    Ok(snapshot)
}

/// 매니페스트 본문에서 의존성 목록과 지문을 추출한다.
/// 의존성 선언이 없으면 빈 집합, version이 없으면 내용의 sha256을 지문으로 쓴다.
pub fn parse_manifest(contents: &str) -> AssetManifest {
    let dependencies: BTreeSet<String> = DEPENDENCIES_RE
        .captures(contents)
        .and_then(|caps| caps.get(1))
        .map(|list| {
            QUOTED_RE
                .captures_iter(list.as_str())
                .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
                .collect()
        })
        .unwrap_or_default();

    let fingerprint = VERSION_RE
        .captures(contents)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| hex::encode(Sha256::digest(contents.as_bytes())));

    AssetManifest {
        dependencies,
        fingerprint,
    }
}

/// `build/index.asset.php` -> `build/index.js`
pub fn asset_id(relative: &str) -> String {
    match relative.strip_suffix(MANIFEST_SUFFIX) {
        Some(stem) => format!("{stem}.js"),
        None => relative.to_string(),
    }
}

fn relative_id(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// 최상위 `{a,b}` 대안 그룹을 펼친다. 중첩 그룹은 지원하지 않는다.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let (Some(open), Some(close)) = (pattern.find('{'), pattern.rfind('}')) else {
        return vec![pattern.to_string()];
    };
    if close < open {
        return vec![pattern.to_string()];
    }

    let (prefix, rest) = pattern.split_at(open);
    let inner = &rest[1..close - open];
    let suffix = &pattern[close + 1..];

    inner
        .split(',')
        .map(|alt| format!("{prefix}{}{suffix}", alt.trim()))
        .collect()
}
