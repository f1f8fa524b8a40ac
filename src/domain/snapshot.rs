//! 에셋별 의존성 스냅샷과 두 스냅샷 간 diff 규칙.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// 에셋 하나의 선언된 의존성과 내용 지문.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetManifest {
    pub dependencies: BTreeSet<String>,
    pub fingerprint: String,
}

/// 에셋 식별자 -> 매니페스트. BTreeMap이라 순회 순서가 항상 사전순이다.
pub type DependencySnapshot = BTreeMap<String, AssetManifest>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Added,
    Removed,
    Changed,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub asset: String,
    pub status: ChangeStatus,
    pub before: Option<BTreeSet<String>>,
    pub after: Option<BTreeSet<String>>,
    /// 의존성은 같지만 지문(version/hash)이 달라진 경우.
    pub fingerprint_changed: bool,
}

impl ChangeRecord {
    /// after에만 있는 의존성.
    pub fn added_dependencies(&self) -> Vec<&str> {
        set_difference(self.after.as_ref(), self.before.as_ref())
    }

    /// before에만 있는 의존성.
    pub fn removed_dependencies(&self) -> Vec<&str> {
        set_difference(self.before.as_ref(), self.after.as_ref())
    }
}

fn set_difference<'a>(
    left: Option<&'a BTreeSet<String>>,
    right: Option<&'a BTreeSet<String>>,
) -> Vec<&'a str> {
    let Some(left) = left else {
        return Vec::new();
    };
    left.iter()
        .filter(|dep| right.is_none_or(|r| !r.contains(*dep)))
        .map(String::as_str)
        .collect()
}

/// base -> current 방향으로 두 스냅샷을 비교한다.
/// 결과는 두 스냅샷 식별자의 합집합을 사전순으로 나열한다.
pub fn diff_snapshots(base: &DependencySnapshot, current: &DependencySnapshot) -> Vec<ChangeRecord> {
    let assets: BTreeSet<&String> = base.keys().chain(current.keys()).collect();

    assets
        .into_iter()
        .map(|asset| {
            let before = base.get(asset);
            let after = current.get(asset);
            let status = match (before, after) {
                (None, Some(_)) => ChangeStatus::Added,
                (Some(_), None) => ChangeStatus::Removed,
                (Some(b), Some(a)) if b.dependencies != a.dependencies => ChangeStatus::Changed,
                _ => ChangeStatus::Unchanged,
            };
            let fingerprint_changed = matches!(
                (before, after),
                (Some(b), Some(a)) if b.fingerprint != a.fingerprint
            );

            ChangeRecord {
                asset: asset.clone(),
                status,
                before: before.map(|m| m.dependencies.clone()),
                after: after.map(|m| m.dependencies.clone()),
                fingerprint_changed,
            }
        })
        .collect()
}

/// 의존성 변화가 하나라도 있는지.
pub fn has_changes(records: &[ChangeRecord]) -> bool {
    records.iter().any(|r| r.status != ChangeStatus::Unchanged)
}
