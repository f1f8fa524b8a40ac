//! PR 코멘트용 Markdown 렌더링 모듈.

use crate::domain::policy::report_marker;
use crate::domain::report::RenderOptions;
use crate::domain::snapshot::{ChangeRecord, ChangeStatus, has_changes};

const HEADING: &str = "# Dependency Changes";

/// 비교 결과 전체를 리포트 코멘트 본문으로 렌더링한다.
/// 본문 첫 줄은 항상 업서트 식별용 마커다.
pub fn render_report_markdown(records: &[ChangeRecord], options: RenderOptions) -> String {
    let mut out = String::new();
    out.push_str(&report_marker());
    out.push_str("\n\n");
    out.push_str(HEADING);
    out.push_str("\n\n");

    if !has_changes(records) {
        out.push_str("No dependency changes detected.\n");
    } else {
        for record in records.iter().filter(|r| r.status != ChangeStatus::Unchanged) {
            out.push_str(&render_changed_asset(record));
            out.push('\n');
        }
    }

    if !options.omit_unchanged {
        let unchanged: Vec<&ChangeRecord> = records
            .iter()
            .filter(|r| r.status == ChangeStatus::Unchanged)
            .collect();
        if !unchanged.is_empty() {
            out.push('\n');
            out.push_str(&render_unchanged(&unchanged, options.collapse_unchanged));
        }
    }

    out
}

/// 변경된 에셋 하나의 섹션(제목 + 의존성 변화 표).
pub fn render_changed_asset(record: &ChangeRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "## `{}` ({})\n\n",
        record.asset,
        status_label(record.status)
    ));

    let added = record.added_dependencies();
    let removed = record.removed_dependencies();
    if added.is_empty() && removed.is_empty() {
        out.push_str("_No dependencies declared._\n");
        return out;
    }

    out.push_str("| Dependency | Change |\n");
    out.push_str("|---|---|\n");
    for dep in added {
        out.push_str(&format!("| `{dep}` | Added |\n"));
    }
    for dep in removed {
        out.push_str(&format!("| `{dep}` | Removed |\n"));
    }
    out
}

fn render_unchanged(unchanged: &[&ChangeRecord], collapse: bool) -> String {
    let list: String = unchanged
        .iter()
        .map(|r| {
            if r.fingerprint_changed {
                format!("- `{}` (content changed)\n", r.asset)
            } else {
                format!("- `{}`\n", r.asset)
            }
        })
        .collect();

    if collapse {
        format!(
            "<details>\n<summary>{} unchanged {}</summary>\n\n{}\n</details>\n",
            unchanged.len(),
            if unchanged.len() == 1 { "asset" } else { "assets" },
            list
        )
    } else {
        format!("## Unchanged\n\n{list}")
    }
}

fn status_label(status: ChangeStatus) -> &'static str {
    match status {
        ChangeStatus::Added => "added",
        ChangeStatus::Removed => "removed",
        ChangeStatus::Changed => "changed",
        ChangeStatus::Unchanged => "unchanged",
    }
}
