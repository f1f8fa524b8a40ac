//! 리포트 코멘트 도메인 엔티티/값 객체.

/// 이전 리포트 코멘트를 식별하는 유일한 키.
pub const MARKER_TOKEN: &str = "monitor-wordpress-dependencies-action";

/// PR에 남아 있는 기존 코멘트.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueComment {
    pub id: u64,
    pub body: String,
    /// 작성자가 자동화 계정(GitHub `user.type == "Bot"`)인지.
    pub author_is_bot: bool,
}

/// 게시할 리포트 코멘트.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportComment {
    pub owner: String,
    pub repo: String,
    pub issue_number: u64,
    pub body: String,
}

/// 업서트가 어느 티어에서 끝났는지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Updated,
    Created,
    ReviewCommented,
    PrintedRaw,
    /// push 등 코멘트 대상이 없는 이벤트.
    Skipped,
}

impl UpsertOutcome {
    pub fn label(self) -> &'static str {
        match self {
            UpsertOutcome::Updated => "updated existing comment",
            UpsertOutcome::Created => "created comment",
            UpsertOutcome::ReviewCommented => "posted as review comment",
            UpsertOutcome::PrintedRaw => "printed report to log",
            UpsertOutcome::Skipped => "skipped (no pull request)",
        }
    }
}

/// 렌더러 표시 옵션.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub collapse_unchanged: bool,
    pub omit_unchanged: bool,
}
