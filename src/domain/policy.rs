//! 도메인 정책(리포트 코멘트 식별 규칙).

use crate::domain::report::{IssueComment, MARKER_TOKEN};

/// 본문에 심는 마커 문자열.
pub fn report_marker() -> String {
    format!("<!-- {MARKER_TOKEN} -->")
}

/// 자동화 계정이 작성했고 마커를 포함한 코멘트 중 가장 최신 것을 찾는다.
/// 목록은 API가 돌려준 순서(오래된 것 먼저)라고 가정하고 뒤에서부터 훑는다.
pub fn find_report_comment(comments: &[IssueComment]) -> Option<&IssueComment> {
    comments
        .iter()
        .rev()
        .find(|c| c.author_is_bot && c.body.contains(MARKER_TOKEN))
}
