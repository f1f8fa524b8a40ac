//! 마크다운 렌더링 포트 구현 어댑터.

use crate::application::ports::ReportRenderer;
use crate::domain::report::RenderOptions;
use crate::domain::snapshot::ChangeRecord;
use crate::infrastructure::render;

/// 마크다운 렌더링 어댑터.
pub struct MarkdownRendererAdapter;

impl ReportRenderer for MarkdownRendererAdapter {
    fn render(&self, records: &[ChangeRecord], options: RenderOptions) -> String {
        render::render_report_markdown(records, options)
    }
}
