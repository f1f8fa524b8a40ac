//! 리포트 코멘트 업서트 단계.
//!
//! 검색 -> 수정 -> 생성 -> 리뷰 코멘트 -> 로그 출력 순서의 티어를 따르며,
//! 어떤 티어의 실패도 실행 실패로 올리지 않는다.

use anyhow::{Context, Result};

use crate::application::ports::CommentGateway;
use crate::application::usecases::compare_deps::{
    CompareDependenciesUseCase, context::ExecutionContext,
};
use crate::domain::policy::find_report_comment;
use crate::domain::report::{ReportComment, UpsertOutcome};

/// 게시 시도 티어.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PublishTier {
    Update(u64),
    Create,
    ReviewComment,
}

impl PublishTier {
    fn outcome(self) -> UpsertOutcome {
        match self {
            PublishTier::Update(_) => UpsertOutcome::Updated,
            PublishTier::Create => UpsertOutcome::Created,
            PublishTier::ReviewComment => UpsertOutcome::ReviewCommented,
        }
    }

    fn label(self) -> &'static str {
        match self {
            PublishTier::Update(_) => "update comment",
            PublishTier::Create => "create comment",
            PublishTier::ReviewComment => "create review comment",
        }
    }
}

/// 실행 컨텍스트를 보고 게시 대상/게이트웨이를 정한 뒤 업서트한다.
pub(super) async fn publish_report(
    use_case: &CompareDependenciesUseCase<'_>,
    ctx: &ExecutionContext,
    body: &str,
) -> UpsertOutcome {
    let Some(issue_number) = ctx.trigger.event.pull_number() else {
        use_case
            .reporter
            .status("Report", "not a pull request event; nothing to comment on");
        return UpsertOutcome::Skipped;
    };

    if ctx.settings.dry_run {
        use_case.reporter.section("Dry Run: Report");
        use_case.reporter.raw(body);
        return UpsertOutcome::PrintedRaw;
    }

    let Some(repository) = &ctx.trigger.repository else {
        tracing::warn!("repository is unknown; cannot post comment");
        return print_raw(use_case, body);
    };

    let report = ReportComment {
        owner: repository.owner.clone(),
        repo: repository.repo.clone(),
        issue_number,
        body: body.to_string(),
    };

    let gateway = match build_gateway(use_case, ctx) {
        Ok(gateway) => gateway,
        Err(err) => {
            tracing::warn!("comment client unavailable: {err:#}");
            return print_raw(use_case, body);
        }
    };

    upsert(use_case, gateway.as_ref(), &report).await
}

fn build_gateway(
    use_case: &CompareDependenciesUseCase<'_>,
    ctx: &ExecutionContext,
) -> Result<Box<dyn CommentGateway>> {
    let repository = ctx
        .trigger
        .repository
        .as_ref()
        .context("repository is unknown")?;
    let token = use_case
        .token_resolver
        .resolve(&ctx.config)
        .with_context(|| {
            format!(
                "missing repo token. Set repo-token or the {} environment variable",
                ctx.config.token_env()
            )
        })?;
    use_case
        .gateway_factory
        .build(repository, &ctx.config, token)
}

/// 티어 순서대로 시도하고, 모두 실패하면 본문을 로그로 출력한다.
pub(super) async fn upsert(
    use_case: &CompareDependenciesUseCase<'_>,
    gateway: &dyn CommentGateway,
    report: &ReportComment,
) -> UpsertOutcome {
    let existing = match gateway.list_comments(report.issue_number).await {
        Ok(comments) => find_report_comment(&comments).map(|c| c.id),
        Err(err) => {
            tracing::warn!("failed to list comments: {err:#}");
            None
        }
    };

    let mut tiers = Vec::with_capacity(3);
    if let Some(id) = existing {
        tiers.push(PublishTier::Update(id));
    }
    tiers.push(PublishTier::Create);
    tiers.push(PublishTier::ReviewComment);

    for tier in tiers {
        use_case.reporter.status("Report", tier.label());
        match attempt(gateway, tier, report).await {
            Ok(()) => return tier.outcome(),
            Err(err) => {
                tracing::warn!("{} failed: {err:#}", tier.label());
                use_case
                    .reporter
                    .status("Report", &format!("{} failed: {err}", tier.label()));
            }
        }
    }

    print_raw(use_case, &report.body)
}

async fn attempt(gateway: &dyn CommentGateway, tier: PublishTier, report: &ReportComment) -> Result<()> {
    match tier {
        PublishTier::Update(id) => gateway.update_comment(id, &report.body).await,
        PublishTier::Create => gateway.create_comment(report.issue_number, &report.body).await,
        PublishTier::ReviewComment => {
            gateway
                .create_review_comment(report.issue_number, &report.body)
                .await
        }
    }
}

fn print_raw(use_case: &CompareDependenciesUseCase<'_>, body: &str) -> UpsertOutcome {
    use_case.reporter.section("Report (copy manually)");
    use_case.reporter.raw(body);
    UpsertOutcome::PrintedRaw
}
