//! Report commands: list, add, status, delete.

use super::context::CommandContext;
use super::output::{format_age, print_cell_table, print_pagination, report_status_color};
use anyhow::{bail, Context, Result};
use casebook::backends::ReportBackend;
use casebook::console::{ListController, MutationRequest};
use casebook_ids::{CaseId, ReportId};
use casebook_protocol::{
    ListQuery, Report, ReportDraft, ReportPatch, ReportStatus, SortKey, SortOrder,
};
use comfy_table::Cell;
use std::sync::Arc;

#[derive(Debug)]
pub struct ListArgs {
    pub search: Option<String>,
    pub case: Option<CaseId>,
    pub status: Option<ReportStatus>,
    pub page: u32,
    pub limit: u32,
}

pub async fn list(ctx: CommandContext, args: ListArgs) -> Result<()> {
    let query = ListQuery {
        search: args.search,
        case: args.case,
        status: args.status.map(|s| s.as_str().to_string()),
        sort_by: SortKey::CreatedAt,
        sort_order: SortOrder::Desc,
        page: args.page,
        limit: args.limit,
    };
    let backend = Arc::new(ReportBackend::new(ctx.client));
    let mut controller = ListController::with_query(backend, Some(ctx.session), query);
    controller.start();
    controller.settle().await;

    if let Some(err) = controller.error() {
        bail!("{err}");
    }

    let rows = controller
        .items()
        .iter()
        .map(|r| {
            vec![
                Cell::new(r.id.short()),
                Cell::new(r.case_id.short()),
                Cell::new(&r.title),
                Cell::new(r.status.as_str()).fg(report_status_color(r.status)),
                Cell::new(format_age(r.created_at)),
            ]
        })
        .collect();
    print_cell_table(&["Id", "Case", "Title", "Status", "Written"], rows);
    print_pagination(controller.items().len(), controller.pagination(), "reports");
    Ok(())
}

#[derive(Debug)]
pub struct AddArgs {
    pub case: CaseId,
    pub title: String,
    pub description: Option<String>,
}

pub async fn add(ctx: CommandContext, args: AddArgs) -> Result<()> {
    let draft = ReportDraft {
        case_id: args.case,
        title: args.title,
        description: args.description,
    };
    let mut controller = controller_for(ctx, false).await?;
    let created = controller
        .perform(MutationRequest::Create(draft))
        .await
        .context("Failed to create report")?
        .context("Backend returned no record for the created report")?;
    println!("Created report {} ({})", created.id.short(), created.title);
    Ok(())
}

#[derive(Debug)]
pub struct EditArgs {
    pub title: Option<String>,
    pub description: Option<String>,
}

pub async fn edit(ctx: CommandContext, id: ReportId, args: EditArgs) -> Result<()> {
    if args.title.is_none() && args.description.is_none() {
        bail!("Nothing to change; pass --title and/or --description");
    }
    let mut controller = controller_for(ctx, true).await?;
    if let Some(title) = args.title {
        controller
            .perform(MutationRequest::UpdateField {
                id: id.clone(),
                patch: ReportPatch::Title(title),
            })
            .await
            .context("Failed to update report title")?;
    }
    if let Some(description) = args.description {
        controller
            .perform(MutationRequest::UpdateField {
                id: id.clone(),
                patch: ReportPatch::Description(description),
            })
            .await
            .context("Failed to update report description")?;
    }
    println!("Report {} updated", id.short());
    Ok(())
}

pub async fn set_status(ctx: CommandContext, id: ReportId, status: ReportStatus) -> Result<()> {
    let mut controller = controller_for(ctx, true).await?;
    controller
        .perform(MutationRequest::UpdateField {
            id: id.clone(),
            patch: ReportPatch::Status(status),
        })
        .await
        .context("Failed to update report status")?;
    println!("Report {} marked {}", id.short(), status);
    Ok(())
}

pub async fn delete(ctx: CommandContext, id: ReportId) -> Result<()> {
    let mut controller = controller_for(ctx, true).await?;
    controller
        .perform(MutationRequest::Delete { id: id.clone() })
        .await
        .context("Failed to delete report")?;
    println!("Deleted report {}", id.short());
    Ok(())
}

async fn controller_for(ctx: CommandContext, load: bool) -> Result<ListController<Report>> {
    let backend = Arc::new(ReportBackend::new(ctx.client));
    let mut controller = ListController::new(backend, Some(ctx.session));
    if load {
        controller.start();
        controller.settle().await;
    }
    Ok(controller)
}
