//! Statement commands: list, add, status, delete.

use super::context::CommandContext;
use super::output::{format_age, print_cell_table, print_pagination, statement_status_color};
use anyhow::{bail, Context, Result};
use casebook::backends::StatementBackend;
use casebook::console::{ListController, MutationRequest};
use casebook_ids::{CaseId, StatementId};
use casebook_protocol::{
    ListQuery, SortKey, SortOrder, Statement, StatementDraft, StatementKind, StatementPatch,
    StatementStatus,
};
use comfy_table::Cell;
use std::sync::Arc;

#[derive(Debug)]
pub struct ListArgs {
    pub search: Option<String>,
    pub case: Option<CaseId>,
    pub status: Option<StatementStatus>,
    pub sort_order: SortOrder,
    pub page: u32,
    pub limit: u32,
}

pub async fn list(ctx: CommandContext, args: ListArgs) -> Result<()> {
    let query = ListQuery {
        search: args.search,
        case: args.case,
        status: args.status.map(|s| s.as_str().to_string()),
        sort_by: SortKey::CreatedAt,
        sort_order: args.sort_order,
        page: args.page,
        limit: args.limit,
    };
    let backend = Arc::new(StatementBackend::new(ctx.client));
    let mut controller = ListController::with_query(backend, Some(ctx.session), query);
    controller.start();
    controller.settle().await;

    if let Some(err) = controller.error() {
        bail!("{err}");
    }

    let rows = controller
        .items()
        .iter()
        .map(|s| {
            let status = match s.status {
                Some(st) => Cell::new(st.as_str()).fg(statement_status_color(st)),
                None => Cell::new("-"),
            };
            vec![
                Cell::new(s.id.short()),
                Cell::new(s.case_id.short()),
                Cell::new(&s.person_name),
                Cell::new(s.kind.to_string()),
                Cell::new(truncate(&s.narrative, 48)),
                status,
                Cell::new(format_age(s.created_at)),
            ]
        })
        .collect();
    print_cell_table(
        &["Id", "Case", "Person", "Kind", "Narrative", "Status", "Taken"],
        rows,
    );
    print_pagination(
        controller.items().len(),
        controller.pagination(),
        "statements",
    );
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}\u{2026}")
}

#[derive(Debug)]
pub struct AddArgs {
    pub case: CaseId,
    pub person: String,
    pub kind: StatementKind,
    pub officer: Option<String>,
    pub narrative: String,
}

pub async fn add(ctx: CommandContext, args: AddArgs) -> Result<()> {
    let draft = StatementDraft {
        case_id: args.case,
        person_name: args.person,
        kind: args.kind,
        officer: args.officer,
        narrative: args.narrative,
    };
    let mut controller = controller_for(ctx, false).await?;
    let created = controller
        .perform(MutationRequest::Create(draft))
        .await
        .context("Failed to record statement")?
        .context("Backend returned no record for the created statement")?;
    println!(
        "Recorded {} statement {} from {}",
        created.kind,
        created.id.short(),
        created.person_name
    );
    Ok(())
}

pub async fn edit(ctx: CommandContext, id: StatementId, narrative: String) -> Result<()> {
    let mut controller = controller_for(ctx, true).await?;
    controller
        .perform(MutationRequest::UpdateField {
            id: id.clone(),
            patch: StatementPatch::Narrative(narrative),
        })
        .await
        .context("Failed to update statement narrative")?;
    println!("Statement {} narrative updated", id.short());
    Ok(())
}

pub async fn set_status(
    ctx: CommandContext,
    id: StatementId,
    status: StatementStatus,
) -> Result<()> {
    let mut controller = controller_for(ctx, true).await?;
    controller
        .perform(MutationRequest::UpdateField {
            id: id.clone(),
            patch: StatementPatch::Status(status),
        })
        .await
        .context("Failed to update statement status")?;
    println!("Statement {} marked {}", id.short(), status);
    Ok(())
}

pub async fn delete(ctx: CommandContext, id: StatementId) -> Result<()> {
    let mut controller = controller_for(ctx, true).await?;
    controller
        .perform(MutationRequest::Delete { id: id.clone() })
        .await
        .context("Failed to delete statement")?;
    println!("Deleted statement {}", id.short());
    Ok(())
}

async fn controller_for(ctx: CommandContext, load: bool) -> Result<ListController<Statement>> {
    let backend = Arc::new(StatementBackend::new(ctx.client));
    let mut controller = ListController::new(backend, Some(ctx.session));
    if load {
        controller.start();
        controller.settle().await;
    }
    Ok(controller)
}
