//! Evidence commands: list, add, delete.

use super::context::CommandContext;
use super::output::{format_age, print_pagination, print_table};
use anyhow::{bail, Context, Result};
use casebook::backends::EvidenceBackend;
use casebook::console::{ListController, MutationRequest};
use casebook_ids::{CaseId, EvidenceId, StatementId};
use casebook_protocol::{Evidence, EvidenceDraft, ListQuery, SortKey, SortOrder};
use std::sync::Arc;

#[derive(Debug)]
pub struct ListArgs {
    pub search: Option<String>,
    pub case: Option<CaseId>,
    pub page: u32,
    pub limit: u32,
}

pub async fn list(ctx: CommandContext, args: ListArgs) -> Result<()> {
    let query = ListQuery {
        search: args.search,
        case: args.case,
        status: None,
        sort_by: SortKey::CreatedAt,
        sort_order: SortOrder::Desc,
        page: args.page,
        limit: args.limit,
    };
    let backend = Arc::new(EvidenceBackend::new(ctx.client));
    let mut controller = ListController::with_query(backend, Some(ctx.session), query);
    controller.start();
    controller.settle().await;

    if let Some(err) = controller.error() {
        bail!("{err}");
    }

    let rows = controller
        .items()
        .iter()
        .map(|e| {
            vec![
                e.id.short(),
                e.case_id.as_ref().map(|c| c.short()).unwrap_or_default(),
                e.file_name.clone(),
                e.description.clone().unwrap_or_else(|| "-".to_string()),
                format_age(e.created_at),
            ]
        })
        .collect();
    print_table(&["Id", "Case", "File", "Description", "Added"], rows);
    print_pagination(controller.items().len(), controller.pagination(), "items");
    Ok(())
}

#[derive(Debug)]
pub struct AddArgs {
    pub case: Option<CaseId>,
    pub statement: Option<StatementId>,
    pub file_name: String,
    pub description: Option<String>,
}

pub async fn add(ctx: CommandContext, args: AddArgs) -> Result<()> {
    if args.case.is_none() && args.statement.is_none() {
        bail!("Evidence must be attached to a case or a statement");
    }
    let draft = EvidenceDraft {
        case_id: args.case,
        statement_id: args.statement,
        description: args.description,
        file_name: args.file_name,
    };
    let mut controller = controller_for(ctx, false).await?;
    let created = controller
        .perform(MutationRequest::Create(draft))
        .await
        .context("Failed to add evidence")?
        .context("Backend returned no record for the added evidence")?;
    println!("Added evidence {} ({})", created.id.short(), created.file_name);
    Ok(())
}

pub async fn delete(ctx: CommandContext, id: EvidenceId) -> Result<()> {
    let mut controller = controller_for(ctx, true).await?;
    controller
        .perform(MutationRequest::Delete { id: id.clone() })
        .await
        .context("Failed to delete evidence")?;
    println!("Deleted evidence {}", id.short());
    Ok(())
}

async fn controller_for(ctx: CommandContext, load: bool) -> Result<ListController<Evidence>> {
    let backend = Arc::new(EvidenceBackend::new(ctx.client));
    let mut controller = ListController::new(backend, Some(ctx.session));
    if load {
        controller.start();
        controller.settle().await;
    }
    Ok(controller)
}
