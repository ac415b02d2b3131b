//! Case commands: list, create, status, assign, delete, officers.

use super::context::CommandContext;
use super::output::{case_status_color, format_age, print_cell_table, print_pagination, print_table};
use anyhow::{bail, Context, Result};
use casebook::backends::CaseBackend;
use casebook::console::{ListController, MutationRequest, PlaceCache};
use casebook_client::GeoClient;
use casebook_ids::{CaseId, OfficerId};
use casebook_protocol::{
    CaseDraft, CasePatch, CaseRecord, CaseStatus, GeoPoint, ListQuery, SortKey, SortOrder,
};
use comfy_table::Cell;
use std::sync::Arc;

#[derive(Debug)]
pub struct ListArgs {
    pub search: Option<String>,
    pub status: Option<CaseStatus>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    pub page: u32,
    pub limit: u32,
    /// Skip reverse geocoding of case locations.
    pub no_places: bool,
}

pub async fn list(ctx: CommandContext, args: ListArgs) -> Result<()> {
    let query = ListQuery {
        search: args.search,
        status: args.status.map(|s| s.as_str().to_string()),
        sort_by: args.sort_by,
        sort_order: args.sort_order,
        page: args.page,
        limit: args.limit,
        ..ListQuery::default()
    };
    let backend = Arc::new(CaseBackend::new(ctx.client));
    let mut controller = ListController::with_query(backend, Some(ctx.session), query);
    controller.start();
    controller.settle().await;

    if let Some(err) = controller.error() {
        bail!("{err}");
    }

    let places = if args.no_places {
        None
    } else {
        Some(PlaceCache::new(Arc::new(GeoClient::default())))
    };

    let mut rows = Vec::with_capacity(controller.items().len());
    for case in controller.items() {
        let place = match (&places, case.location) {
            (Some(cache), Some(point)) => cache.resolve(point).await,
            _ => "-".to_string(),
        };
        rows.push(row_for(case, place));
    }

    print_cell_table(
        &[
            "Case",
            "Reported",
            "Complainant",
            "Type",
            "Location",
            "Officer",
            "Status",
        ],
        rows,
    );
    print_pagination(controller.items().len(), controller.pagination(), "cases");
    Ok(())
}

fn row_for(case: &CaseRecord, place: String) -> Vec<Cell> {
    vec![
        Cell::new(case.id.short()),
        Cell::new(format_age(case.created_at)),
        Cell::new(case.reported_by_name.as_deref().unwrap_or("-")),
        Cell::new(&case.case_type),
        Cell::new(place),
        Cell::new(
            case.assigned_to
                .as_ref()
                .map(|o| o.name.as_str())
                .unwrap_or("Unassigned"),
        ),
        Cell::new(case.status.label()).fg(case_status_color(case.status)),
    ]
}

#[derive(Debug)]
pub struct CreateArgs {
    pub title: String,
    pub case_type: String,
    pub description: Option<String>,
    pub reported_by: Option<String>,
    /// Free-text address, resolved to coordinates via forward geocoding.
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub assign: Option<OfficerId>,
}

pub async fn create(ctx: CommandContext, args: CreateArgs) -> Result<()> {
    let location = match (args.lat, args.lng, args.address.as_deref()) {
        (Some(lat), Some(lng), _) => Some(GeoPoint { lat, lng }),
        (_, _, Some(address)) => {
            let point = GeoClient::default().forward(address).await;
            if point.is_none() {
                tracing::warn!("Could not geocode address: {address}");
            }
            point
        }
        _ => None,
    };

    let draft = CaseDraft {
        title: args.title,
        case_type: args.case_type,
        description: args.description,
        reported_by_name: args.reported_by,
        location,
        assigned_to: args.assign,
    };

    let backend = Arc::new(CaseBackend::new(ctx.client));
    let mut controller = ListController::new(backend, Some(ctx.session));
    let created = controller
        .perform(MutationRequest::Create(draft))
        .await
        .context("Failed to create case")?
        .context("Backend returned no record for the created case")?;

    println!("Created case {} ({})", created.id.short(), created.title);
    Ok(())
}

pub async fn set_status(ctx: CommandContext, id: CaseId, status: CaseStatus) -> Result<()> {
    let mut controller = loaded_controller(ctx).await?;
    let updated = controller
        .perform(MutationRequest::UpdateField {
            id,
            patch: CasePatch::Status(status),
        })
        .await
        .context("Failed to update case status")?;
    match updated {
        Some(case) => println!("Case {} is now {}", case.id.short(), case.status.label()),
        None => println!("Status updated."),
    }
    Ok(())
}

pub async fn assign(ctx: CommandContext, id: CaseId, officer: OfficerId) -> Result<()> {
    let mut controller = loaded_controller(ctx).await?;
    let updated = controller
        .assign(id, officer)
        .await
        .context("Failed to assign case")?;
    match updated.and_then(|c| c.assigned_to) {
        Some(officer) => println!("Assigned to {}", officer.name),
        None => println!("Assignment updated."),
    }
    Ok(())
}

pub async fn delete(ctx: CommandContext, id: CaseId) -> Result<()> {
    let mut controller = loaded_controller(ctx).await?;
    controller
        .perform(MutationRequest::Delete { id: id.clone() })
        .await
        .context("Failed to delete case")?;
    println!("Deleted case {}", id.short());
    Ok(())
}

pub async fn timeline(ctx: CommandContext, id: CaseId) -> Result<()> {
    let timeline = ctx
        .client
        .case_timeline(&id)
        .await
        .context("Failed to load case timeline")?;

    let case = &timeline.case;
    println!("Case {} — {}", case.id.short(), case.title);
    println!("Type:     {}", case.case_type);
    println!("Status:   {}", case.status.label());
    println!(
        "Reported: {} ({})",
        case.created_at.format("%Y-%m-%d %H:%M"),
        format_age(case.created_at)
    );
    println!();

    let rows = timeline
        .events
        .iter()
        .map(|event| {
            vec![
                event.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                event.title.clone(),
                event.actor.clone(),
                event.description.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    print_table(&["When", "Event", "By", "Details"], rows);
    println!("{} events", timeline.events.len());
    Ok(())
}

pub async fn officers(ctx: CommandContext) -> Result<()> {
    let officers = ctx
        .client
        .list_officers()
        .await
        .context("Failed to list officers")?;
    let rows = officers
        .into_iter()
        .map(|o| {
            vec![
                o.id.short(),
                o.name,
                o.email.unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    print_table(&["Id", "Name", "Email"], rows);
    Ok(())
}

/// Controller with the first page loaded, so mutations that consult record
/// authorship (deletion by a non-admin) can see the record.
async fn loaded_controller(ctx: CommandContext) -> Result<ListController<CaseRecord>> {
    let backend = Arc::new(CaseBackend::new(ctx.client));
    let mut controller = ListController::new(backend, Some(ctx.session));
    controller.start();
    controller.settle().await;
    Ok(controller)
}
