//! Interactive case browser.
//!
//! A line-oriented loop over the same controller the one-shot commands use:
//! search is debounced, filters and sorting refetch immediately, page
//! navigation respects the pagination bounds, and visible locations are
//! enriched with cached place names.

use super::context::CommandContext;
use super::output::{case_status_color, format_age, print_cell_table, print_pagination};
use anyhow::{Context, Result};
use casebook::backends::CaseBackend;
use casebook::console::{Action, ListController, MutationRequest, PlaceCache, QueryEdit};
use casebook_client::GeoClient;
use casebook_ids::{CaseId, OfficerId};
use casebook_protocol::{CasePatch, CaseRecord, CaseStatus, SortKey};
use comfy_table::Cell;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(ctx: CommandContext) -> Result<()> {
    let backend = Arc::new(CaseBackend::new(ctx.client));
    let mut controller = ListController::new(backend, Some(ctx.session));
    let places = PlaceCache::new(Arc::new(GeoClient::default()));

    controller.start();
    controller.settle().await;
    render(&controller, &places).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Commands: /<text>, status <s|->, sort <key>, order, n, p, page N, mark <id> <s>, assign <id> <officer>, del <id>, r, q");

    loop {
        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "q" {
            break;
        }
        if let Err(err) = handle(line, &mut controller).await {
            println!("error: {err:#}");
            continue;
        }
        controller.settle().await;
        render(&controller, &places).await;
    }
    Ok(())
}

async fn handle(line: &str, controller: &mut ListController<CaseRecord>) -> Result<()> {
    if let Some(term) = line.strip_prefix('/') {
        controller.apply_edit(QueryEdit::Search(term.to_string()));
        return Ok(());
    }

    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    match command {
        "status" => {
            let value = words.next().context("usage: status <open|pending|closed|->")?;
            let filter = if value == "-" {
                None
            } else {
                let status: CaseStatus = value.parse().map_err(anyhow::Error::msg)?;
                Some(status.as_str().to_string())
            };
            controller.apply_edit(QueryEdit::Status(filter));
        }
        "sort" => {
            let key: SortKey = words
                .next()
                .context("usage: sort <date|id|officer>")?
                .parse()
                .map_err(anyhow::Error::msg)?;
            controller.apply_edit(QueryEdit::SortKey(key));
        }
        "order" => {
            let toggled = controller.query().sort_order.toggled();
            controller.apply_edit(QueryEdit::SortOrder(toggled));
        }
        "n" => controller.next_page(),
        "p" => controller.prev_page(),
        "page" => {
            let page: u32 = words
                .next()
                .context("usage: page <n>")?
                .parse()
                .context("page must be a number")?;
            controller.apply_edit(QueryEdit::Page(page));
        }
        "mark" => {
            let id = CaseId::parse(words.next().context("usage: mark <id> <status>")?)?;
            let status: CaseStatus = words
                .next()
                .context("usage: mark <id> <status>")?
                .parse()
                .map_err(anyhow::Error::msg)?;
            controller
                .perform(MutationRequest::UpdateField {
                    id,
                    patch: CasePatch::Status(status),
                })
                .await?;
        }
        "assign" => {
            let id = CaseId::parse(words.next().context("usage: assign <id> <officer>")?)?;
            let officer =
                OfficerId::parse(words.next().context("usage: assign <id> <officer>")?)?;
            controller.assign(id, officer).await?;
        }
        "del" => {
            let id = CaseId::parse(words.next().context("usage: del <id>")?)?;
            if !controller.may(Action::Delete, Some(&id)) {
                anyhow::bail!("your role does not allow deleting this case");
            }
            controller.perform(MutationRequest::Delete { id }).await?;
        }
        "r" => {
            let page = controller.pagination().current;
            controller.apply_edit(QueryEdit::Page(page));
        }
        other => anyhow::bail!("unknown command: {other}"),
    }
    Ok(())
}

async fn render(controller: &ListController<CaseRecord>, places: &PlaceCache) {
    if let Some(err) = controller.error() {
        println!("fetch failed: {err}");
        return;
    }
    let mut rows = Vec::with_capacity(controller.items().len());
    for case in controller.items() {
        let place = match case.location {
            Some(point) => places.resolve(point).await,
            None => "-".to_string(),
        };
        rows.push(vec![
            Cell::new(case.id.short()),
            Cell::new(format_age(case.created_at)),
            Cell::new(&case.title),
            Cell::new(&case.case_type),
            Cell::new(place),
            Cell::new(
                case.assigned_to
                    .as_ref()
                    .map(|o| o.name.as_str())
                    .unwrap_or("Unassigned"),
            ),
            Cell::new(case.status.label()).fg(case_status_color(case.status)),
        ]);
    }
    print_cell_table(
        &[
            "Case", "Reported", "Title", "Type", "Location", "Officer", "Status",
        ],
        rows,
    );
    print_pagination(controller.items().len(), controller.pagination(), "cases");
}
