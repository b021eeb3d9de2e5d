use anyhow::bail;

use complaint_shared::constants::GENERAL_CATEGORY;
use complaint_shared::Complaint;

use super::{settle, ListFilter};
use crate::forms::{CreateComplaintForm, LookupForm, SubmitOutcome};
use crate::state::AppState;
use crate::views::{ComplaintListView, ListRow, ListSource, StatusFilter};

pub async fn submit(state: &AppState, text: String, category: String) -> anyhow::Result<()> {
    let mut form = CreateComplaintForm::new();
    form.text = text;
    form.category = category;

    let outcome = form.submit(&state.api, &state.session).await;
    let SubmitOutcome::Navigate(nav) = settle(&form, outcome)? else {
        return Ok(());
    };

    let mut view = ComplaintListView::new(ListSource::Mine).with_navigation(&nav);
    show_list(state, &mut view, 1).await
}

pub async fn list(state: &AppState, filter: &ListFilter, pages: u32) -> anyhow::Result<()> {
    let mut view = filtered_view(ListSource::Mine, filter);
    show_list(state, &mut view, pages.max(1)).await
}

pub async fn show(state: &AppState, id: String) -> anyhow::Result<()> {
    let mut form = LookupForm::new();
    form.complaint_id = id;

    let outcome = form.submit(&state.api, &state.session).await;
    if let SubmitOutcome::Display(complaint) = settle(&form, outcome)? {
        print_complaint(&complaint);
    }
    Ok(())
}

pub(crate) fn filtered_view(source: ListSource, filter: &ListFilter) -> ComplaintListView {
    let mut view = ComplaintListView::new(source);
    view.search = filter.search.clone().unwrap_or_default();
    view.status_filter = filter.status.map(StatusFilter::from).unwrap_or_default();
    view
}

pub(crate) async fn show_list(
    state: &AppState,
    view: &mut ComplaintListView,
    pages: u32,
) -> anyhow::Result<()> {
    if !view.refresh(&state.api, &state.session).await {
        bail!("{}", view.error());
    }
    for _ in 1..pages {
        if !view.has_more() {
            break;
        }
        if !view.load_more(&state.api, &state.session).await {
            bail!("{}", view.error());
        }
    }

    if let Some(flash) = view.flash() {
        println!("{flash}");
    }

    let rows = view.visible();
    if rows.is_empty() {
        println!("No complaints to show.");
    }
    for row in &rows {
        print_row(row);
    }
    if view.has_more() {
        println!("More complaints available; use --pages to load more.");
    }
    Ok(())
}

fn category_label(complaint: &Complaint) -> String {
    complaint
        .category
        .map(|c| c.to_string())
        .unwrap_or_else(|| GENERAL_CATEGORY.to_string())
}

fn print_row(row: &ListRow<'_>) {
    let c = row.complaint;
    let marker = if row.highlighted { "*" } else { " " };
    let summary: String = c.text.chars().take(60).collect();
    println!(
        "{marker} #{:<5} {:<12} {:<8} {}  {}",
        c.id,
        c.status.label(),
        category_label(c),
        c.created_at.format("%Y-%m-%d"),
        summary
    );
}

pub(crate) fn print_complaint(c: &Complaint) {
    println!("Complaint #{}", c.id);
    println!("  Status:   {}", c.status.label());
    println!("  Category: {}", category_label(c));
    println!("  Created:  {}", c.created_at.format("%Y-%m-%d %H:%M UTC"));
    println!("  Updated:  {}", c.last_updated().format("%Y-%m-%d %H:%M UTC"));
    println!();
    println!("{}", c.text);
}
