use anyhow::bail;

use super::complaints::{filtered_view, show_list};
use super::{settle, ListFilter};
use crate::forms::{Form, RespondForm, StatusForm, STAFF_REQUIRED};
use crate::state::AppState;
use crate::views::ListSource;

pub async fn queue(state: &AppState, filter: &ListFilter) -> anyhow::Result<()> {
    if !state.session.is_admin() {
        bail!("{STAFF_REQUIRED}");
    }
    let mut view = filtered_view(ListSource::Queue, filter);
    show_list(state, &mut view, 1).await
}

pub async fn update_status(state: &AppState, id: String, status: String) -> anyhow::Result<()> {
    let mut form = StatusForm::new();
    form.complaint_id = id;
    form.status = status;

    let outcome = form.submit(&state.api, &state.session).await;
    settle(&form, outcome)?;
    println!("{}", form.submission().message());
    Ok(())
}

pub async fn respond(state: &AppState, id: String, text: String) -> anyhow::Result<()> {
    let mut form = RespondForm::new();
    form.complaint_id = id;
    form.response_text = text;

    let outcome = form.submit(&state.api, &state.session).await;
    settle(&form, outcome)?;
    println!("{}", form.submission().message());
    Ok(())
}
