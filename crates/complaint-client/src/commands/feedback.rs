use super::settle;
use crate::forms::{FeedbackForm, Form};
use crate::state::AppState;

pub async fn send(
    state: &AppState,
    id: String,
    comment: String,
    accepted: Option<bool>,
) -> anyhow::Result<()> {
    let mut form = FeedbackForm::new();
    form.set_complaint_id(id);
    form.comment = comment;
    form.is_accepted = accepted;

    let outcome = form.submit(&state.api, &state.session).await;
    settle(&form, outcome)?;
    println!("{}", form.submission().message());
    Ok(())
}
