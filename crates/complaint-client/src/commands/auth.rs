use complaint_shared::constants::APP_NAME;

use super::settle;
use crate::forms::{
    ForgotPasswordForm, Form, LoginForm, RegisterForm, ResetPasswordForm, SubmitOutcome,
};
use crate::session::ProbeOutcome;
use crate::state::AppState;

pub async fn login(
    state: &AppState,
    identifier: String,
    password: String,
    from: Option<String>,
) -> anyhow::Result<()> {
    let mut form = LoginForm::new(from);
    form.identifier = identifier;
    form.password = password;

    let outcome = form.submit(&state.api, &state.session).await;
    let outcome = settle(&form, outcome)?;

    // wait for the staff flag so it is persisted before the process exits
    if let Some(probe) = form.take_probe() {
        if let ProbeOutcome::Applied(true) = probe.wait().await {
            println!("Staff access confirmed.");
        }
    }

    println!("{}", form.submission().message());
    if let SubmitOutcome::Navigate(nav) = outcome {
        println!("Continue at {}", nav.path);
    }
    Ok(())
}

pub fn logout(state: &AppState) -> anyhow::Result<()> {
    state.session.clear_token()?;
    println!("Signed out.");
    Ok(())
}

pub fn whoami(state: &AppState) -> anyhow::Result<()> {
    let snapshot = state.session.snapshot();
    if !snapshot.is_signed_in() {
        println!("Not signed in to {APP_NAME}.");
        return Ok(());
    }

    let who = if snapshot.display_identifier.is_empty() {
        "(unknown user)"
    } else {
        snapshot.display_identifier.as_str()
    };
    let role = if snapshot.is_admin { "staff" } else { "member" };
    println!("Signed in to {APP_NAME} as {who} ({role}).");
    println!("Server: {}", state.api.base_url());
    Ok(())
}

/// Values collected for `register`.
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub student_id: String,
    pub password: String,
    pub confirm_password: String,
    pub agree: bool,
}

pub async fn register(state: &AppState, values: Registration) -> anyhow::Result<()> {
    let mut form = RegisterForm::new(state.config.allowed_email_domains.clone());
    form.full_name = values.full_name;
    form.email = values.email;
    form.student_id = values.student_id;
    form.password = values.password;
    form.confirm_password = values.confirm_password;
    form.agreed = values.agree;

    let outcome = form.submit(&state.api, &state.session).await;
    settle(&form, outcome)?;
    println!("{}", form.submission().message());
    Ok(())
}

pub async fn forgot_password(state: &AppState, email: String) -> anyhow::Result<()> {
    let mut form = ForgotPasswordForm::new(state.config.allowed_email_domains.clone());
    form.email = email;

    let outcome = form.submit(&state.api, &state.session).await;
    if let SubmitOutcome::Display(message) = settle(&form, outcome)? {
        println!("{message}");
    }
    Ok(())
}

pub async fn reset_password(
    state: &AppState,
    token: String,
    password: String,
    confirm_password: String,
) -> anyhow::Result<()> {
    let mut form = ResetPasswordForm::new(token);
    form.password = password;
    form.confirm_password = confirm_password;

    let outcome = form.submit(&state.api, &state.session).await;
    settle(&form, outcome)?;
    println!("{}", form.submission().message());
    Ok(())
}
