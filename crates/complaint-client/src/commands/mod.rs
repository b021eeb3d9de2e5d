//! Command-line surface.
//!
//! Each subcommand drives one form controller or view against the shared
//! [`AppState`]. User-facing output goes to stdout; logs go to stderr.

pub mod admin;
pub mod auth;
pub mod complaints;
pub mod feedback;
pub mod open;

use anyhow::bail;
use clap::{Subcommand, ValueEnum};
use tracing::debug;

use complaint_shared::StatusGroup;

use crate::forms::{Form, SubmitOutcome, SubmitStatus};
use crate::state::AppState;
use crate::views::StatusFilter;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with an email or university ID.
    Login {
        identifier: String,
        #[arg(long, env = "COMPLAINT_PASSWORD", hide_env_values = true)]
        password: String,
        /// Page to return to after signing in.
        #[arg(long)]
        from: Option<String>,
    },
    /// Sign out and forget the stored session.
    Logout,
    /// Show the current session.
    Whoami,
    /// Create an account with a university email.
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        student_id: Option<String>,
        #[arg(long, env = "COMPLAINT_PASSWORD", hide_env_values = true)]
        password: String,
        /// Defaults to the password.
        #[arg(long)]
        confirm_password: Option<String>,
        /// Accept the terms of use.
        #[arg(long)]
        agree: bool,
    },
    /// Ask for a password reset link.
    ForgotPassword { email: String },
    /// Set a new password with the token from a reset link.
    ResetPassword {
        #[arg(long)]
        token: String,
        #[arg(long, env = "COMPLAINT_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// File a new complaint.
    Submit {
        text: String,
        /// Category id; omit for general.
        #[arg(long)]
        category: Option<String>,
    },
    /// List your complaints.
    List {
        #[command(flatten)]
        filter: ListFilter,
        /// Number of pages to fetch.
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Show one complaint.
    Show { id: String },
    /// Staff: list every complaint.
    Queue {
        #[command(flatten)]
        filter: ListFilter,
    },
    /// Staff: change a complaint's status.
    Status { id: String, status: String },
    /// Staff: respond to a complaint.
    Respond { id: String, text: String },
    /// Send feedback about a resolved complaint.
    Feedback {
        id: String,
        comment: String,
        #[arg(long)]
        accepted: Option<bool>,
    },
    /// Check whether a page may be opened with the current session.
    Open { path: String },
}

impl Command {
    /// Commands whose outcome depends on the staff flag.
    fn needs_staff_flag(&self) -> bool {
        matches!(
            self,
            Self::Whoami | Self::Queue { .. } | Self::Status { .. } | Self::Respond { .. } | Self::Open { .. }
        )
    }
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListFilter {
    /// Case-insensitive match on id, category or text.
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Submitted,
    InReview,
    InProgress,
    Resolved,
    Rejected,
}

impl From<StatusArg> for StatusFilter {
    fn from(value: StatusArg) -> Self {
        let group = match value {
            StatusArg::Submitted => StatusGroup::Submitted,
            StatusArg::InReview => StatusGroup::InReview,
            StatusArg::InProgress => StatusGroup::InProgress,
            StatusArg::Resolved => StatusGroup::Resolved,
            StatusArg::Rejected => StatusGroup::Rejected,
        };
        StatusFilter::Group(group)
    }
}

pub async fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    if command.needs_staff_flag() {
        if let Some(probe) = state.refresh_staff_flag() {
            let outcome = probe.wait().await;
            debug!(?outcome, "Staff flag refreshed");
        }
    }

    match command {
        Command::Login {
            identifier,
            password,
            from,
        } => auth::login(state, identifier, password, from).await,
        Command::Logout => auth::logout(state),
        Command::Whoami => auth::whoami(state),
        Command::Register {
            full_name,
            email,
            student_id,
            password,
            confirm_password,
            agree,
        } => {
            let confirm_password = confirm_password.unwrap_or_else(|| password.clone());
            let form = auth::Registration {
                full_name,
                email,
                student_id: student_id.unwrap_or_default(),
                password,
                confirm_password,
                agree,
            };
            auth::register(state, form).await
        }
        Command::ForgotPassword { email } => auth::forgot_password(state, email).await,
        Command::ResetPassword {
            token,
            password,
            confirm_password,
        } => {
            let confirm_password = confirm_password.unwrap_or_else(|| password.clone());
            auth::reset_password(state, token, password, confirm_password).await
        }
        Command::Submit { text, category } => {
            complaints::submit(state, text, category.unwrap_or_default()).await
        }
        Command::List { filter, pages } => complaints::list(state, &filter, pages).await,
        Command::Show { id } => complaints::show(state, id).await,
        Command::Queue { filter } => admin::queue(state, &filter).await,
        Command::Status { id, status } => admin::update_status(state, id, status).await,
        Command::Respond { id, text } => admin::respond(state, id, text).await,
        Command::Feedback {
            id,
            comment,
            accepted,
        } => feedback::send(state, id, comment, accepted).await,
        Command::Open { path } => open::open(state, &path),
    }
}

/// Turn a blocked or failed submit into an error carrying the message the
/// form would show.
pub(crate) fn settle<F: Form, D>(form: &F, outcome: SubmitOutcome<D>) -> anyhow::Result<SubmitOutcome<D>> {
    match outcome {
        SubmitOutcome::Blocked => {
            let submission = form.submission();
            if submission.status() == SubmitStatus::Error && !submission.message().is_empty() {
                bail!("{}", submission.message());
            }
            match form.first_error() {
                Some(message) => bail!("{message}"),
                None => bail!("Submission was blocked."),
            }
        }
        SubmitOutcome::Failed { status } => {
            debug!(status, "Submission failed");
            bail!("{}", form.submission().message())
        }
        other => Ok(other),
    }
}
