use crate::guard::{guard, GuardDecision};
use crate::state::AppState;

/// Run the route guard for `path` and print where it leads.
pub fn open(state: &AppState, path: &str) -> anyhow::Result<()> {
    match guard(&state.session.snapshot(), path) {
        GuardDecision::Render(route) => println!("render {}", route.path()),
        GuardDecision::Redirect { to, from: Some(from) } => {
            println!("redirect {to} (return to {from} after signing in)")
        }
        GuardDecision::Redirect { to, from: None } => println!("redirect {to}"),
        GuardDecision::NotFound => println!("not found: {path}"),
    }
    Ok(())
}
