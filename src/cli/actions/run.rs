use crate::cli::actions::{Action, assign_group, server};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Server(args) => server::execute(args).await,
        Action::AssignGroup(args) => assign_group::execute(args).await,
    }
}
