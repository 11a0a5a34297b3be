use anyhow::Result;

use crate::state::AppState;

/// `jobhunter health`
/// Prints the service's status object.
pub async fn run(state: &AppState) -> Result<()> {
    let body = state.client.health().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
