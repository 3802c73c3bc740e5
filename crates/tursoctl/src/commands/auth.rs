//! API token command implementations

use crate::cli::AuthCommands;
use crate::connection::CommandContext;
use crate::error::{CliError, Result};
use tracing::debug;

/// Handle auth commands
pub async fn handle_auth_command(cmd: &AuthCommands, ctx: &CommandContext) -> Result<()> {
    let mut settings = ctx.load_settings()?;

    match cmd {
        AuthCommands::SetToken { token } => {
            settings.token = Some(token.clone());
            ctx.save_settings(&settings)?;
            debug!("Token saved to {}", ctx.settings_path.display());
            println!("Token saved.");
        }
        AuthCommands::ShowToken => {
            let token = settings.resolve_token().ok_or(CliError::MissingToken)?;
            println!("{}", token);
        }
        AuthCommands::Logout => {
            if settings.token.take().is_some() {
                ctx.save_settings(&settings)?;
                println!("Logged out.");
            } else {
                println!("No stored token.");
            }
        }
    }
    Ok(())
}
