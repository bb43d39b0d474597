//! Command execution.

use crate::Commands;
use fsesl_client::{Client, ClientError};

/// Executes a one-shot command and returns the reply body.
pub fn execute(client: &mut Client, cmd: Commands) -> Result<String, ClientError> {
    match cmd {
        // Handled in main.rs
        Commands::Repl => unreachable!(),

        Commands::Status => client.status(),

        Commands::ShowChannels => client.show_channels(),

        Commands::ShowCalls => client.show_calls(),

        Commands::SofiaStatus { profile } => match profile {
            Some(profile) => client.sofia_status_profile(&profile),
            None => client.sofia_status(),
        },

        Commands::Api { command } => client.execute(&command.join(" ")),
    }
}
