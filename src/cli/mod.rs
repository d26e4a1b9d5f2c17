//! Command-line interface.

use clap::{Parser, Subcommand};

/// Office inventory service
/// Tracks computers and their hardware per office
#[derive(Parser, Debug)]
#[command(name = "office-inventory")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP API server (default)
    #[command(alias = "web")]
    Serve,

    /// Apply database migrations and exit
    Migrate,

    /// Insert the configured offices that do not exist yet
    SeedOffices,

    /// List all offices
    #[command(alias = "ls")]
    Offices,

    /// Create a user account.
    /// The password is read from INVENTORY_PASSWORD, or from stdin
    Register {
        username: String,
        email: String,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Serve)
    }
}
