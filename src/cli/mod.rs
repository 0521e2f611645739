//! Command-line interface for the city explorer.

mod commands;

use clap::{Parser, Subcommand};

use crate::domain::Domain;

/// City Explorer - location-keyed weather, restaurants, movies, meetups and trails
#[derive(Parser)]
#[command(name = "city-explorer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Resolve a place name and print the stored location
    #[command(alias = "loc")]
    Location {
        /// Free-text place name
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Print one domain's records for a place, fetching if needed
    #[command(alias = "r")]
    Records {
        /// Record domain
        #[arg(value_enum)]
        domain: Domain,
        /// Free-text place name
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Create default config file
    #[command(alias = "init")]
    InitConfig,
}

impl Cli {
    /// Joins a multi-word positional query back into one string.
    #[must_use]
    pub fn join_query(words: &[String]) -> String {
        words.join(" ")
    }
}

pub use commands::*;
