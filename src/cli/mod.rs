//! CLI module for httpcallback

pub mod serve;

use clap::{Parser, Subcommand};

/// httpcallback - register HTTP callbacks over a pluggable data store
#[derive(Parser)]
#[command(name = "httpcallback")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve(serve::ServeArgs),
}
