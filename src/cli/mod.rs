//! CLI entry point for Lettrics.

pub mod commands;

use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::types::ToolKind;

/// Lettrics writing tools
#[derive(Parser, Debug)]
#[command(name = "lettrics", version, about = "Lettrics writing tools CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP generation endpoints
    Serve(ServeArgs),
    /// Generate one piece of writing
    Generate(GenerateArgs),
    /// Inspect saved generations
    History(HistoryArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides LETTRICS_BIND)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Tool to run (essay, story, poem, email, thesis, application, report, paragraph, content)
    #[arg(value_parser = parse_tool)]
    pub tool: ToolKind,

    /// Subject of the piece
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Tool field as key=value, repeatable (e.g. --param style=Haiku)
    #[arg(short, long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Do not record the result in history
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommands,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List saved items, newest first
    List {
        /// Only show one tool
        #[arg(long = "type", value_parser = parse_tool)]
        tool: Option<ToolKind>,
    },
    /// Delete a saved item
    Remove {
        /// Id shown by `history list`
        id: u64,
    },
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve(args) => commands::handle_serve(args).await,
        Commands::Generate(args) => commands::handle_generate(args).await,
        Commands::History(args) => match args.command {
            HistoryCommands::List { tool } => commands::handle_history_list(tool),
            HistoryCommands::Remove { id } => commands::handle_history_remove(id),
        },
    }
}

fn parse_tool(raw: &str) -> std::result::Result<ToolKind, String> {
    ToolKind::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = ToolKind::ALL.iter().map(|tool| tool.as_str()).collect();
        format!("unknown tool '{raw}' (expected one of: {})", known.join(", "))
    })
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
