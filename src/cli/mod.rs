use crate::protocol::{SourcesSummary, Tag};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `vpp` - Viable-Prompt Protocol console.
#[derive(Parser, Debug)]
#[command(name = "vpp")]
#[command(version)]
#[command(about = "Tag/cycle/footer discipline for LLM chat turns.", long_about = None)]
pub struct Cli {
    /// Protocol state file (default: ~/.vpp/workspace/session.json)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current protocol state
    State,

    /// Switch the current tag (g, q, o, c, o_f, e, e_o)
    Tag { tag: Tag },

    /// Advance the cycle index
    Next,

    /// Start a new cycle at tag g
    NewCycle,

    /// Set the assumption count (negative values clamp to 0)
    Assumptions {
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },

    /// Set or clear the locus
    Locus {
        name: Option<String>,

        /// Clear the locus
        #[arg(long, conflicts_with = "name")]
        clear: bool,
    },

    /// Print an outbound header, optionally followed by message text
    Header {
        /// Tag for the header (default: current tag)
        #[arg(long)]
        tag: Option<Tag>,

        #[arg(long, conflicts_with = "incorrect")]
        correct: bool,

        #[arg(long)]
        incorrect: bool,

        #[arg(long, conflicts_with = "major")]
        minor: bool,

        #[arg(long)]
        major: bool,

        /// Echo target for escape headers
        #[arg(long)]
        echo: Option<Tag>,

        /// Message text to prefix
        text: Option<String>,
    },

    /// Print the footer line for the current state
    Footer {
        /// Sources summary token (none, web, mixed)
        #[arg(long, default_value = "none")]
        sources: SourcesSummary,

        /// Explicit sources token; repeatable, overrides --sources
        #[arg(long = "token")]
        tokens: Vec<String>,
    },

    /// Ingest a footer line into the current state
    Ingest { line: String },

    /// Validate an assistant reply read from FILE or stdin
    Validate { file: Option<PathBuf> },

    /// Validate an assistant reply, ingest its footer and list its sources
    Reply { file: Option<PathBuf> },

    /// Render a sources table from `kind:ref` or `kind:ref::name` entries
    Sources {
        #[arg(required = true)]
        entries: Vec<String>,
    },

    /// Discard stored state
    Reset,

    /// Interactive console (slash commands; other lines get the current header)
    Console,
}
