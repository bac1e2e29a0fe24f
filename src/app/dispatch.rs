use crate::cli::{Cli, Commands};
use crate::commands::describe_state;
use crate::config::Config;
use crate::protocol::{
    Correctness, Modifiers, Severity, SourceKind, SourceRef, SourcesSummary, VppRuntime,
    compose_outbound, format_sources_table,
};
use crate::session::{FileStateStore, SessionHandle, StateStore};
use anyhow::{Context, Result, anyhow, bail};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::info;

/// Result of one non-interactive command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// State changed and should be written back.
    pub mutated: bool,
    pub success: bool,
}

impl Outcome {
    const READ: Self = Self {
        mutated: false,
        success: true,
    };
    const WRITE: Self = Self {
        mutated: true,
        success: true,
    };
}

pub fn dispatch(cli: Cli, config: &Config) -> Result<ExitCode> {
    let state_path = cli.state.unwrap_or_else(|| config.state_path());
    let store = FileStateStore::new(&state_path);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if matches!(cli.command, Commands::Reset) {
        let removed = store.clear().context("Failed to clear protocol state")?;
        if removed {
            writeln!(out, "State cleared: {}", state_path.display())?;
        } else {
            writeln!(out, "No stored state at {}", state_path.display())?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let session = SessionHandle::restore(&store, &config.protocol)
        .with_context(|| format!("Failed to load protocol state: {}", state_path.display()))?;

    let outcome = if matches!(cli.command, Commands::Console) {
        info!(state = %state_path.display(), "vpp.console.start");
        crate::app::run_console(&session, io::stdin().lock(), &mut out)?;
        Outcome::WRITE
    } else {
        execute(cli.command, &session, &mut io::stdin(), &mut out)?
    };

    if outcome.mutated {
        session
            .persist(&store)
            .with_context(|| format!("Failed to save protocol state: {}", state_path.display()))?;
    }

    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run one command against `session`. `input` backs the commands that read a
/// reply from stdin.
#[allow(clippy::too_many_lines)]
pub fn execute(
    command: Commands,
    session: &SessionHandle,
    input: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<Outcome> {
    match command {
        Commands::State => {
            writeln!(out, "{}", describe_state(&session.snapshot()))?;
            let advice = session.with(|rt| {
                rt.allowed_next_tags()
                    .iter()
                    .map(|tag| tag.raw())
                    .collect::<Vec<_>>()
                    .join(", ")
            });
            writeln!(out, "suggested next: {advice}")?;
            Ok(Outcome::READ)
        }

        Commands::Tag { tag } => {
            let advised = session.with_mut(|rt| {
                let advised = rt.is_advised_transition(tag);
                rt.set_tag(tag);
                advised
            });
            if !advised {
                writeln!(out, "note: {tag} is outside the suggested sequence")?;
            }
            writeln!(out, "{}", describe_state(&session.snapshot()))?;
            Ok(Outcome::WRITE)
        }

        Commands::Next => {
            session.with_mut(VppRuntime::next_in_cycle);
            writeln!(out, "{}", describe_state(&session.snapshot()))?;
            Ok(Outcome::WRITE)
        }

        Commands::NewCycle => {
            session.with_mut(VppRuntime::new_cycle);
            writeln!(out, "{}", describe_state(&session.snapshot()))?;
            Ok(Outcome::WRITE)
        }

        Commands::Assumptions { count } => {
            session.with_mut(|rt| rt.set_assumptions(count));
            writeln!(out, "{}", describe_state(&session.snapshot()))?;
            Ok(Outcome::WRITE)
        }

        Commands::Locus { name, clear } => {
            let locus = if clear { None } else { name };
            session.with_mut(|rt| rt.set_locus(locus));
            writeln!(out, "{}", describe_state(&session.snapshot()))?;
            Ok(Outcome::WRITE)
        }

        Commands::Header {
            tag,
            correct,
            incorrect,
            minor,
            major,
            echo,
            text,
        } => {
            let correctness = if correct {
                Correctness::Correct
            } else if incorrect {
                Correctness::Incorrect
            } else {
                Correctness::Neutral
            };
            let severity = if minor {
                Severity::Minor
            } else if major {
                Severity::Major
            } else {
                Severity::None
            };
            let modifiers = Modifiers::new(correctness, severity, echo);
            let tag = tag.unwrap_or_else(|| session.snapshot().current_tag());
            writeln!(
                out,
                "{}",
                compose_outbound(tag, &modifiers, text.as_deref().unwrap_or_default())
            )?;
            Ok(Outcome::READ)
        }

        Commands::Footer { sources, tokens } => {
            let line = session.with(|rt| rt.make_footer(sources, Some(tokens.as_slice())));
            writeln!(out, "{line}")?;
            Ok(Outcome::READ)
        }

        Commands::Ingest { line } => {
            session.with_mut(|rt| rt.ingest_footer_line(&line));
            writeln!(out, "{}", describe_state(&session.snapshot()))?;
            Ok(Outcome::WRITE)
        }

        Commands::Validate { file } => {
            let text = read_text(file.as_deref(), input)?;
            let result = session.with(|rt| rt.validate_assistant_reply(&text));
            if result.is_valid {
                writeln!(out, "valid")?;
            } else {
                for issue in &result.issues {
                    writeln!(out, "issue: {issue}")?;
                }
            }
            Ok(Outcome {
                mutated: false,
                success: result.is_valid,
            })
        }

        Commands::Reply { file } => {
            let text = read_text(file.as_deref(), input)?;
            let ingest = session.with_mut(|rt| rt.ingest_assistant_reply(&text));
            if ingest.validation.is_valid {
                writeln!(out, "valid")?;
            }
            for issue in &ingest.validation.issues {
                writeln!(out, "issue: {issue}")?;
            }
            if let Some(token) = &ingest.sources_token {
                writeln!(out, "footer sources: {token}")?;
            }
            for source in &ingest.sources {
                writeln!(
                    out,
                    "source: {} {}{}",
                    source.kind,
                    source.reference,
                    source
                        .display_name
                        .as_deref()
                        .map(|name| format!(" ({name})"))
                        .unwrap_or_default()
                )?;
            }
            writeln!(out, "{}", describe_state(&session.snapshot()))?;
            Ok(Outcome {
                mutated: ingest.footer_ingested,
                success: ingest.validation.is_valid,
            })
        }

        Commands::Sources { entries } => {
            let sources = entries
                .iter()
                .map(|entry| parse_source_entry(entry))
                .collect::<Result<Vec<_>>>()?;
            writeln!(out, "{}", format_sources_table(&sources))?;
            writeln!(out, "summary: {}", SourcesSummary::of(&sources))?;
            Ok(Outcome::READ)
        }

        Commands::Reset | Commands::Console => {
            bail!("reset and console are handled by dispatch")
        }
    }
}

/// Parse `kind:ref` or `kind:ref::name`.
pub fn parse_source_entry(entry: &str) -> Result<SourceRef> {
    let (kind, rest) = entry
        .split_once(':')
        .ok_or_else(|| anyhow!("expected kind:ref, got '{entry}'"))?;
    let kind: SourceKind = kind
        .trim()
        .parse()
        .map_err(|_| anyhow!("unknown source kind '{kind}' (web, repo, file, ssh)"))?;

    let (reference, name) = match rest.rsplit_once("::") {
        Some((reference, name)) => (reference, Some(name.trim().to_string())),
        None => (rest, None),
    };
    let reference = reference.trim();
    if reference.is_empty() {
        bail!("empty reference in '{entry}'");
    }
    Ok(SourceRef::new(
        kind,
        reference,
        name.filter(|name| !name.is_empty()),
    ))
}

fn read_text(file: Option<&Path>, input: &mut dyn Read) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read reply file: {}", path.display())),
        None => {
            let mut text = String::new();
            input
                .read_to_string(&mut text)
                .context("Failed to read reply from stdin")?;
            Ok(text)
        }
    }
}
