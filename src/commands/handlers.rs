use super::types::{Command, CommandResult};
use crate::protocol::{CYCLE_DISPLAY_LENGTH, ProtocolState, SourcesSummary, Tag, VppRuntime};
use crate::session::SessionHandle;

pub fn handle_command(command: &Command, session: &SessionHandle) -> CommandResult {
    match command {
        Command::Status => CommandResult::visible(describe_state(&session.snapshot())),
        Command::Tag { token } => handle_tag(token, session),
        Command::Next => {
            let cycle = session.with_mut(|rt| {
                rt.next_in_cycle();
                rt.state().cycle_index()
            });
            CommandResult::ephemeral(format!("Cycle {cycle}/{CYCLE_DISPLAY_LENGTH}"))
        }
        Command::New => {
            session.with_mut(VppRuntime::new_cycle);
            CommandResult::ephemeral("New cycle: g, 1/3")
        }
        Command::Assume { count } => match count {
            Some(count) => {
                let applied = session.with_mut(|rt| {
                    rt.set_assumptions(*count);
                    rt.state().assumptions()
                });
                CommandResult::ephemeral(format!("Assumptions: {applied}"))
            }
            None => CommandResult::ephemeral("Usage: /assume <integer>"),
        },
        Command::Locus { name } => {
            session.with_mut(|rt| rt.set_locus(name.clone()));
            match name {
                Some(name) => CommandResult::ephemeral(format!("Locus: {name}")),
                None => CommandResult::ephemeral("Locus cleared."),
            }
        }
        Command::Footer => {
            CommandResult::visible(session.with(|rt| rt.make_footer(SourcesSummary::None, None)))
        }
        Command::Reply => {
            CommandResult::ephemeral("Paste the assistant reply; finish with a line containing only '.'")
        }
        Command::Help => handle_help(),
        Command::Quit => CommandResult::ephemeral("Bye."),
    }
}

/// Validate and ingest a pasted assistant reply.
pub fn handle_reply(text: &str, session: &SessionHandle) -> CommandResult {
    let ingest = session.with_mut(|rt| rt.ingest_assistant_reply(text));

    let mut lines = Vec::new();
    if ingest.validation.is_valid {
        lines.push("Reply OK.".to_string());
    } else {
        lines.push(format!("Reply issues: {}", ingest.validation.issues.join("; ")));
    }
    if let Some(token) = &ingest.sources_token {
        lines.push(format!("Footer sources: {token}"));
    }
    if !ingest.sources.is_empty() {
        lines.push(format!(
            "Sources table: {} row(s), summary {}",
            ingest.sources.len(),
            SourcesSummary::of(&ingest.sources)
        ));
    }
    lines.push(describe_state(&session.snapshot()));
    CommandResult::ephemeral(lines.join("\n"))
}

pub fn describe_state(state: &ProtocolState) -> String {
    format!(
        "tag={} cycle={}/{CYCLE_DISPLAY_LENGTH} assumptions={} locus={}",
        state.current_tag(),
        state.cycle_index(),
        state.assumptions(),
        state.locus().unwrap_or("-"),
    )
}

fn handle_tag(token: &str, session: &SessionHandle) -> CommandResult {
    let Some(tag) = Tag::from_raw(token) else {
        return CommandResult::ephemeral(format!(
            "Unknown tag '{token}'. Expected one of: g, q, o, c, o_f, e, e_o"
        ));
    };

    let advised = session.with_mut(|rt| {
        let advised = rt.is_advised_transition(tag);
        rt.set_tag(tag);
        advised
    });
    if advised {
        CommandResult::ephemeral(format!("Tag: {tag}"))
    } else {
        CommandResult::ephemeral(format!("Tag: {tag} (outside the suggested sequence)"))
    }
}

fn handle_help() -> CommandResult {
    CommandResult::visible(
        "/status        -- Show protocol state\n\
         /tag <t>       -- Switch tag (g, q, o, c, o_f, e, e_o)\n\
         /next          -- Advance the cycle\n\
         /new           -- Start a new cycle at g\n\
         /assume <n>    -- Set the assumption count\n\
         /locus [name]  -- Set or clear the locus\n\
         /footer        -- Print the footer for the current state\n\
         /reply         -- Paste an assistant reply to validate and ingest\n\
         /quit          -- Leave the console\n\
         Any other line is printed with the current header prepended.",
    )
}
