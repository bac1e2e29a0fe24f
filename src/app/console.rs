use crate::commands::{Command, CommandResult, handle_command, handle_reply, parse_command};
use crate::protocol::Modifiers;
use crate::session::SessionHandle;
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

const REPLY_TERMINATOR: &str = ".";

/// Line-oriented console over one session.
///
/// Slash commands drive the runtime; any other non-blank line is echoed back
/// with the header for the current tag. Ends on `/quit` or end of input.
pub fn run_console(
    session: &SessionHandle,
    input: impl BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let mut lines = input.lines();
    writeln!(out, "# VPP console. Type /help for commands.")?;

    while let Some(line) = lines.next() {
        let line = line?;
        let Some(command) = parse_command(&line) else {
            if line.trim().is_empty() {
                continue;
            }
            if line.trim_start().starts_with('/') {
                write_result(
                    out,
                    &CommandResult::ephemeral("Unknown command. Type /help for commands."),
                )?;
                continue;
            }
            let outbound = session.with(|rt| rt.compose_outbound(&line, &Modifiers::default()));
            writeln!(out, "{outbound}")?;
            continue;
        };

        debug!(command = ?command, "vpp.console.command");
        match command {
            Command::Quit => {
                write_result(out, &handle_command(&command, session))?;
                break;
            }
            Command::Reply => {
                write_result(out, &handle_command(&command, session))?;
                let mut reply = Vec::new();
                for line in lines.by_ref() {
                    let line = line?;
                    if line.trim() == REPLY_TERMINATOR {
                        break;
                    }
                    reply.push(line);
                }
                write_result(out, &handle_reply(&reply.join("\n"), session))?;
            }
            _ => write_result(out, &handle_command(&command, session))?,
        }
    }

    out.flush()?;
    Ok(())
}

// Ephemeral output is marked so it is never mistaken for a message body.
fn write_result(out: &mut dyn Write, result: &CommandResult) -> Result<()> {
    if result.ephemeral {
        for line in result.text.lines() {
            writeln!(out, "# {line}")?;
        }
    } else {
        writeln!(out, "{}", result.text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Tag;

    fn drive(session: &SessionHandle, script: &str) -> String {
        let mut out = Vec::new();
        run_console(session, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_lines_get_current_header() {
        let session = SessionHandle::default();
        let out = drive(&session, "/tag q\nWhat changed?\n");
        assert!(out.contains("# Tag: q\n"));
        assert!(out.contains("!<q>\nWhat changed?\n"));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let session = SessionHandle::default();
        let out = drive(&session, "\n   \n");
        assert_eq!(out, "# VPP console. Type /help for commands.\n");
    }

    #[test]
    fn quit_stops_reading() {
        let session = SessionHandle::default();
        let out = drive(&session, "/quit\n/tag c\n");
        assert!(out.ends_with("# Bye.\n"));
        assert_eq!(session.snapshot().current_tag(), Tag::G);
    }

    #[test]
    fn unknown_slash_command() {
        let session = SessionHandle::default();
        let out = drive(&session, "/frobnicate\n");
        assert!(out.contains("# Unknown command."));
        assert!(!out.contains("!<g>"));
    }

    #[test]
    fn reply_block_is_ingested() {
        let session = SessionHandle::default();
        let script = "/reply\n\
                      <c>\n\
                      Confirmed.\n\
                      [Version=v1.4 | Tag=<c_2> | Sources=<none> | Assumptions=1 | Cycle=2/3 | Locus=Review]\n\
                      .\n\
                      /status\n";
        let out = drive(&session, script);
        assert!(out.contains("# Reply OK.\n"));
        assert!(out.contains("# Footer sources: none\n"));
        assert!(out.ends_with("tag=c cycle=2/3 assumptions=0 locus=Review\n"));
        assert_eq!(session.snapshot().current_tag(), Tag::C);
    }

    #[test]
    fn unterminated_reply_still_ingested_at_eof() {
        let session = SessionHandle::default();
        let out = drive(&session, "/reply\nno tag line");
        assert!(out.contains("# Reply issues: Missing leading tag line; Missing footer metadata"));
    }

    #[test]
    fn footer_is_visible_output() {
        let session = SessionHandle::default();
        let out = drive(&session, "/footer\n");
        assert!(out.contains(
            "\n[Version=v1.4 | Tag=<g_1> | Sources=<none> | Assumptions=0 | Cycle=1/3 | Locus=VPPConsole]\n"
        ));
    }
}
