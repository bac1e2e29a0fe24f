use super::modifiers::{Correctness, Modifiers, Severity};
use super::tag::Tag;

/// Parsed form of an outbound header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub tag: Tag,
    pub modifiers: Modifiers,
}

/// Build the `!<tag> [--correct|--incorrect] [--minor|--major] [--<echo>]` line.
///
/// An escape header always carries a destination: a missing or non-echoable
/// echo target falls back to `g`.
pub fn make_header(tag: Tag, modifiers: &Modifiers) -> String {
    let mut parts = vec![format!("!<{}>", tag.raw())];

    if let Some(flag) = modifiers.correctness.flag() {
        parts.push(flag.to_string());
    }
    if let Some(flag) = modifiers.severity.flag() {
        parts.push(flag.to_string());
    }

    let mut echo = modifiers.echo_target;
    if tag == Tag::E {
        echo = Some(echo.filter(|target| target.is_echoable()).unwrap_or(Tag::G));
    }
    if let Some(target) = echo
        && !target.is_escape()
    {
        parts.push(format!("--<{}>", target.raw()));
    }

    parts.join(" ")
}

/// Read a header line back. Unknown flags are ignored; a line that does not
/// open with `!<known-tag>` is not a header.
pub fn parse_header(line: &str) -> Option<Header> {
    let trimmed = line.trim();
    if !trimmed.starts_with("!<") {
        return None;
    }

    let mut tokens = trimmed.split_whitespace();
    let tag = tokens
        .next()?
        .strip_prefix("!<")?
        .strip_suffix('>')
        .and_then(Tag::from_raw)?;

    let mut modifiers = Modifiers::default();
    for token in tokens {
        match token {
            "--correct" => modifiers.correctness = Correctness::Correct,
            "--incorrect" => modifiers.correctness = Correctness::Incorrect,
            "--minor" => modifiers.severity = Severity::Minor,
            "--major" => modifiers.severity = Severity::Major,
            other => {
                if let Some(target) = other
                    .strip_prefix("--<")
                    .and_then(|rest| rest.strip_suffix('>'))
                    .and_then(Tag::from_raw)
                {
                    modifiers.echo_target = Some(target);
                }
            }
        }
    }

    Some(Header { tag, modifiers })
}

/// Prefix outbound user text with its header line.
pub fn compose_outbound(tag: Tag, modifiers: &Modifiers, text: &str) -> String {
    let header = make_header(tag, modifiers);
    if text.is_empty() {
        header
    } else {
        format!("{header}\n{text}")
    }
}
