use super::types::Command;

pub fn parse_command(input: &str) -> Option<Command> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next()?.to_lowercase();
    let args = parts.next().unwrap_or("").trim();

    match cmd.as_str() {
        "/status" | "/state" => Some(Command::Status),
        "/tag" => Some(Command::Tag {
            token: args.to_string(),
        }),
        "/next" => Some(Command::Next),
        "/new" | "/reset" => Some(Command::New),
        "/assume" | "/assumptions" => Some(Command::Assume {
            count: args.parse().ok(),
        }),
        "/locus" => Some(Command::Locus {
            name: if args.is_empty() {
                None
            } else {
                Some(args.to_string())
            },
        }),
        "/footer" => Some(Command::Footer),
        "/reply" => Some(Command::Reply),
        "/help" | "/?" => Some(Command::Help),
        "/quit" | "/exit" => Some(Command::Quit),
        _ => None,
    }
}
