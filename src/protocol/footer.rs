use super::state::ProtocolState;
use super::tag::Tag;
use tracing::debug;

pub const FOOTER_VERSION: &str = "v1.4";

/// Display denominator of the `Cycle=` field. Not an enforced bound.
pub const CYCLE_DISPLAY_LENGTH: u32 = 3;

/// Metadata line terminating every assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub tag: Tag,
    pub cycle_index: u32,
    pub sources: String,
    pub assumptions: u32,
    pub locus: Option<String>,
}

impl Footer {
    pub fn from_state(state: &ProtocolState, sources: impl Into<String>) -> Self {
        Self {
            tag: state.current_tag(),
            cycle_index: state.cycle_index(),
            sources: sources.into(),
            assumptions: state.assumptions(),
            locus: state.visible_locus().map(str::to_string),
        }
    }

    pub fn render(&self) -> String {
        let mut fields = vec![
            format!("Version={FOOTER_VERSION}"),
            format!("Tag=<{}_{}>", self.tag.raw(), self.cycle_index),
            format!("Sources=<{}>", self.sources),
            format!("Assumptions={}", self.assumptions),
            format!("Cycle={}/{CYCLE_DISPLAY_LENGTH}", self.cycle_index),
        ];
        if let Some(locus) = self
            .locus
            .as_deref()
            .map(escape_locus)
            .filter(|l| !l.is_empty())
        {
            fields.push(format!("Locus={locus}"));
        }
        format!("[{}]", fields.join(" | "))
    }
}

/// Structural footer check shared by validation and reply ingestion.
pub fn looks_like_footer(line: &str) -> bool {
    line.starts_with('[') && line.contains("Version=") && line.contains("Tag=<")
}

/// Update tag, cycle and locus from a footer line.
///
/// Fields apply in the order they appear, so a later `Cycle=` overrides the
/// cycle carried by `Tag=`. Malformed fields are skipped. `Version=`,
/// `Sources=` and `Assumptions=` never touch state.
pub fn ingest_footer_line(state: &mut ProtocolState, line: &str) {
    for (key, value) in footer_fields(line) {
        match key {
            "Tag" => ingest_tag(state, value),
            "Cycle" => ingest_cycle(state, value),
            "Locus" => {
                // Checked before unescaping: a literal `nil` locus renders as `\nil`.
                if value.is_empty() || value.eq_ignore_ascii_case("nil") {
                    state.set_locus(None);
                } else {
                    state.set_locus(Some(unescape(value)));
                }
            }
            _ => {}
        }
    }
}

/// Raw `Sources=` value of a footer line, without angle brackets.
pub fn extract_sources_token(line: &str) -> Option<String> {
    footer_fields(line)
        .find(|(key, _)| *key == "Sources")
        .map(|(_, value)| strip_angles(value).trim().to_string())
        .filter(|token| !token.is_empty())
}

fn footer_fields(line: &str) -> impl Iterator<Item = (&str, &str)> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('[').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix(']').unwrap_or(trimmed);

    split_unescaped_pipes(trimmed)
        .into_iter()
        .map(str::trim)
        .filter_map(|field| field.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
}

/// Split on `|` not preceded by a backslash escape. Escapes stay in place.
fn split_unescaped_pipes(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (index, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '|' {
            parts.push(&text[start..index]);
            start = index + c.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Single-line, pipe-safe rendering of a locus value.
fn escape_locus(locus: &str) -> String {
    let flat = locus.replace(['\r', '\n'], " ");
    let flat = flat.trim();

    let mut escaped = String::with_capacity(flat.len() + 1);
    if flat.eq_ignore_ascii_case("nil") {
        escaped.push('\\');
    }
    for c in flat.chars() {
        if matches!(c, '\\' | '|') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn ingest_tag(state: &mut ProtocolState, value: &str) {
    let token = strip_angles(value).trim();

    // Tag tokens contain underscores themselves (`o_f`, `e_o`), so the cycle
    // suffix is whatever follows the last underscore.
    if let Some(tag) = Tag::from_raw(token) {
        state.set_tag(tag);
        return;
    }

    let Some((tag_token, cycle_token)) = token.rsplit_once('_') else {
        debug!(field = "Tag", value, "vpp.footer.skip_field");
        return;
    };
    match Tag::from_raw(tag_token.trim()) {
        Some(tag) => state.set_tag(tag),
        None => debug!(field = "Tag", value, "vpp.footer.skip_field"),
    }
    match cycle_token.trim().parse::<i64>() {
        Ok(index) => state.set_cycle_index(index),
        Err(_) => debug!(field = "Tag", value, "vpp.footer.skip_cycle"),
    }
}

fn ingest_cycle(state: &mut ProtocolState, value: &str) {
    let first = value.split('/').next().unwrap_or_default().trim();
    match first.parse::<i64>() {
        Ok(index) => state.set_cycle_index(index),
        Err(_) => debug!(field = "Cycle", value, "vpp.footer.skip_field"),
    }
}

fn strip_angles(value: &str) -> &str {
    let value = value.strip_prefix('<').unwrap_or(value);
    value.strip_suffix('>').unwrap_or(value)
}
