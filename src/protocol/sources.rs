use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

const TABLE_HEADER: [&str; 4] = ["#", "Kind", "Reference", "Name"];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceKind {
    Web,
    Repo,
    File,
    Ssh,
}

/// One attached reference contributed by the message-composition layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub id: String,
    pub kind: SourceKind,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl SourceRef {
    /// Reference and name are trimmed, and a blank name is stored as `None`,
    /// matching what a table row can carry.
    pub fn new(kind: SourceKind, reference: impl Into<String>, display_name: Option<String>) -> Self {
        let reference = reference.into();
        Self {
            id: format!("src_{}", Uuid::new_v4().simple()),
            kind,
            reference: reference.trim().to_string(),
            display_name: display_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        }
    }

    /// Same `(kind, ref, display name)` triplet, ignoring ids.
    pub fn same_entry(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.reference == other.reference
            && self.display_name == other.display_name
    }
}

/// Footer `Sources=` token derived from a set of references.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourcesSummary {
    #[default]
    None,
    Web,
    Mixed,
}

impl SourcesSummary {
    pub fn of(sources: &[SourceRef]) -> Self {
        if sources.is_empty() {
            Self::None
        } else if sources.iter().all(|s| s.kind == SourceKind::Web) {
            Self::Web
        } else {
            Self::Mixed
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Web => "web",
            Self::Mixed => "mixed",
        }
    }
}

/// Render references as a markdown table. An empty list renders nothing.
pub fn format_sources_table(sources: &[SourceRef]) -> String {
    if sources.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(sources.len() + 2);
    lines.push(format!("| {} |", TABLE_HEADER.join(" | ")));
    lines.push("|---|------|-----------|------|".to_string());
    for (index, source) in sources.iter().enumerate() {
        lines.push(format!(
            "| {} | {} | {} | {} |",
            index + 1,
            source.kind,
            escape_cell(&source.reference),
            escape_cell(source.display_name.as_deref().unwrap_or_default()),
        ));
    }
    lines.join("\n")
}

/// Extract every sources table embedded in free text, in order.
///
/// Rows with an unknown kind or an empty reference are skipped.
pub fn parse_sources_table(text: &str) -> Vec<SourceRef> {
    let mut sources = Vec::new();
    let mut lines = text.lines().map(str::trim).peekable();

    while let Some(line) = lines.next() {
        if !is_header_row(line) {
            continue;
        }
        if lines.peek().is_some_and(|next| is_separator_row(next)) {
            lines.next();
        }
        while let Some(row) = lines.next_if(|next| next.starts_with('|')) {
            if let Some(source) = parse_row(row) {
                sources.push(source);
            }
        }
    }

    sources
}

fn parse_row(row: &str) -> Option<SourceRef> {
    let cells = split_cells(row);
    let [_, kind, reference, name] = cells.as_slice() else {
        tracing::debug!(row, "vpp.sources.skip_row");
        return None;
    };

    let kind: SourceKind = kind.parse().ok()?;
    if reference.is_empty() {
        return None;
    }
    let display_name = (!name.is_empty()).then(|| name.clone());
    Some(SourceRef::new(kind, reference.clone(), display_name))
}

fn is_header_row(line: &str) -> bool {
    let cells = split_cells(line);
    cells.len() == TABLE_HEADER.len()
        && cells
            .iter()
            .zip(TABLE_HEADER)
            .all(|(cell, expected)| cell.eq_ignore_ascii_case(expected))
}

fn is_separator_row(line: &str) -> bool {
    line.starts_with('|')
        && line
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

/// Split a `| a | b |` row on unescaped pipes, unescaping and trimming cells.
fn split_cells(row: &str) -> Vec<String> {
    let Some(inner) = row.trim().strip_prefix('|') else {
        return Vec::new();
    };

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars();
    let mut closed = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
                closed = false;
            }
            '|' => {
                cells.push(current.trim().to_string());
                current.clear();
                closed = true;
            }
            other => {
                current.push(other);
                if !other.is_whitespace() {
                    closed = false;
                }
            }
        }
    }
    if !closed {
        cells.push(current.trim().to_string());
    }
    cells
}

fn escape_cell(value: &str) -> String {
    let value = value.trim();
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '|' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' | '\r' => escaped.push(' '),
            other => escaped.push(other),
        }
    }
    escaped
}
