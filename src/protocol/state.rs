use super::tag::Tag;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCUS: &str = "VPPConsole";

/// Mutable protocol state for one conversation.
///
/// Fields are private so that `cycle_index >= 1` holds after every mutation;
/// `assumptions` is unsigned and therefore never negative. Setters take signed
/// input and clamp at the boundary instead of rejecting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolState {
    current_tag: Tag,
    #[serde(deserialize_with = "deserialize_cycle_index")]
    cycle_index: u32,
    assumptions: u32,
    #[serde(default, deserialize_with = "deserialize_locus")]
    locus: Option<String>,
}

impl Default for ProtocolState {
    fn default() -> Self {
        Self {
            current_tag: Tag::G,
            cycle_index: 1,
            assumptions: 0,
            locus: Some(DEFAULT_LOCUS.to_string()),
        }
    }
}

impl ProtocolState {
    pub fn new(assumptions: i64, locus: Option<String>) -> Self {
        let mut state = Self {
            locus: None,
            ..Self::default()
        };
        state.set_assumptions(assumptions);
        state.set_locus(locus);
        state
    }

    pub fn current_tag(&self) -> Tag {
        self.current_tag
    }

    pub fn cycle_index(&self) -> u32 {
        self.cycle_index
    }

    pub fn assumptions(&self) -> u32 {
        self.assumptions
    }

    pub fn locus(&self) -> Option<&str> {
        self.locus.as_deref()
    }

    pub fn set_tag(&mut self, tag: Tag) {
        self.current_tag = tag;
    }

    pub fn set_cycle_index(&mut self, index: i64) {
        self.cycle_index = clamp_to_u32(index.max(1));
    }

    pub fn advance_cycle(&mut self) {
        self.cycle_index = self.cycle_index.saturating_add(1).max(1);
    }

    pub fn reset_cycle(&mut self) {
        self.cycle_index = 1;
        self.current_tag = Tag::G;
    }

    pub fn set_assumptions(&mut self, count: i64) {
        self.assumptions = clamp_to_u32(count.max(0));
    }

    /// Newlines become spaces and surrounding whitespace is trimmed; a blank
    /// locus is stored as `None`.
    pub fn set_locus(&mut self, locus: Option<String>) {
        self.locus = normalize_locus(locus);
    }

    /// Locus suitable for rendering: `None` when unset or empty.
    pub fn visible_locus(&self) -> Option<&str> {
        self.locus.as_deref().filter(|locus| !locus.is_empty())
    }
}

fn clamp_to_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(if value < 0 { 0 } else { u32::MAX })
}

fn normalize_locus(locus: Option<String>) -> Option<String> {
    locus
        .map(|locus| locus.replace(['\r', '\n'], " ").trim().to_string())
        .filter(|locus| !locus.is_empty())
}

fn deserialize_locus<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(normalize_locus)
}

fn deserialize_cycle_index<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = u32::deserialize(deserializer)?;
    Ok(raw.max(1))
}
