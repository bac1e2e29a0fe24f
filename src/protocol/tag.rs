use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Phase of the structured reasoning loop.
///
/// The raw tokens (`g`, `q`, `o`, `c`, `o_f`, `e`, `e_o`) are the wire form used
/// in headers and footers; parsing is case-sensitive.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Tag {
    /// Grounding.
    #[default]
    #[serde(rename = "g")]
    #[strum(serialize = "g")]
    G,
    /// Question.
    #[serde(rename = "q")]
    #[strum(serialize = "q")]
    Q,
    /// Output.
    #[serde(rename = "o")]
    #[strum(serialize = "o")]
    O,
    /// Correction.
    #[serde(rename = "c")]
    #[strum(serialize = "c")]
    C,
    /// Final output.
    #[serde(rename = "o_f")]
    #[strum(serialize = "o_f")]
    OF,
    /// Escape.
    #[serde(rename = "e")]
    #[strum(serialize = "e")]
    E,
    /// Escape to output.
    #[serde(rename = "e_o")]
    #[strum(serialize = "e_o")]
    EO,
}

impl Tag {
    pub const ALL: [Tag; 7] = [
        Tag::G,
        Tag::Q,
        Tag::O,
        Tag::C,
        Tag::OF,
        Tag::E,
        Tag::EO,
    ];

    /// Tags an escape header may point back to.
    pub const ECHOABLE: [Tag; 4] = [Tag::G, Tag::Q, Tag::O, Tag::C];

    pub fn raw(self) -> &'static str {
        match self {
            Tag::G => "g",
            Tag::Q => "q",
            Tag::O => "o",
            Tag::C => "c",
            Tag::OF => "o_f",
            Tag::E => "e",
            Tag::EO => "e_o",
        }
    }

    /// Parse a wire token. Unknown tokens yield `None`.
    pub fn from_raw(token: &str) -> Option<Self> {
        token.parse().ok()
    }

    pub fn is_echoable(self) -> bool {
        Self::ECHOABLE.contains(&self)
    }

    pub fn is_escape(self) -> bool {
        matches!(self, Tag::E | Tag::EO)
    }

    /// Advisory successor tags. Nothing enforces this table.
    pub fn allowed_next(self) -> &'static [Tag] {
        match self {
            Tag::G => &[Tag::Q, Tag::O],
            Tag::Q => &[Tag::O, Tag::C],
            Tag::O => &[Tag::C, Tag::OF],
            Tag::C => &[Tag::OF, Tag::G],
            Tag::OF => &[Tag::G, Tag::Q],
            Tag::E | Tag::EO => &[Tag::G],
        }
    }

    pub fn advises(self, next: Tag) -> bool {
        self.allowed_next().contains(&next)
    }
}
