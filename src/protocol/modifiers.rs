use super::tag::Tag;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Whether the user asserts the prior assistant turn was correct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Correctness {
    #[default]
    Neutral,
    Correct,
    Incorrect,
}

impl Correctness {
    pub fn flag(self) -> Option<&'static str> {
        match self {
            Self::Neutral => None,
            Self::Correct => Some("--correct"),
            Self::Incorrect => Some("--incorrect"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    #[default]
    None,
    Minor,
    Major,
}

impl Severity {
    pub fn flag(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Minor => Some("--minor"),
            Self::Major => Some("--major"),
        }
    }
}

/// Per-message header modifiers. Built fresh for each outbound message and
/// never stored as protocol state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub correctness: Correctness,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub echo_target: Option<Tag>,
}

impl Modifiers {
    pub fn new(correctness: Correctness, severity: Severity, echo_target: Option<Tag>) -> Self {
        Self {
            correctness,
            severity,
            echo_target,
        }
    }

    pub fn with_correctness(mut self, correctness: Correctness) -> Self {
        self.correctness = correctness;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_echo(mut self, echo_target: Tag) -> Self {
        self.echo_target = Some(echo_target);
        self
    }
}
