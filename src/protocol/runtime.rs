use super::footer::{self, Footer, looks_like_footer};
use super::header;
use super::modifiers::Modifiers;
use super::sources::{SourceRef, SourcesSummary, parse_sources_table};
use super::state::ProtocolState;
use super::tag::Tag;
use super::validation::{ValidationResult, reply_lines, validate_assistant_reply};
use crate::config::ProtocolConfig;
use tracing::{debug, warn};

/// Protocol engine for one conversation.
///
/// Owns its [`ProtocolState`] outright; callers that share a runtime across
/// threads go through [`crate::session::SessionHandle`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VppRuntime {
    state: ProtocolState,
}

/// Outcome of ingesting a full assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyIngest {
    pub validation: ValidationResult,
    pub footer_ingested: bool,
    pub sources_token: Option<String>,
    pub sources: Vec<SourceRef>,
}

impl VppRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: ProtocolState) -> Self {
        Self { state }
    }

    pub fn from_config(config: &ProtocolConfig) -> Self {
        let locus = config.locus.clone().filter(|locus| !locus.is_empty());
        Self::from_state(ProtocolState::new(config.assumptions, locus))
    }

    pub fn state(&self) -> &ProtocolState {
        &self.state
    }

    pub fn into_state(self) -> ProtocolState {
        self.state
    }

    // ── State transitions ────────────────────────────────────────────────

    /// Always applies `tag`; the adjacency table is advisory only.
    pub fn set_tag(&mut self, tag: Tag) {
        let from = self.state.current_tag();
        if !from.advises(tag) {
            debug!(from = %from, to = %tag, "vpp.tag.unadvised");
        }
        self.state.set_tag(tag);
        debug!(tag = %tag, "vpp.tag");
    }

    pub fn is_advised_transition(&self, to: Tag) -> bool {
        self.state.current_tag().advises(to)
    }

    pub fn allowed_next_tags(&self) -> &'static [Tag] {
        self.state.current_tag().allowed_next()
    }

    pub fn next_in_cycle(&mut self) {
        self.state.advance_cycle();
        debug!(cycle = self.state.cycle_index(), "vpp.cycle.next");
    }

    pub fn new_cycle(&mut self) {
        self.state.reset_cycle();
        debug!("vpp.cycle.reset");
    }

    pub fn set_assumptions(&mut self, count: i64) {
        self.state.set_assumptions(count);
        debug!(assumptions = self.state.assumptions(), "vpp.assumptions");
    }

    pub fn set_locus(&mut self, locus: Option<String>) {
        debug!(locus = ?locus, "vpp.locus");
        self.state.set_locus(locus);
    }

    // ── Header / footer synthesis ────────────────────────────────────────

    pub fn make_header(&self, tag: Tag, modifiers: &Modifiers) -> String {
        header::make_header(tag, modifiers)
    }

    /// Prefix outbound text with a header for the current tag.
    pub fn compose_outbound(&self, text: &str, modifiers: &Modifiers) -> String {
        header::compose_outbound(self.state.current_tag(), modifiers, text)
    }

    pub fn footer(&self, sources: SourcesSummary, explicit_tokens: Option<&[String]>) -> Footer {
        Footer::from_state(&self.state, sources_token(sources, explicit_tokens))
    }

    /// Footer line for the current state. A non-empty explicit token list
    /// replaces the summary token verbatim (comma-joined).
    pub fn make_footer(&self, sources: SourcesSummary, explicit_tokens: Option<&[String]>) -> String {
        self.footer(sources, explicit_tokens).render()
    }

    /// Append the footer to a synthetic reply body unless it already ends
    /// with one.
    pub fn finalize_reply(
        &self,
        body: &str,
        sources: SourcesSummary,
        explicit_tokens: Option<&[String]>,
    ) -> String {
        if reply_lines(body).last().is_some_and(|last| looks_like_footer(last)) {
            return body.to_string();
        }

        let footer = self.make_footer(sources, explicit_tokens);
        if body.is_empty() {
            footer
        } else if body.ends_with('\n') {
            format!("{body}{footer}")
        } else {
            format!("{body}\n{footer}")
        }
    }

    // ── Ingestion / validation ───────────────────────────────────────────

    pub fn ingest_footer_line(&mut self, line: &str) {
        footer::ingest_footer_line(&mut self.state, line);
        debug!(
            tag = %self.state.current_tag(),
            cycle = self.state.cycle_index(),
            locus = ?self.state.locus(),
            "vpp.footer.ingested"
        );
    }

    pub fn validate_assistant_reply(&self, text: &str) -> ValidationResult {
        let result = validate_assistant_reply(text);
        if !result.is_valid {
            warn!(issues = ?result.issues, "vpp.reply.invalid");
        }
        result
    }

    /// Validate a reply, ingest its footer line when present, and report the
    /// sources it carries. Sources and assumptions never reach state.
    pub fn ingest_assistant_reply(&mut self, text: &str) -> ReplyIngest {
        let validation = self.validate_assistant_reply(text);

        let footer_line = reply_lines(text)
            .last()
            .copied()
            .filter(|last| looks_like_footer(last));
        let sources_token = footer_line.and_then(footer::extract_sources_token);
        if let Some(line) = footer_line {
            self.ingest_footer_line(line);
        }

        ReplyIngest {
            validation,
            footer_ingested: footer_line.is_some(),
            sources_token,
            sources: parse_sources_table(text),
        }
    }
}

fn sources_token(sources: SourcesSummary, explicit_tokens: Option<&[String]>) -> String {
    match explicit_tokens {
        Some(tokens) if !tokens.is_empty() => tokens.join(","),
        _ => sources.token().to_string(),
    }
}
