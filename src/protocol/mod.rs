//! Viable-Prompt Protocol: header, footer and reply discipline for chat turns.
//!
//! Everything here is synchronous and infallible. Malformed input is skipped
//! or reported as [`ValidationResult`] issues, never raised.

pub mod footer;
pub mod header;
pub mod modifiers;
pub mod runtime;
pub mod sources;
pub mod state;
pub mod tag;
pub mod validation;

pub use footer::{
    CYCLE_DISPLAY_LENGTH, FOOTER_VERSION, Footer, extract_sources_token, ingest_footer_line,
    looks_like_footer,
};
pub use header::{Header, compose_outbound, make_header, parse_header};
pub use modifiers::{Correctness, Modifiers, Severity};
pub use runtime::{ReplyIngest, VppRuntime};
pub use sources::{
    SourceKind, SourceRef, SourcesSummary, format_sources_table, parse_sources_table,
};
pub use state::{DEFAULT_LOCUS, ProtocolState};
pub use tag::Tag;
pub use validation::{
    ISSUE_MISSING_FOOTER, ISSUE_MISSING_TAG_LINE, ISSUE_REPLY_EMPTY, ValidationResult,
    validate_assistant_reply,
};
