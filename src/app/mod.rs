pub mod console;
pub mod dispatch;

pub use console::run_console;
pub use dispatch::{Outcome, dispatch, execute, parse_source_entry};
