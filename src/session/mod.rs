pub mod handle;
pub mod store;

pub use handle::SessionHandle;
pub use store::{FileStateStore, MemoryStateStore, StateStore};
