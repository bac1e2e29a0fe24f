use super::store::StateStore;
use crate::config::ProtocolConfig;
use crate::error::SessionError;
use crate::protocol::{ProtocolState, VppRuntime};
use std::sync::{Arc, Mutex, MutexGuard};

/// Single-owner handle to one conversation's runtime.
///
/// Clones share the same runtime; every access is serialized through the
/// mutex so a footer ingest and a header synthesis for the same turn never
/// interleave.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    runtime: Arc<Mutex<VppRuntime>>,
}

impl SessionHandle {
    pub fn new(runtime: VppRuntime) -> Self {
        Self {
            runtime: Arc::new(Mutex::new(runtime)),
        }
    }

    /// Resume from `store`, or start from configuration when nothing is stored.
    pub fn restore(store: &dyn StateStore, config: &ProtocolConfig) -> Result<Self, SessionError> {
        let runtime = match store.load()? {
            Some(state) => VppRuntime::from_state(state),
            None => VppRuntime::from_config(config),
        };
        Ok(Self::new(runtime))
    }

    pub fn persist(&self, store: &dyn StateStore) -> Result<(), SessionError> {
        store.save(&self.snapshot())
    }

    pub fn with<R>(&self, f: impl FnOnce(&VppRuntime) -> R) -> R {
        f(&self.lock())
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut VppRuntime) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn snapshot(&self) -> ProtocolState {
        self.lock().state().clone()
    }

    // Setters clamp, so state behind a poisoned lock is still valid.
    fn lock(&self) -> MutexGuard<'_, VppRuntime> {
        self.runtime
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Tag;
    use crate::session::MemoryStateStore;
    use std::thread;

    #[test]
    fn clones_share_runtime() {
        let handle = SessionHandle::default();
        let other = handle.clone();
        other.with_mut(|rt| rt.set_tag(Tag::Q));
        assert_eq!(handle.with(|rt| rt.state().current_tag()), Tag::Q);
    }

    #[test]
    fn concurrent_cycle_steps_are_serialized() {
        let handle = SessionHandle::default();
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let handle = handle.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        handle.with_mut(VppRuntime::next_in_cycle);
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(handle.snapshot().cycle_index(), 1 + 8 * 25);
    }

    #[test]
    fn restore_prefers_stored_state() {
        let store = MemoryStateStore::new();
        let config = ProtocolConfig {
            locus: Some("Configured".into()),
            assumptions: 1,
        };

        let fresh = SessionHandle::restore(&store, &config).unwrap();
        assert_eq!(fresh.snapshot().locus(), Some("Configured"));
        assert_eq!(fresh.snapshot().assumptions(), 1);

        fresh.with_mut(|rt| {
            rt.set_tag(Tag::C);
            rt.set_locus(Some("Stored".into()));
        });
        fresh.persist(&store).unwrap();

        let resumed = SessionHandle::restore(&store, &config).unwrap();
        assert_eq!(resumed.snapshot().current_tag(), Tag::C);
        assert_eq!(resumed.snapshot().locus(), Some("Stored"));
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let handle = SessionHandle::default();
        let poisoner = handle.clone();
        let _ = thread::spawn(move || {
            poisoner.with_mut(|rt| {
                rt.set_assumptions(4);
                panic!("boom");
            });
        })
        .join();
        assert_eq!(handle.snapshot().assumptions(), 4);
    }
}
