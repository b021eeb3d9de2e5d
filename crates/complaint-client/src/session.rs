//! Session store: the signed-in token, the derived staff flag and a display
//! identifier, persisted write-through to durable storage.
//!
//! The staff flag is never taken from the user or the server's login reply.
//! Every token change bumps a generation counter and, for a non-empty token,
//! starts a [`StaffProbe`]. A probe result is applied only if its generation
//! is still current when it completes, so a slow probe for an old token can
//! never overwrite the flag for a newer one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::BoxFuture;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use complaint_shared::constants::{KEY_DISPLAY_IDENTIFIER, KEY_IS_ADMIN, KEY_TOKEN};
use complaint_store::{KeyValueStore, StoreError};

/// Checks whether a token grants staff access.
pub trait StaffProbe: Send + Sync {
    fn probe(&self, token: String) -> BoxFuture<'static, bool>;
}

/// Point-in-time copy of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub token: String,
    pub is_admin: bool,
    pub display_identifier: String,
}

impl SessionSnapshot {
    pub fn is_signed_in(&self) -> bool {
        !self.token.is_empty()
    }
}

/// What happened to a probe's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The result was current and is now the session's staff flag.
    Applied(bool),
    /// The token changed while the probe was in flight.
    Discarded,
    /// The result was current but could not be persisted.
    Failed,
}

/// A running staff probe.
#[derive(Debug)]
pub struct ProbeHandle {
    generation: u64,
    task: JoinHandle<ProbeOutcome>,
}

impl ProbeHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait for the probe to finish and report what happened to its result.
    pub async fn wait(self) -> ProbeOutcome {
        self.task.await.unwrap_or(ProbeOutcome::Failed)
    }
}

struct Inner {
    storage: Box<dyn KeyValueStore>,
    snapshot: SessionSnapshot,
    generation: u64,
}

/// Shared handle to the session. Clones refer to the same session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
    probe: Arc<dyn StaffProbe>,
    changes: Arc<watch::Sender<SessionSnapshot>>,
}

impl SessionStore {
    /// Restore the session persisted in `storage`.
    ///
    /// The stored staff flag is loaded as-is; call [`refresh_staff_flag`]
    /// to re-derive it for the restored token.
    ///
    /// [`refresh_staff_flag`]: SessionStore::refresh_staff_flag
    pub fn load(
        storage: Box<dyn KeyValueStore>,
        probe: Arc<dyn StaffProbe>,
    ) -> Result<Self, StoreError> {
        let token = storage.get(KEY_TOKEN)?.unwrap_or_default();
        let is_admin = !token.is_empty() && storage.get(KEY_IS_ADMIN)?.as_deref() == Some("true");
        let display_identifier = storage.get(KEY_DISPLAY_IDENTIFIER)?.unwrap_or_default();

        let snapshot = SessionSnapshot {
            token,
            is_admin,
            display_identifier,
        };

        debug!(
            signed_in = snapshot.is_signed_in(),
            is_admin = snapshot.is_admin,
            "Session restored"
        );

        let (changes, _) = watch::channel(snapshot.clone());

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                storage,
                snapshot,
                generation: 0,
            })),
            probe,
            changes: Arc::new(changes),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot.clone()
    }

    pub fn token(&self) -> String {
        self.lock().snapshot.token.clone()
    }

    pub fn is_admin(&self) -> bool {
        self.lock().snapshot.is_admin
    }

    pub fn display_identifier(&self) -> String {
        self.lock().snapshot.display_identifier.clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.lock().snapshot.is_signed_in()
    }

    /// Receive a new snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.changes.subscribe()
    }

    /// Store a new token.
    ///
    /// The staff flag drops to `false` immediately. For a non-empty token a
    /// probe is started and its handle returned; setting the current token
    /// again is a no-op.
    pub fn set_token(&self, value: &str) -> Result<Option<ProbeHandle>, StoreError> {
        let generation = {
            let mut inner = self.lock();
            if inner.snapshot.token == value {
                return Ok(None);
            }

            inner
                .storage
                .set_many(&[(KEY_TOKEN, value), (KEY_IS_ADMIN, "false")])?;
            inner.snapshot.token = value.to_string();
            inner.snapshot.is_admin = false;
            inner.generation += 1;

            self.changes.send_replace(inner.snapshot.clone());
            inner.generation
        };

        if value.is_empty() {
            info!("Signed out");
            return Ok(None);
        }

        info!(generation, "Token updated, probing staff access");
        Ok(self.spawn_probe(value.to_string(), generation))
    }

    /// Re-derive the staff flag for the current token.
    ///
    /// Used at start-up so a persisted flag is confirmed by the server before
    /// it matters. Returns `None` when signed out.
    pub fn refresh_staff_flag(&self) -> Option<ProbeHandle> {
        let (token, generation) = {
            let mut inner = self.lock();
            if inner.snapshot.token.is_empty() {
                return None;
            }
            inner.generation += 1;
            (inner.snapshot.token.clone(), inner.generation)
        };
        self.spawn_probe(token, generation)
    }

    pub fn set_display_identifier(&self, value: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.storage.set(KEY_DISPLAY_IDENTIFIER, value)?;
        inner.snapshot.display_identifier = value.to_string();
        self.changes.send_replace(inner.snapshot.clone());
        Ok(())
    }

    /// Sign out: token, staff flag and display identifier are reset together
    /// and any in-flight probe is invalidated. Idempotent.
    pub fn clear_token(&self) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.storage.set_many(&[
            (KEY_TOKEN, ""),
            (KEY_IS_ADMIN, "false"),
            (KEY_DISPLAY_IDENTIFIER, ""),
        ])?;
        inner.snapshot = SessionSnapshot::default();
        inner.generation += 1;
        self.changes.send_replace(inner.snapshot.clone());
        info!("Session cleared");
        Ok(())
    }

    fn spawn_probe(&self, token: String, generation: u64) -> Option<ProbeHandle> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(generation, "No async runtime, staff probe skipped");
            return None;
        };

        let probe = self.probe.probe(token);
        let store = self.clone();
        let task = runtime.spawn(async move {
            let is_staff = probe.await;
            store.apply_probe_result(generation, is_staff)
        });

        Some(ProbeHandle { generation, task })
    }

    fn apply_probe_result(&self, generation: u64, is_staff: bool) -> ProbeOutcome {
        let mut inner = self.lock();
        if inner.generation != generation {
            debug!(
                generation,
                current = inner.generation,
                "Discarding stale staff probe result"
            );
            return ProbeOutcome::Discarded;
        }

        let flag = if is_staff { "true" } else { "false" };
        if let Err(e) = inner.storage.set(KEY_IS_ADMIN, flag) {
            warn!(error = %e, "Failed to persist staff flag");
            return ProbeOutcome::Failed;
        }

        inner.snapshot.is_admin = is_staff;
        self.changes.send_replace(inner.snapshot.clone());
        info!(generation, is_admin = is_staff, "Staff flag derived");
        ProbeOutcome::Applied(is_staff)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use complaint_store::MemoryStore;
    use tokio::sync::oneshot;

    use super::*;

    /// Probe whose answers are released by the test, one per token.
    #[derive(Default)]
    struct GatedProbe {
        gates: Mutex<HashMap<String, oneshot::Receiver<bool>>>,
        calls: Mutex<Vec<String>>,
    }

    impl GatedProbe {
        fn gate(&self, token: &str) -> oneshot::Sender<bool> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(token.to_string(), rx);
            tx
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl StaffProbe for GatedProbe {
        fn probe(&self, token: String) -> BoxFuture<'static, bool> {
            self.calls.lock().unwrap().push(token.clone());
            let gate = self.gates.lock().unwrap().remove(&token);
            Box::pin(async move {
                match gate {
                    Some(rx) => rx.await.unwrap_or(false),
                    None => false,
                }
            })
        }
    }

    /// Probe that answers immediately from a fixed list of staff tokens.
    struct FixedProbe(Vec<&'static str>);

    impl StaffProbe for FixedProbe {
        fn probe(&self, token: String) -> BoxFuture<'static, bool> {
            let is_staff = self.0.contains(&token.as_str());
            Box::pin(async move { is_staff })
        }
    }

    fn store_with(probe: Arc<dyn StaffProbe>) -> SessionStore {
        SessionStore::load(Box::new(MemoryStore::new()), probe).unwrap()
    }

    #[tokio::test]
    async fn staff_token_sets_admin_flag() {
        let store = store_with(Arc::new(FixedProbe(vec!["staff-token"])));

        let handle = store.set_token("staff-token").unwrap().expect("probe started");
        assert_eq!(handle.wait().await, ProbeOutcome::Applied(true));
        assert!(store.is_admin());

        let handle = store.set_token("user-token").unwrap().expect("probe started");
        assert!(!store.is_admin(), "flag must drop while the probe runs");
        assert_eq!(handle.wait().await, ProbeOutcome::Applied(false));
        assert!(!store.is_admin());
    }

    #[tokio::test]
    async fn empty_token_clears_flag_without_probing() {
        let probe = Arc::new(GatedProbe::default());
        let store = store_with(probe.clone());

        assert!(store.set_token("").unwrap().is_none());
        assert!(probe.calls().is_empty());
        assert!(!store.is_admin());
    }

    #[tokio::test]
    async fn stale_probe_never_overwrites_newer_result() {
        let probe = Arc::new(GatedProbe::default());
        let release_old = probe.gate("old");
        let release_new = probe.gate("new");
        let store = store_with(probe.clone());

        let old = store.set_token("old").unwrap().unwrap();
        let new = store.set_token("new").unwrap().unwrap();
        assert!(new.generation() > old.generation());

        release_new.send(false).unwrap();
        assert_eq!(new.wait().await, ProbeOutcome::Applied(false));

        // the earlier probe resolves last, with a different answer
        release_old.send(true).unwrap();
        assert_eq!(old.wait().await, ProbeOutcome::Discarded);

        assert!(!store.is_admin());
        assert_eq!(store.token(), "new");
        assert_eq!(probe.calls(), vec!["old", "new"]);
    }

    #[tokio::test]
    async fn sign_out_invalidates_pending_probe() {
        let probe = Arc::new(GatedProbe::default());
        let release = probe.gate("staff");
        let store = store_with(probe);

        let pending = store.set_token("staff").unwrap().unwrap();
        store.clear_token().unwrap();

        release.send(true).unwrap();
        assert_eq!(pending.wait().await, ProbeOutcome::Discarded);
        assert!(!store.is_admin());
        assert!(!store.is_signed_in());
    }

    #[tokio::test]
    async fn clear_token_is_idempotent() {
        let store = store_with(Arc::new(FixedProbe(vec!["t"])));
        store.set_token("t").unwrap().unwrap().wait().await;
        store.set_display_identifier("alice").unwrap();

        store.clear_token().unwrap();
        let once = store.snapshot();
        store.clear_token().unwrap();
        let twice = store.snapshot();

        assert_eq!(once, SessionSnapshot::default());
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn writes_go_through_to_storage() {
        let storage = Arc::new(MemoryStore::new());
        let store = SessionStore::load(
            Box::new(storage.clone()),
            Arc::new(FixedProbe(vec!["abc"])),
        )
        .unwrap();

        store.set_token("abc").unwrap().unwrap().wait().await;
        store.set_display_identifier("alice").unwrap();
        assert_eq!(storage.get(KEY_TOKEN).unwrap().as_deref(), Some("abc"));
        assert_eq!(storage.get(KEY_IS_ADMIN).unwrap().as_deref(), Some("true"));
        assert_eq!(
            storage.get(KEY_DISPLAY_IDENTIFIER).unwrap().as_deref(),
            Some("alice")
        );

        store.clear_token().unwrap();
        assert_eq!(storage.get(KEY_TOKEN).unwrap().as_deref(), Some(""));
        assert_eq!(storage.get(KEY_IS_ADMIN).unwrap().as_deref(), Some("false"));
        assert_eq!(storage.get(KEY_DISPLAY_IDENTIFIER).unwrap().as_deref(), Some(""));
    }

    #[test]
    fn restored_flag_requires_a_token() {
        let storage = MemoryStore::with_entries([(KEY_TOKEN, ""), (KEY_IS_ADMIN, "true")]);
        let store = SessionStore::load(Box::new(storage), Arc::new(FixedProbe(vec![]))).unwrap();
        assert!(!store.is_admin());
    }

    #[test]
    fn no_runtime_skips_probe() {
        let store = store_with(Arc::new(FixedProbe(vec!["t"])));
        assert!(store.set_token("t").unwrap().is_none());
        assert_eq!(store.token(), "t");
        assert!(!store.is_admin());
    }

    #[tokio::test]
    async fn subscribers_see_every_change() {
        let store = store_with(Arc::new(FixedProbe(vec!["t"])));
        let mut rx = store.subscribe();

        store.set_token("t").unwrap().unwrap().wait().await;
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().token, "t");

        store.clear_token().unwrap();
        rx.changed().await.unwrap();
        assert!(!rx.borrow().is_signed_in());
    }
}
