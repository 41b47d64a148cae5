//! ============================================================================
//! Access Gate - The view-selection state machine
//! ============================================================================
//! Transitions:
//!   connect     -> Verifying (status reset to Unknown)
//!   verdict ok  -> Holder | NonHolder
//!   verdict err -> NonHolder (fail closed, error kept for display/refresh)
//!   disconnect  -> Landing (status reset to Unknown)
//!
//! Verdicts carry the session id of the fetch that produced them; a verdict
//! for any other session is discarded, so rapid disconnect/reconnect cycles
//! cannot apply a stale result to the new session.
//! ============================================================================

use tracing::{debug, info, warn};

use super::types::{GateView, HolderSnapshot, HolderStatus};
use crate::session::SessionId;

/// A session-tagged verification outcome
#[derive(Debug, Clone)]
pub struct FetchVerdict {
    pub session: SessionId,
    pub outcome: Result<HolderSnapshot, String>,
}

impl FetchVerdict {
    pub fn ok(session: SessionId, snapshot: HolderSnapshot) -> Self {
        Self {
            session,
            outcome: Ok(snapshot),
        }
    }

    pub fn failed(session: SessionId, error: impl Into<String>) -> Self {
        Self {
            session,
            outcome: Err(error.into()),
        }
    }
}

/// The access gate state machine
#[derive(Debug, Default)]
pub struct AccessGate {
    session: Option<SessionId>,
    status: HolderStatus,
    snapshot: Option<HolderSnapshot>,
    last_error: Option<String>,
}

impl AccessGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A wallet connected: enter the verifying state for this session
    pub fn on_connect(&mut self, session: SessionId) {
        info!("Gate: session {} connected, verifying", session);
        self.session = Some(session);
        self.status = HolderStatus::Unknown;
        self.snapshot = None;
        self.last_error = None;
    }

    /// The wallet disconnected: back to landing, status reset
    pub fn on_disconnect(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Gate: session {} disconnected", session);
        }
        self.status = HolderStatus::Unknown;
        self.snapshot = None;
        self.last_error = None;
    }

    /// Apply a verification verdict. Returns true if it was applied, false
    /// if it was stale (belongs to a session that is no longer live).
    pub fn apply_verdict(&mut self, verdict: FetchVerdict) -> bool {
        if self.session != Some(verdict.session) {
            debug!(
                "Gate: dropping stale verdict for session {} (current: {:?})",
                verdict.session, self.session
            );
            return false;
        }

        match verdict.outcome {
            Ok(snapshot) => {
                self.status = snapshot.status();
                info!(
                    "Gate: session {} verified as {:?} (balance {} raw)",
                    verdict.session, self.status, snapshot.balance
                );
                self.snapshot = Some(snapshot);
                self.last_error = None;
            }
            Err(error) => {
                // Fail closed: persistent RPC failure denies access rather
                // than leaving the user stuck on the verifying screen. A
                // refresh re-enters Verifying and retries.
                warn!(
                    "Gate: session {} verification failed, denying: {}",
                    verdict.session, error
                );
                self.status = HolderStatus::NonHolder;
                self.snapshot = None;
                self.last_error = Some(error);
            }
        }
        true
    }

    /// Re-enter the verifying state for the live session (manual refresh)
    pub fn on_refresh(&mut self) {
        if self.session.is_some() {
            debug!("Gate: refresh requested, re-verifying");
            self.status = HolderStatus::Unknown;
            self.last_error = None;
        }
    }

    /// The single view-selection switch
    pub fn view(&self) -> GateView {
        match (self.session.is_some(), self.status) {
            (false, _) => GateView::Landing,
            (true, HolderStatus::Unknown) => GateView::Verifying,
            (true, HolderStatus::Holder) => GateView::Holder,
            (true, HolderStatus::NonHolder) => GateView::NonHolder,
        }
    }

    pub fn status(&self) -> HolderStatus {
        self.status
    }

    pub fn session(&self) -> Option<SessionId> {
        self.session
    }

    pub fn snapshot(&self) -> Option<&HolderSnapshot> {
        self.snapshot.as_ref()
    }

    /// The error from the last failed verification, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionManager;

    const WALLET: &str = "72j257cEWGEaD3379m8w59bceMJDsqe3dCuaivXPF7RL";

    fn snapshot(is_holder: bool) -> HolderSnapshot {
        HolderSnapshot {
            balance: if is_holder { 5_000_000 } else { 0 },
            held_days: None,
            is_holder,
            checked_at: 0,
        }
    }

    fn connected_gate() -> (AccessGate, SessionId) {
        let mut mgr = SessionManager::new();
        let session = mgr.connect(WALLET).unwrap();
        let mut gate = AccessGate::new();
        gate.on_connect(session.id);
        (gate, session.id)
    }

    #[test]
    fn test_initial_view_is_landing() {
        let gate = AccessGate::new();
        assert_eq!(gate.view(), GateView::Landing);
    }

    #[test]
    fn test_connect_enters_verifying() {
        let (gate, _) = connected_gate();
        assert_eq!(gate.view(), GateView::Verifying);
        assert_eq!(gate.status(), HolderStatus::Unknown);
    }

    #[test]
    fn test_unknown_status_never_renders_holder_views() {
        // connected=true, status=Unknown must render Verifying only
        let (gate, _) = connected_gate();
        assert_ne!(gate.view(), GateView::Holder);
        assert_ne!(gate.view(), GateView::NonHolder);
        assert_eq!(gate.view(), GateView::Verifying);
    }

    #[test]
    fn test_holder_verdict() {
        let (mut gate, id) = connected_gate();
        assert!(gate.apply_verdict(FetchVerdict::ok(id, snapshot(true))));
        assert_eq!(gate.view(), GateView::Holder);
        assert_eq!(gate.status(), HolderStatus::Holder);
        assert!(gate.snapshot().is_some());
    }

    #[test]
    fn test_non_holder_verdict() {
        let (mut gate, id) = connected_gate();
        assert!(gate.apply_verdict(FetchVerdict::ok(id, snapshot(false))));
        assert_eq!(gate.view(), GateView::NonHolder);
    }

    #[test]
    fn test_disconnect_resets_to_landing_and_unknown() {
        let (mut gate, id) = connected_gate();
        gate.apply_verdict(FetchVerdict::ok(id, snapshot(true)));
        assert_eq!(gate.view(), GateView::Holder);

        gate.on_disconnect();
        assert_eq!(gate.view(), GateView::Landing);
        assert_eq!(gate.status(), HolderStatus::Unknown);
        assert!(gate.snapshot().is_none());
    }

    #[test]
    fn test_disconnected_renders_landing_regardless_of_prior_status() {
        let (mut gate, id) = connected_gate();
        gate.apply_verdict(FetchVerdict::ok(id, snapshot(true)));
        gate.on_disconnect();

        // No session: Landing, even though the last verdict said holder
        assert_eq!(gate.view(), GateView::Landing);
    }

    #[test]
    fn test_stale_verdict_is_dropped() {
        let mut mgr = SessionManager::new();
        let first = mgr.connect(WALLET).unwrap();

        let mut gate = AccessGate::new();
        gate.on_connect(first.id);

        // Disconnect and reconnect before the first fetch lands
        mgr.disconnect();
        gate.on_disconnect();
        let second = mgr.connect(WALLET).unwrap();
        gate.on_connect(second.id);

        // The stale verdict from the first session must not apply
        assert!(!gate.apply_verdict(FetchVerdict::ok(first.id, snapshot(true))));
        assert_eq!(gate.view(), GateView::Verifying);

        // The live session's verdict applies
        assert!(gate.apply_verdict(FetchVerdict::ok(second.id, snapshot(false))));
        assert_eq!(gate.view(), GateView::NonHolder);
    }

    #[test]
    fn test_verdict_after_disconnect_is_dropped() {
        let (mut gate, id) = connected_gate();
        gate.on_disconnect();

        assert!(!gate.apply_verdict(FetchVerdict::ok(id, snapshot(true))));
        assert_eq!(gate.view(), GateView::Landing);
    }

    #[test]
    fn test_failed_verdict_fails_closed() {
        let (mut gate, id) = connected_gate();
        assert!(gate.apply_verdict(FetchVerdict::failed(id, "connection refused")));

        assert_eq!(gate.view(), GateView::NonHolder);
        assert_eq!(gate.last_error(), Some("connection refused"));
        assert!(gate.snapshot().is_none());
    }

    #[test]
    fn test_refresh_re_enters_verifying() {
        let (mut gate, id) = connected_gate();
        gate.apply_verdict(FetchVerdict::failed(id, "timeout"));
        assert_eq!(gate.view(), GateView::NonHolder);

        gate.on_refresh();
        assert_eq!(gate.view(), GateView::Verifying);
        assert!(gate.last_error().is_none());
    }

    #[test]
    fn test_refresh_without_session_stays_landing() {
        let mut gate = AccessGate::new();
        gate.on_refresh();
        assert_eq!(gate.view(), GateView::Landing);
    }
}
