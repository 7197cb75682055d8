//! Injectable session context.
//!
//! [`SessionContext`] holds the one piece of shared state the gate reads:
//! the current [`AuthState`]. The authentication layer publishes into it;
//! gates and route guards read from it. Passing it explicitly (usually as
//! `Arc<SessionContext>`) lets a test run several principals side by side.
//!
//! # Bootstrap Ordering
//!
//! ```text
//! begin_bootstrap() ─► ticket #1 ──────────────┐ (slow)
//! begin_bootstrap() ─► ticket #2 ──┐           │
//!                                  ▼           ▼
//!                    complete(#2) Applied   complete(#1) Stale
//! ```
//!
//! Each bootstrap gets a sequence number at issue time. A completion is
//! applied only while its ticket is still the latest issued one; `logout`
//! and `on_session_invalid` also advance the sequence, so an in-flight
//! login cannot resurrect a session that was ended after it started.

use parking_lot::RwLock;
use permgate_auth::AuthState;
use permgate_types::{Principal, SessionId};
use std::sync::Arc;

/// Proof that a bootstrap was started, carrying its issue sequence.
///
/// Tickets are not `Clone`; each bootstrap completes at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct BootstrapTicket {
    seq: u64,
}

impl BootstrapTicket {
    /// The sequence number assigned at issue time.
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What the authentication layer determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// A valid principal snapshot.
    Authenticated(Principal),
    /// No valid session.
    Unauthenticated,
}

/// Whether a completion was published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapApplied {
    /// Published as the current state.
    Applied,
    /// Superseded by a newer bootstrap or a logout; discarded.
    Stale,
}

#[derive(Debug)]
struct Published {
    state: Arc<AuthState>,
    session_id: Option<SessionId>,
    latest_seq: u64,
}

/// Current authentication state, replaced atomically.
///
/// Readers get an `Arc<AuthState>` and evaluate against that immutable
/// value; writers swap the whole `Arc`. Nothing is mutated in place while
/// a reader holds it.
///
/// # Example
///
/// ```
/// use permgate_runtime::auth::{BootstrapApplied, BootstrapOutcome, SessionContext};
/// use permgate_types::{Principal, PrincipalId};
///
/// let ctx = SessionContext::new();
/// assert!(ctx.snapshot().is_loading());
///
/// let slow = ctx.begin_bootstrap();
/// let fast = ctx.begin_bootstrap();
///
/// let alice = Principal::new(PrincipalId::new("alice"), "Alice");
/// let bob = Principal::new(PrincipalId::new("bob"), "Bob");
///
/// assert_eq!(ctx.complete_bootstrap(fast, BootstrapOutcome::Authenticated(bob)), BootstrapApplied::Applied);
/// assert_eq!(ctx.complete_bootstrap(slow, BootstrapOutcome::Authenticated(alice)), BootstrapApplied::Stale);
///
/// assert_eq!(ctx.snapshot().principal().map(|p| p.id.as_str()), Some("bob"));
/// ```
#[derive(Debug)]
pub struct SessionContext {
    inner: RwLock<Published>,
}

impl SessionContext {
    /// Creates a context in the `Loading` state (page load, nothing known yet).
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(AuthState::Loading)
    }

    /// Creates a context with a known initial state.
    #[must_use]
    pub fn with_state(state: AuthState) -> Self {
        let session_id = state.is_authenticated().then(SessionId::new);
        Self {
            inner: RwLock::new(Published {
                state: Arc::new(state),
                session_id,
                latest_seq: 0,
            }),
        }
    }

    /// Creates a context already authenticated as `principal`.
    #[must_use]
    pub fn authenticated(principal: Principal) -> Self {
        Self::with_state(AuthState::authenticated(principal))
    }

    /// Returns the current state.
    #[must_use]
    pub fn snapshot(&self) -> Arc<AuthState> {
        Arc::clone(&self.inner.read().state)
    }

    /// Returns the current state together with its session id.
    #[must_use]
    pub fn snapshot_with_id(&self) -> (Arc<AuthState>, Option<SessionId>) {
        let inner = self.inner.read();
        (Arc::clone(&inner.state), inner.session_id)
    }

    /// Returns the id stamped on the current authenticated snapshot.
    #[must_use]
    pub fn session_id(&self) -> Option<SessionId> {
        self.inner.read().session_id
    }

    /// Starts a bootstrap and moves the state to `Loading`.
    ///
    /// Any bootstrap issued earlier becomes stale.
    #[must_use = "the ticket is needed to complete the bootstrap"]
    pub fn begin_bootstrap(&self) -> BootstrapTicket {
        let mut inner = self.inner.write();
        inner.latest_seq += 1;
        inner.state = Arc::new(AuthState::Loading);
        inner.session_id = None;
        tracing::debug!(seq = inner.latest_seq, "auth bootstrap started");
        BootstrapTicket {
            seq: inner.latest_seq,
        }
    }

    /// Publishes a bootstrap result if the ticket is still the latest.
    pub fn complete_bootstrap(
        &self,
        ticket: BootstrapTicket,
        outcome: BootstrapOutcome,
    ) -> BootstrapApplied {
        let mut inner = self.inner.write();
        if ticket.seq != inner.latest_seq {
            tracing::info!(
                seq = ticket.seq,
                latest = inner.latest_seq,
                "discarding stale auth bootstrap"
            );
            return BootstrapApplied::Stale;
        }

        match outcome {
            BootstrapOutcome::Authenticated(principal) => {
                let session_id = SessionId::new();
                tracing::debug!(
                    seq = ticket.seq,
                    principal = %principal.id,
                    admin = principal.is_admin,
                    grants = principal.permissions.len(),
                    session = %session_id,
                    "auth bootstrap authenticated"
                );
                inner.state = Arc::new(AuthState::authenticated(principal));
                inner.session_id = Some(session_id);
            }
            BootstrapOutcome::Unauthenticated => {
                tracing::debug!(seq = ticket.seq, "auth bootstrap unauthenticated");
                inner.state = Arc::new(AuthState::Unauthenticated);
                inner.session_id = None;
            }
        }
        BootstrapApplied::Applied
    }

    /// Begins and completes a bootstrap in one step.
    pub fn sign_in(&self, principal: Principal) -> BootstrapApplied {
        let ticket = self.begin_bootstrap();
        self.complete_bootstrap(ticket, BootstrapOutcome::Authenticated(principal))
    }

    /// Clears the session. Supersedes any in-flight bootstrap.
    pub fn logout(&self) {
        self.end_session("logout");
    }

    /// Clears the session after the backend reported it invalid (for
    /// example an authorization failure on an unrelated request).
    pub fn on_session_invalid(&self) {
        self.end_session("session invalid");
    }

    fn end_session(&self, cause: &'static str) {
        let mut inner = self.inner.write();
        inner.latest_seq += 1;
        if let Some(principal) = inner.state.principal() {
            tracing::info!(principal = %principal.id, cause, "session cleared");
        }
        inner.state = Arc::new(AuthState::Unauthenticated);
        inner.session_id = None;
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permgate_types::PrincipalId;

    fn principal(id: &str) -> Principal {
        Principal::new(PrincipalId::new(id), id)
    }

    fn current_id(ctx: &SessionContext) -> Option<String> {
        ctx.snapshot().principal().map(|p| p.id.to_string())
    }

    #[test]
    fn starts_loading() {
        let ctx = SessionContext::new();
        assert!(ctx.snapshot().is_loading());
        assert!(ctx.session_id().is_none());
    }

    #[test]
    fn sign_in_publishes_principal_and_session_id() {
        let ctx = SessionContext::new();
        assert_eq!(ctx.sign_in(principal("alice")), BootstrapApplied::Applied);
        assert_eq!(current_id(&ctx).as_deref(), Some("alice"));
        assert!(ctx.session_id().is_some());
    }

    #[test]
    fn begin_bootstrap_moves_to_loading() {
        let ctx = SessionContext::authenticated(principal("alice"));
        let _ticket = ctx.begin_bootstrap();
        assert!(ctx.snapshot().is_loading());
    }

    #[test]
    fn stale_completion_is_discarded() {
        let ctx = SessionContext::new();
        let first = ctx.begin_bootstrap();
        let second = ctx.begin_bootstrap();
        assert!(first.seq() < second.seq());

        assert_eq!(
            ctx.complete_bootstrap(second, BootstrapOutcome::Authenticated(principal("bob"))),
            BootstrapApplied::Applied
        );
        assert_eq!(
            ctx.complete_bootstrap(first, BootstrapOutcome::Authenticated(principal("alice"))),
            BootstrapApplied::Stale
        );
        assert_eq!(current_id(&ctx).as_deref(), Some("bob"));
    }

    #[test]
    fn older_completion_ignored_even_before_newer_finishes() {
        let ctx = SessionContext::new();
        let first = ctx.begin_bootstrap();
        let _second = ctx.begin_bootstrap();

        assert_eq!(
            ctx.complete_bootstrap(first, BootstrapOutcome::Authenticated(principal("alice"))),
            BootstrapApplied::Stale
        );
        assert!(ctx.snapshot().is_loading());
    }

    #[test]
    fn logout_supersedes_in_flight_bootstrap() {
        let ctx = SessionContext::new();
        let ticket = ctx.begin_bootstrap();
        ctx.logout();

        assert_eq!(
            ctx.complete_bootstrap(ticket, BootstrapOutcome::Authenticated(principal("alice"))),
            BootstrapApplied::Stale
        );
        assert!(ctx.snapshot().is_unauthenticated());
    }

    #[test]
    fn session_invalid_clears_principal() {
        let ctx = SessionContext::authenticated(principal("alice"));
        assert!(ctx.session_id().is_some());

        ctx.on_session_invalid();
        assert!(ctx.snapshot().is_unauthenticated());
        assert!(ctx.session_id().is_none());
    }

    #[test]
    fn unauthenticated_outcome_is_published() {
        let ctx = SessionContext::new();
        let ticket = ctx.begin_bootstrap();
        assert_eq!(
            ctx.complete_bootstrap(ticket, BootstrapOutcome::Unauthenticated),
            BootstrapApplied::Applied
        );
        assert!(ctx.snapshot().is_unauthenticated());
    }

    #[test]
    fn readers_keep_their_snapshot_across_replacement() {
        let ctx = SessionContext::authenticated(principal("alice"));
        let held = ctx.snapshot();

        ctx.sign_in(principal("bob"));

        assert_eq!(held.principal().map(|p| p.id.as_str()), Some("alice"));
        assert_eq!(current_id(&ctx).as_deref(), Some("bob"));
    }

    #[test]
    fn shared_across_threads() {
        let ctx = Arc::new(SessionContext::authenticated(principal("alice")));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ctx = Arc::clone(&ctx);
                std::thread::spawn(move || ctx.snapshot().is_authenticated())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().expect("reader thread"));
        }
    }
}
