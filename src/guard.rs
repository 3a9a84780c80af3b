use tokio::sync::watch;

use crate::models::SessionSnapshot;

/// Access
///
/// The guard requirement attached to a route. The three levels mirror the
/// route surface: anonymous pages, pages for any authenticated identity, and
/// pages for admins only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

/// GuardOutcome
///
/// The state machine of a single guarded render. `Checking` lasts only while
/// the session store has not finished its startup restore; afterwards every
/// evaluation lands in one of the three terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session restore still in flight: render nothing yet.
    Checking,
    /// Render the wrapped content.
    Allow,
    /// No identity present: redirect to the login entry point, replacing
    /// history so back-navigation does not return to the guarded page.
    RedirectToLogin,
    /// Identity present but the admin requirement is not met: redirect to the
    /// neutral home page.
    RedirectHome,
}

/// evaluate
///
/// Pure decision function of the route guard: a function of the current
/// session snapshot and the route's access level, nothing else. Public routes
/// always render, even during the restore window.
pub fn evaluate(snapshot: &SessionSnapshot, access: Access) -> GuardOutcome {
    if access == Access::Public {
        return GuardOutcome::Allow;
    }
    if snapshot.loading {
        return GuardOutcome::Checking;
    }
    if !snapshot.is_authenticated() {
        return GuardOutcome::RedirectToLogin;
    }
    if access == Access::Admin && !snapshot.is_admin() {
        return GuardOutcome::RedirectHome;
    }
    GuardOutcome::Allow
}

/// RouteGuard
///
/// The reactive wrapper around [`evaluate`]: it holds a live subscription to
/// the session store, so a guarded page is re-gated on every identity change
/// rather than checked once at mount. A logout while the page is showing
/// surfaces as the next denial from [`changes`].
///
/// [`changes`]: RouteGuard::changes
pub struct RouteGuard {
    session: watch::Receiver<SessionSnapshot>,
    access: Access,
}

impl RouteGuard {
    pub fn new(session: watch::Receiver<SessionSnapshot>, access: Access) -> Self {
        Self { session, access }
    }

    /// The outcome for the snapshot as of right now. May be `Checking`.
    pub fn current(&self) -> GuardOutcome {
        evaluate(&self.session.borrow(), self.access)
    }

    /// Waits out the `Checking` state and returns the first settled outcome.
    /// If the session store is gone (sender dropped during shutdown) the
    /// last observed snapshot decides.
    pub async fn resolve(&mut self) -> GuardOutcome {
        loop {
            let outcome = evaluate(&self.session.borrow_and_update(), self.access);
            if outcome != GuardOutcome::Checking {
                return outcome;
            }
            if self.session.changed().await.is_err() {
                return outcome;
            }
        }
    }

    /// Waits for the next session change and returns the re-evaluated
    /// outcome, or `None` when the session store has shut down. Callers loop
    /// on this to keep a mounted page gated.
    pub async fn changes(&mut self) -> Option<GuardOutcome> {
        if self.session.changed().await.is_err() {
            return None;
        }
        Some(evaluate(&self.session.borrow_and_update(), self.access))
    }
}
