use std::sync::{Arc, Mutex};

use crate::{
    guard::{GuardOutcome, RouteGuard, evaluate},
    nav::NavState,
    router::{HOME_PATH, LOGIN_PATH, Route},
    session::AuthService,
};

/// AppShell
///
/// Ties the router, the route guard, and the navigator together: every
/// navigation resolves the path to a route, gates it on the current session,
/// and either renders it or redirects. The shell also re-checks the mounted
/// route whenever the session changes, so a logout while a guarded page is
/// showing flips it to a redirect immediately instead of at the next
/// navigation.
pub struct AppShell {
    session: Arc<AuthService>,
    nav: NavState,
    current: Mutex<Route>,
}

impl AppShell {
    pub fn new(session: Arc<AuthService>, nav: NavState) -> Self {
        let current = Route::resolve(&nav.current());
        Self {
            session,
            nav,
            current: Mutex::new(current),
        }
    }

    /// The route currently mounted.
    pub fn current_route(&self) -> Route {
        self.current
            .lock()
            .map(|route| route.clone())
            .unwrap_or(Route::NotFound)
    }

    /// navigate
    ///
    /// Follows a link: pushes the path onto the history, then runs the guard.
    /// Waits out the session store's restore window first, so a navigation
    /// issued right at startup settles on the restored identity rather than
    /// the empty one. Returns the route actually rendered, which differs from
    /// the requested one exactly when the guard redirected.
    pub async fn navigate(&self, path: &str) -> Route {
        let route = Route::resolve(path);
        self.nav.push(path);
        self.apply_guard(route).await
    }

    /// Walks back one history entry and re-gates whatever it lands on.
    pub async fn back(&self) -> Route {
        match self.nav.back() {
            Some(path) => {
                let route = Route::resolve(&path);
                self.apply_guard(route).await
            }
            None => self.current_route(),
        }
    }

    /// recheck
    ///
    /// Re-evaluates the mounted route against the session as of now. Returns
    /// the redirect target when the page is no longer allowed, `None` when
    /// nothing changed. Driven by the caller's subscription to session
    /// changes.
    pub fn recheck(&self) -> Option<Route> {
        let route = self.current_route();
        match evaluate(&self.session.snapshot(), route.access()) {
            GuardOutcome::Allow | GuardOutcome::Checking => None,
            GuardOutcome::RedirectToLogin => Some(self.redirect(LOGIN_PATH)),
            GuardOutcome::RedirectHome => Some(self.redirect(HOME_PATH)),
        }
    }

    async fn apply_guard(&self, route: Route) -> Route {
        let mut guard = RouteGuard::new(self.session.subscribe(), route.access());
        let rendered = match guard.resolve().await {
            GuardOutcome::RedirectToLogin => {
                tracing::debug!(?route, "guard denied: not authenticated");
                self.redirect(LOGIN_PATH)
            }
            GuardOutcome::RedirectHome => {
                tracing::debug!(?route, "guard denied: admin role required");
                self.redirect(HOME_PATH)
            }
            // resolve() only yields Checking when the session store shut down
            // mid-restore; treat it as an anonymous denial in that case.
            GuardOutcome::Checking => self.redirect(LOGIN_PATH),
            GuardOutcome::Allow => route,
        };

        if let Ok(mut current) = self.current.lock() {
            *current = rendered.clone();
        }
        rendered
    }

    /// Replaces the current history entry, so the denied page is not
    /// reachable via back-navigation.
    fn redirect(&self, path: &str) -> Route {
        self.nav.replace(path);
        let route = Route::resolve(path);
        if let Ok(mut current) = self.current.lock() {
            *current = route.clone();
        }
        route
    }
}
