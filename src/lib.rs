//! Client core of the demo apps portal: the session state machine, the
//! route-guarding surface, the debounced search controller, and the mock data
//! facade behind them. Pages and visual components are external collaborators;
//! everything here is the state they consume.

use std::sync::Arc;

// --- Module Structure ---

// Core application services and components.
pub mod app;
pub mod catalog;
pub mod config;
pub mod guard;
pub mod models;
pub mod nav;
pub mod router;
pub mod search;
pub mod session;
pub mod storage;

// --- Public Re-exports ---

// Makes the core state types easily accessible to the entry point (main.rs).
pub use app::AppShell;
pub use catalog::{AppsCatalog, CatalogState, MockCatalog};
pub use config::{AppConfig, Env};
pub use nav::{HistoryNavigator, NavState, Navigator};
pub use router::Route;
pub use search::SearchController;
pub use session::AuthService;
pub use storage::{FileStorage, MemoryStorage, StorageState};

/// AppState
///
/// The single container holding all shared services and configuration. Built
/// once at startup and threaded to whatever consumes the core — there is no
/// global mutable state anywhere below it.
#[derive(Clone)]
pub struct AppState {
    /// Session store and auth facade.
    pub session: Arc<AuthService>,
    /// Data access facade for the apps listing.
    pub catalog: CatalogState,
    /// Navigation primitive (history stack).
    pub nav: NavState,
    /// The loaded, immutable configuration.
    pub config: AppConfig,
}

/// build_state
///
/// Assembles the application state from a configuration: file-backed storage
/// under the configured directory, the seeded auth facade on top of it, the
/// mock catalog with its latency scale, and a fresh history stack. The caller
/// still owns the lifecycle: run `state.session.restore()` once before
/// rendering anything guarded.
pub fn build_state(config: AppConfig) -> AppState {
    let storage: StorageState = Arc::new(FileStorage::new(&config.storage_dir));
    let session = Arc::new(AuthService::new(storage, config.auth_latency));
    let catalog: CatalogState = Arc::new(MockCatalog::with_latency_percent(config.latency_percent));
    let nav: NavState = Arc::new(HistoryNavigator::new());

    AppState {
        session,
        catalog,
        nav,
        config,
    }
}
