use std::sync::Arc;
use std::time::Duration;

use apps_portal::{
    app::AppShell,
    nav::{HistoryNavigator, NavState, Navigator},
    router::Route,
    session::{AuthService, STORAGE_KEY},
    storage::{MemoryStorage, StorageState},
};

struct Fixture {
    storage: Arc<MemoryStorage>,
    session: Arc<AuthService>,
    nav: Arc<HistoryNavigator>,
    shell: AppShell,
}

fn fixture() -> Fixture {
    let storage = Arc::new(MemoryStorage::new());
    let session = Arc::new(AuthService::new(
        Arc::clone(&storage) as StorageState,
        Duration::ZERO,
    ));
    let nav = Arc::new(HistoryNavigator::new());
    let shell = AppShell::new(Arc::clone(&session), Arc::clone(&nav) as NavState);
    Fixture {
        storage,
        session,
        nav,
        shell,
    }
}

#[tokio::test]
async fn anonymous_navigation_to_a_guarded_page_redirects_to_login() {
    let f = fixture();
    f.session.restore().await;

    let rendered = f.shell.navigate("/apps").await;

    assert_eq!(rendered, Route::Login);
    assert_eq!(f.shell.current_route(), Route::Login);
    assert_eq!(f.nav.current(), "/login");
}

#[tokio::test]
async fn the_denied_page_is_not_reachable_via_back() {
    let f = fixture();
    f.session.restore().await;

    f.shell.navigate("/apps").await;
    // The redirect replaced the "/apps" entry, so back lands on home.
    let rendered = f.shell.back().await;

    assert_eq!(rendered, Route::Home);
    assert_eq!(f.nav.current(), "/");
}

#[tokio::test]
async fn public_routes_render_for_anonymous_sessions() {
    let f = fixture();
    f.session.restore().await;

    assert_eq!(f.shell.navigate("/about").await, Route::About);
    assert_eq!(f.shell.navigate("/nope").await, Route::NotFound);
}

#[tokio::test]
async fn a_signed_in_user_reaches_guarded_pages() {
    let f = fixture();
    f.session.restore().await;
    assert!(f.session.login("user@demo.com", "user123").await);

    assert_eq!(f.shell.navigate("/apps").await, Route::Apps);
    assert_eq!(
        f.shell.navigate("/apps/2").await,
        Route::AppDetail("2".to_string())
    );
    assert_eq!(f.shell.navigate("/settings/auth").await, Route::SettingsAuth);
}

#[tokio::test]
async fn non_admins_are_bounced_home_from_the_admin_panel() {
    let f = fixture();
    f.session.restore().await;
    assert!(f.session.login("user@demo.com", "user123").await);

    let rendered = f.shell.navigate("/settings/admin").await;

    assert_eq!(rendered, Route::Home);
    assert_eq!(f.nav.current(), "/");
}

#[tokio::test]
async fn admins_reach_the_admin_panel() {
    let f = fixture();
    f.session.restore().await;
    assert!(f.session.login("admin@demo.com", "admin123").await);

    assert_eq!(f.shell.navigate("/settings/admin").await, Route::SettingsAdmin);
}

#[tokio::test]
async fn logout_on_a_guarded_page_redirects_immediately_on_recheck() {
    let f = fixture();
    f.session.restore().await;
    assert!(f.session.login("user@demo.com", "user123").await);
    assert_eq!(f.shell.navigate("/apps").await, Route::Apps);

    f.session.logout();

    assert_eq!(f.shell.recheck(), Some(Route::Login));
    assert_eq!(f.shell.current_route(), Route::Login);
    assert_eq!(f.nav.current(), "/login");
}

#[tokio::test]
async fn recheck_is_a_no_op_while_the_page_is_still_allowed() {
    let f = fixture();
    f.session.restore().await;
    assert!(f.session.login("user@demo.com", "user123").await);
    f.shell.navigate("/apps").await;

    assert_eq!(f.shell.recheck(), None);
    assert_eq!(f.shell.current_route(), Route::Apps);
}

#[tokio::test]
async fn navigation_issued_during_restore_settles_on_the_restored_identity() {
    let f = fixture();
    // A persisted admin identity from a previous run.
    let admin = apps_portal::models::Identity {
        id: uuid::Uuid::from_u128(1),
        email: "admin@demo.com".to_string(),
        name: "Admin User".to_string(),
        role: apps_portal::models::Role::Admin,
    };
    f.storage
        .seed(STORAGE_KEY, &serde_json::to_string(&admin).unwrap());

    // The navigation starts while loading=true and must wait, not deny.
    let (rendered, ()) = tokio::join!(f.shell.navigate("/settings/admin"), f.session.restore());

    assert_eq!(rendered, Route::SettingsAdmin);
}
