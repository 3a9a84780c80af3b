use apps_portal::guard::Access;
use apps_portal::router::Route;

#[test]
fn every_declared_path_resolves_to_its_route() {
    assert_eq!(Route::resolve("/"), Route::Home);
    assert_eq!(Route::resolve("/about"), Route::About);
    assert_eq!(Route::resolve("/login"), Route::Login);
    assert_eq!(Route::resolve("/signup"), Route::Signup);
    assert_eq!(Route::resolve("/apps"), Route::Apps);
    assert_eq!(Route::resolve("/apps/42"), Route::AppDetail("42".to_string()));
    assert_eq!(Route::resolve("/settings"), Route::Settings);
    assert_eq!(Route::resolve("/settings/deployment"), Route::SettingsDeployment);
    assert_eq!(Route::resolve("/settings/auth"), Route::SettingsAuth);
    assert_eq!(Route::resolve("/settings/admin"), Route::SettingsAdmin);
}

#[test]
fn trailing_slashes_are_tolerated() {
    assert_eq!(Route::resolve("/apps/"), Route::Apps);
    assert_eq!(Route::resolve("/settings/admin/"), Route::SettingsAdmin);
    assert_eq!(Route::resolve(""), Route::Home);
}

#[test]
fn unmatched_paths_collapse_into_not_found() {
    assert_eq!(Route::resolve("/nope"), Route::NotFound);
    assert_eq!(Route::resolve("/apps/42/reviews"), Route::NotFound);
    assert_eq!(Route::resolve("/settings/unknown"), Route::NotFound);
    assert_eq!(Route::resolve("/admin"), Route::NotFound);
}

#[test]
fn access_levels_match_the_route_surface() {
    assert_eq!(Route::Home.access(), Access::Public);
    assert_eq!(Route::About.access(), Access::Public);
    assert_eq!(Route::Login.access(), Access::Public);
    assert_eq!(Route::Signup.access(), Access::Public);
    assert_eq!(Route::NotFound.access(), Access::Public);

    assert_eq!(Route::Apps.access(), Access::Authenticated);
    assert_eq!(Route::AppDetail("1".to_string()).access(), Access::Authenticated);
    assert_eq!(Route::Settings.access(), Access::Authenticated);
    assert_eq!(Route::SettingsDeployment.access(), Access::Authenticated);
    assert_eq!(Route::SettingsAuth.access(), Access::Authenticated);

    assert_eq!(Route::SettingsAdmin.access(), Access::Admin);
}

#[test]
fn canonical_paths_round_trip_through_resolve() {
    let routes = [
        Route::Home,
        Route::About,
        Route::Login,
        Route::Signup,
        Route::Apps,
        Route::AppDetail("3".to_string()),
        Route::Settings,
        Route::SettingsDeployment,
        Route::SettingsAuth,
        Route::SettingsAdmin,
    ];

    for route in routes {
        assert_eq!(Route::resolve(&route.path()), route);
    }
}
