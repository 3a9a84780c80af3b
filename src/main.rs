use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apps_portal::{
    AppShell, AppState, Env, Route, SearchController, build_state,
    config::AppConfig,
    models::{AppRecord, ResultSet},
};

/// main
///
/// The asynchronous entry point for the demo client: initializes
/// configuration and logging, assembles the shared state, restores the
/// persisted session, and then drives the page shell from an interactive
/// stdin loop standing in for the browser's event loop.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // Prioritizes RUST_LOG, falling back to a sensible local default.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "apps_portal=debug".into());

    // 3. Initialize Logging based on Environment
    match config.env {
        Env::Local => {
            // LOCAL: Pretty print output for human readability.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // PROD: JSON format output for ingestion by log aggregators.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Demo portal starting in {:?} mode", config.env);

    // 4. State Assembly & Session Restore
    // The restore is the only asynchronous startup operation: until it
    // finishes, guards hold every protected page in the checking state.
    let state = build_state(config);
    state.session.restore().await;

    let shell = Arc::new(AppShell::new(
        Arc::clone(&state.session),
        Arc::clone(&state.nav),
    ));

    // 5. Event Loop
    render(&state, &shell.current_route()).await;
    println!("(type 'help' for commands)");
    run_event_loop(state, shell).await;
}

/// The cooperative event loop: user input, session changes, and arriving
/// search results are the only event sources, all multiplexed on one task.
async fn run_event_loop(state: AppState, shell: Arc<AppShell>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session_rx = state.session.subscribe();

    // The search controller exists only while the apps listing is mounted;
    // navigating away drops it, cancelling any pending debounce timer.
    let mut search: Option<SearchController> = None;
    let mut results_rx: Option<watch::Receiver<Option<ResultSet>>> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Ok(Some(line)) = line else { break };
                if !handle_command(&state, &shell, line.trim(), &mut search, &mut results_rx).await {
                    break;
                }
            }
            _ = session_rx.changed() => {
                // Reactive guard: the mounted page is re-gated on every
                // session change, not just at navigation time.
                if let Some(redirect) = shell.recheck() {
                    println!("-- session changed, redirected to {}", redirect.path());
                    mount(&state, &redirect, &mut search, &mut results_rx).await;
                }
            }
            () = results_changed(&mut results_rx) => {
                if let Some(rx) = &mut results_rx {
                    if let Some(set) = rx.borrow_and_update().clone() {
                        print_results(&set);
                    }
                }
            }
        }
    }
}

/// Waits for the next search result when the apps page is mounted; pends
/// forever otherwise so the select arm stays silent.
async fn results_changed(rx: &mut Option<watch::Receiver<Option<ResultSet>>>) {
    match rx {
        Some(rx) => {
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
        None => std::future::pending().await,
    }
}

/// Dispatches one console command. Returns false to quit.
async fn handle_command(
    state: &AppState,
    shell: &AppShell,
    line: &str,
    search: &mut Option<SearchController>,
    results_rx: &mut Option<watch::Receiver<Option<ResultSet>>>,
) -> bool {
    let mut parts = line.splitn(2, ' ');
    let command = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or_default();

    match command {
        "quit" | "exit" => return false,
        "help" => {
            println!("commands:");
            println!("  go <path>                navigate (e.g. go /apps)");
            println!("  back                     history back");
            println!("  login <email> <pass>     sign in");
            println!("  signup <email> <pass> <name>");
            println!("  logout                   sign out");
            println!("  search <text>            filter the apps listing");
            println!("  whoami                   show the current identity");
            println!("  quit");
        }
        "go" => {
            let rendered = shell.navigate(rest).await;
            mount(state, &rendered, search, results_rx).await;
        }
        "back" => {
            let rendered = shell.back().await;
            mount(state, &rendered, search, results_rx).await;
        }
        "login" => {
            let mut args = rest.split_whitespace();
            let (Some(email), Some(password)) = (args.next(), args.next()) else {
                println!("usage: login <email> <password>");
                return true;
            };
            if state.session.login(email, password).await {
                println!("signed in as {email}");
                if shell.current_route() == Route::Login {
                    let rendered = shell.navigate("/").await;
                    mount(state, &rendered, search, results_rx).await;
                }
            } else {
                println!("Invalid email or password");
            }
        }
        "signup" => {
            let mut args = rest.split_whitespace();
            let (Some(email), Some(password)) = (args.next(), args.next()) else {
                println!("usage: signup <email> <password> <name>");
                return true;
            };
            let name = args.collect::<Vec<_>>().join(" ");
            let name = if name.is_empty() { email } else { &name };
            if state.session.signup(email, password, name).await {
                println!("account created, signed in as {email}");
                if shell.current_route() == Route::Signup {
                    let rendered = shell.navigate("/").await;
                    mount(state, &rendered, search, results_rx).await;
                }
            } else {
                println!("An account with this email already exists");
            }
        }
        "logout" => {
            state.session.logout();
            println!("signed out");
        }
        "search" => {
            if let Some(controller) = search {
                controller.set_input(rest);
                println!("searching \"{rest}\"...");
            } else {
                println!("search is only available on /apps (try: go /apps)");
            }
        }
        "whoami" => match state.session.snapshot().identity {
            Some(identity) => {
                println!("{} <{}> ({:?})", identity.name, identity.email, identity.role);
            }
            None => println!("anonymous"),
        },
        "" => {}
        other => println!("unknown command: {other} (try 'help')"),
    }
    true
}

/// mount
///
/// Page-mount side effects for the rendered route: the apps listing gets an
/// initial unfiltered fetch plus a fresh search controller, every other route
/// tears the controller down.
async fn mount(
    state: &AppState,
    route: &Route,
    search: &mut Option<SearchController>,
    results_rx: &mut Option<watch::Receiver<Option<ResultSet>>>,
) {
    // Dropping the previous page's controller cancels its pending timer and
    // orphans any in-flight fetch.
    *search = None;
    *results_rx = None;

    render(state, route).await;

    if *route == Route::Apps {
        let records = state.catalog.list().await;
        print_results(&ResultSet {
            query: String::new(),
            records,
        });
        let controller = SearchController::new(Arc::clone(&state.catalog), state.config.debounce);
        *results_rx = Some(controller.results());
        *search = Some(controller);
    }
}

/// Textual stand-ins for the page bodies, which are out of scope for the
/// core. Only the data-bearing pages do any fetching.
async fn render(state: &AppState, route: &Route) {
    println!();
    match route {
        Route::Home => println!("[/] Welcome to the demo portal."),
        Route::About => println!("[/about] A demonstration client with mock data."),
        Route::Login => println!("[/login] Sign in (try: login user@demo.com user123)"),
        Route::Signup => println!("[/signup] Create an account."),
        Route::Apps => println!("[/apps] App listing — loading..."),
        Route::AppDetail(id) => match state.catalog.get_by_id(id).await {
            Some(app) => print_app(&app),
            None => println!("[/apps/{id}] App not found."),
        },
        Route::Settings => println!("[/settings] Deployment | Authentication | Admin"),
        Route::SettingsDeployment => println!("[/settings/deployment] Deployment settings."),
        Route::SettingsAuth => println!("[/settings/auth] Authentication settings."),
        Route::SettingsAdmin => println!("[/settings/admin] Admin settings."),
        Route::NotFound => println!("[404] Page not found."),
    }
}

fn print_results(set: &ResultSet) {
    if set.query.trim().is_empty() {
        println!("-- all apps ({}):", set.records.len());
    } else {
        println!("-- results for \"{}\" ({}):", set.query, set.records.len());
    }
    for app in &set.records {
        println!(
            "   {} {}  v{}  [{:?}]  {} — {}",
            app.icon, app.name, app.version, app.status, app.category, app.description
        );
    }
}

fn print_app(app: &AppRecord) {
    println!("[/apps/{}] {} {}", app.id, app.icon, app.name);
    println!("   {}", app.description);
    println!(
        "   v{}  [{:?}]  {}  ⭐ {}  ⬇ {}  updated {}",
        app.version, app.status, app.category, app.rating, app.downloads, app.last_updated
    );
}
