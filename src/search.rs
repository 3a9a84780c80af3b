use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::{catalog::CatalogState, models::ResultSet};

/// Debouncer
///
/// Turns a rapidly changing raw input into a committed value: the committed
/// channel receives the raw value only once it has been stable for the
/// configured delay. Any newer raw value arriving before the delay elapses
/// aborts the pending commit and restarts the timer.
///
/// The pending timer is an owned, cancellable task handle; dropping the
/// debouncer aborts it, so no commit fires after teardown.
pub struct Debouncer {
    delay: Duration,
    committed: watch::Sender<String>,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        let (committed, _) = watch::channel(String::new());
        Self {
            delay,
            committed,
            pending: None,
        }
    }

    /// Feeds a new raw value. Cancels any pending commit and schedules this
    /// value to commit after the full delay.
    pub fn input(&mut self, raw: &str) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let tx = self.committed.clone();
        let delay = self.delay;
        let value = raw.to_owned();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tx.send_replace(value);
        }));
    }

    /// Subscribes to committed values. The channel starts out holding the
    /// empty string; only commits after subscription wake the receiver.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.committed.subscribe()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

/// SearchController
///
/// The debounced query controller for the apps listing: raw keystrokes go in
/// through [`set_input`], debounce-committed queries drive fetches against the
/// catalog facade, and completed [`ResultSet`]s come out on a watch channel.
///
/// Completions are not guaranteed to arrive in request order, so every fetch
/// is tagged with a monotonically increasing sequence number and its result is
/// applied only while that sequence is still the latest issued — a stale
/// response can never overwrite a newer one.
///
/// The facade's own empty-query policy applies: a committed empty or
/// whitespace-only query yields the unfiltered full list, not an empty one.
///
/// [`set_input`]: SearchController::set_input
pub struct SearchController {
    debouncer: Debouncer,
    results: watch::Receiver<Option<ResultSet>>,
    driver: JoinHandle<()>,
}

impl SearchController {
    pub fn new(catalog: CatalogState, delay: Duration) -> Self {
        let debouncer = Debouncer::new(delay);
        let mut committed = debouncer.subscribe();
        let (results_tx, results) = watch::channel(None);
        let latest = Arc::new(AtomicU64::new(0));

        // Driver task: one iteration per committed query. The fetch itself is
        // spawned off so a slow facade call never delays the next commit.
        let driver = tokio::spawn(async move {
            while committed.changed().await.is_ok() {
                let query = committed.borrow_and_update().clone();
                let seq = latest.fetch_add(1, Ordering::SeqCst) + 1;

                let catalog = Arc::clone(&catalog);
                let latest = Arc::clone(&latest);
                let tx = results_tx.clone();
                tokio::spawn(async move {
                    let records = catalog.search(&query).await;
                    if latest.load(Ordering::SeqCst) == seq {
                        // Send fails only once every receiver is gone, i.e.
                        // the page was torn down; the result is then dropped
                        // instead of being applied to disposed state.
                        let _ = tx.send(Some(ResultSet { query, records }));
                    } else {
                        tracing::trace!(seq, %query, "discarding superseded search result");
                    }
                });
            }
        });

        Self {
            debouncer,
            results,
            driver,
        }
    }

    /// Feeds the current raw input value. The fetch fires only once the value
    /// has been stable for the debounce delay.
    pub fn set_input(&mut self, raw: &str) {
        self.debouncer.input(raw);
    }

    /// A receiver over the displayed result set. Holds `None` until the first
    /// fetch completes, then always the latest applied [`ResultSet`].
    pub fn results(&self) -> watch::Receiver<Option<ResultSet>> {
        self.results.clone()
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.driver.abort();
    }
}
