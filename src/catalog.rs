use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{AppRecord, AppStatus};

/// AppsCatalog
///
/// Defines the abstract contract for app-listing data access. The core only
/// ever talks to this trait; the shipped implementation is the in-memory mock
/// below, but a page or test can substitute its own (e.g., one with
/// per-query latency to provoke out-of-order completions).
///
/// Every operation eventually resolves — absence is expressed as an empty
/// list or `None`, never as an error.
#[async_trait]
pub trait AppsCatalog: Send + Sync {
    /// Returns all records in their original order.
    async fn list(&self) -> Vec<AppRecord>;

    /// Returns the record with the given id, or `None` when it does not
    /// exist. The caller renders `None` as a not-found view.
    async fn get_by_id(&self, id: &str) -> Option<AppRecord>;

    /// Case-insensitive substring match against name, description, and
    /// category. An empty or whitespace-only query returns the full list.
    async fn search(&self, query: &str) -> Vec<AppRecord>;
}

/// CatalogState
///
/// The concrete type used to share the catalog facade across the application
/// state.
pub type CatalogState = Arc<dyn AppsCatalog>;

// Simulated per-operation latencies, from the original service.
const LIST_LATENCY: Duration = Duration::from_millis(800);
const GET_LATENCY: Duration = Duration::from_millis(500);
const SEARCH_LATENCY: Duration = Duration::from_millis(600);

/// MockCatalog
///
/// The in-memory catalog: a fixed six-record table plus artificial latency on
/// every call. No real I/O happens anywhere below this facade.
pub struct MockCatalog {
    records: Vec<AppRecord>,
    /// Scale applied to the per-operation latencies, in percent. 100 keeps
    /// the original timings; 0 resolves immediately (used by most tests).
    latency_percent: u32,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::with_latency_percent(100)
    }

    pub fn with_latency_percent(latency_percent: u32) -> Self {
        Self {
            records: mock_apps(),
            latency_percent,
        }
    }

    async fn simulate(&self, base: Duration) {
        let scaled = base.mul_f64(f64::from(self.latency_percent) / 100.0);
        if !scaled.is_zero() {
            tokio::time::sleep(scaled).await;
        }
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppsCatalog for MockCatalog {
    async fn list(&self) -> Vec<AppRecord> {
        self.simulate(LIST_LATENCY).await;
        self.records.clone()
    }

    async fn get_by_id(&self, id: &str) -> Option<AppRecord> {
        self.simulate(GET_LATENCY).await;
        self.records.iter().find(|app| app.id == id).cloned()
    }

    async fn search(&self, query: &str) -> Vec<AppRecord> {
        self.simulate(SEARCH_LATENCY).await;

        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.clone();
        }

        self.records
            .iter()
            .filter(|app| {
                app.name.to_lowercase().contains(&needle)
                    || app.description.to_lowercase().contains(&needle)
                    || app.category.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }
}

/// The fixed mock dataset backing the apps listing.
fn mock_apps() -> Vec<AppRecord> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    vec![
        AppRecord {
            id: "1".to_string(),
            name: "TaskMaster Pro".to_string(),
            description: "Advanced task management application with team collaboration features."
                .to_string(),
            version: "2.1.4".to_string(),
            status: AppStatus::Active,
            category: "Productivity".to_string(),
            last_updated: date(2024, 1, 15),
            icon: "📋".to_string(),
            downloads: 15420,
            rating: 4.7,
        },
        AppRecord {
            id: "2".to_string(),
            name: "CloudSync".to_string(),
            description: "Seamless file synchronization across all your devices.".to_string(),
            version: "1.8.2".to_string(),
            status: AppStatus::Active,
            category: "Storage".to_string(),
            last_updated: date(2024, 1, 12),
            icon: "☁️".to_string(),
            downloads: 8930,
            rating: 4.5,
        },
        AppRecord {
            id: "3".to_string(),
            name: "DataViz Studio".to_string(),
            description: "Create stunning data visualizations and interactive dashboards."
                .to_string(),
            version: "3.0.1".to_string(),
            status: AppStatus::Maintenance,
            category: "Analytics".to_string(),
            last_updated: date(2024, 1, 10),
            icon: "📊".to_string(),
            downloads: 5672,
            rating: 4.8,
        },
        AppRecord {
            id: "4".to_string(),
            name: "SecureVault".to_string(),
            description: "Enterprise-grade password manager with zero-knowledge encryption."
                .to_string(),
            version: "1.5.7".to_string(),
            status: AppStatus::Active,
            category: "Security".to_string(),
            last_updated: date(2024, 1, 14),
            icon: "🔒".to_string(),
            downloads: 12340,
            rating: 4.9,
        },
        AppRecord {
            id: "5".to_string(),
            name: "StreamFlow".to_string(),
            description: "Real-time data processing and stream analytics platform.".to_string(),
            version: "2.3.0".to_string(),
            status: AppStatus::Inactive,
            category: "Analytics".to_string(),
            last_updated: date(2024, 1, 8),
            icon: "🌊".to_string(),
            downloads: 3456,
            rating: 4.2,
        },
        AppRecord {
            id: "6".to_string(),
            name: "NotesHub".to_string(),
            description: "Smart note-taking app with AI-powered organization.".to_string(),
            version: "1.2.9".to_string(),
            status: AppStatus::Active,
            category: "Productivity".to_string(),
            last_updated: date(2024, 1, 16),
            icon: "📝".to_string(),
            downloads: 9876,
            rating: 4.6,
        },
    ]
}
