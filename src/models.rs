use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Identity & Session Schemas ---

/// Role
///
/// The RBAC field carried by every [`Identity`]. Serialized lowercase so the
/// persisted slot stays compatible with the original `{"role":"admin"}` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Identity
///
/// The authenticated user's role-bearing profile. Created on successful
/// login/signup, destroyed on logout, and owned exclusively by the session
/// store — no other component mutates it. This is also the exact shape written
/// to the persisted storage slot as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    /// The user's primary identifier.
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// SessionSnapshot
///
/// A nullable [`Identity`] plus a loading flag. `loading` is true only while
/// the startup restore of the persisted slot is still in flight; once restore
/// completes it is permanently false for the lifetime of the process.
///
/// The derived flags are pure functions of the snapshot rather than cached
/// fields, so they can never diverge from the identity they describe.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSnapshot {
    pub identity: Option<Identity>,
    pub loading: bool,
}

impl SessionSnapshot {
    /// True when an identity of any role is present.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// True only when the present identity carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.identity
            .as_ref()
            .is_some_and(|identity| identity.role == Role::Admin)
    }
}

/// CredentialRecord
///
/// One row of the mock user table: the login credentials alongside the
/// identity they resolve to. Append-only — signup pushes a new record, nothing
/// ever removes one. Purely a lookup table for the auth facade, not an
/// invariant-bearing entity.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub email: String,
    pub password: String,
    pub identity: Identity,
}

// --- Catalog Schemas ---

/// AppStatus
///
/// Lifecycle state of a listed application. Serialized lowercase to match the
/// original dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppStatus {
    Active,
    Inactive,
    Maintenance,
}

/// AppRecord
///
/// A single entry of the mock apps listing. Immutable once handed out by the
/// catalog facade; pages replace their whole record set on each fetch instead
/// of patching individual rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppRecord {
    /// Stable string id, used as the `/apps/:id` path segment.
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub status: AppStatus,
    pub category: String,
    pub last_updated: NaiveDate,
    pub icon: String,
    pub downloads: u64,
    pub rating: f32,
}

/// ResultSet
///
/// An ordered record set together with the committed query that produced it.
/// Replaced wholesale on every completed fetch; carrying the query lets the
/// display layer (and the tests) tell whose results it is showing.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    /// The committed query this set answers. Empty means the unfiltered list.
    pub query: String,
    pub records: Vec<AppRecord>,
}
