use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::watch;
use uuid::Uuid;

use crate::{
    models::{CredentialRecord, Identity, Role, SessionSnapshot},
    storage::StorageState,
};

/// The single persisted slot holding the JSON-serialized [`Identity`].
/// Read at startup, written on login/signup, deleted on logout.
pub const STORAGE_KEY: &str = "demo-auth-user";

/// seed_users
///
/// The two fixed entries of the mock credential table. The ids are stable so
/// an identity persisted in an earlier run still matches its credential record
/// after a restart.
fn seed_users() -> Vec<CredentialRecord> {
    vec![
        CredentialRecord {
            email: "admin@demo.com".to_string(),
            password: "admin123".to_string(),
            identity: Identity {
                id: Uuid::from_u128(1),
                email: "admin@demo.com".to_string(),
                name: "Admin User".to_string(),
                role: Role::Admin,
            },
        },
        CredentialRecord {
            email: "user@demo.com".to_string(),
            password: "user123".to_string(),
            identity: Identity {
                id: Uuid::from_u128(2),
                email: "user@demo.com".to_string(),
                name: "Regular User".to_string(),
                role: Role::User,
            },
        },
    ]
}

/// AuthService
///
/// The session store and auth facade in one object: it owns the current
/// [`Identity`], keeps the persisted slot consistent with it, and publishes
/// every change as a [`SessionSnapshot`] on a watch channel so route guards
/// re-evaluate reactively instead of sampling once.
///
/// Consistency rule: every mutating operation writes storage *before*
/// publishing the new snapshot, so outside the restore window a reader never
/// observes the in-memory identity and the persisted slot disagreeing.
pub struct AuthService {
    storage: StorageState,
    /// Mock user table. Append-only: signup pushes, nothing removes.
    users: Mutex<Vec<CredentialRecord>>,
    snapshot: watch::Sender<SessionSnapshot>,
    /// Simulated network latency applied to login and signup.
    latency: Duration,
}

impl AuthService {
    /// Constructs the service with the seeded credential table. The initial
    /// snapshot has `loading=true`: guards render nothing until [`restore`]
    /// has checked the persisted slot.
    ///
    /// [`restore`]: AuthService::restore
    pub fn new(storage: StorageState, latency: Duration) -> Self {
        let (snapshot, _) = watch::channel(SessionSnapshot {
            identity: None,
            loading: true,
        });
        Self {
            storage,
            users: Mutex::new(seed_users()),
            snapshot,
            latency,
        }
    }

    /// Subscribes to session changes. Every login/signup/logout (and the
    /// completing restore) is observable on the returned receiver.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot.subscribe()
    }

    /// Returns the current snapshot by value.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot.borrow().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.snapshot.borrow().is_admin()
    }

    /// restore
    ///
    /// Attempts to load a persisted identity from the storage slot. Fails
    /// soft on every path: a read error or a corrupt payload clears the slot
    /// and logs, it never propagates to the caller. Ends the loading window
    /// (`loading=false`) regardless of outcome. Run once at process start.
    pub async fn restore(&self) {
        let identity = match self.storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    tracing::warn!("discarding corrupt persisted identity: {e}");
                    self.clear_slot();
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("failed to read persisted identity: {e}");
                self.clear_slot();
                None
            }
        };

        if let Some(identity) = &identity {
            tracing::info!(email = %identity.email, "session restored from storage");
        }

        self.snapshot.send_replace(SessionSnapshot {
            identity,
            loading: false,
        });
    }

    /// login
    ///
    /// Simulates network latency, then looks for an exact email+password match
    /// in the credential table. On a match the identity is persisted and the
    /// new snapshot published; a mismatch is reported as `false`, never as an
    /// error.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        tokio::time::sleep(self.latency).await;

        let found = self.users.lock().map_or(None, |users| {
            users
                .iter()
                .find(|u| u.email == email && u.password == password)
                .map(|u| u.identity.clone())
        });

        let Some(identity) = found else {
            tracing::debug!(email, "login rejected: no credential match");
            return false;
        };

        self.persist(&identity);
        self.snapshot.send_replace(SessionSnapshot {
            identity: Some(identity),
            loading: false,
        });
        true
    }

    /// signup
    ///
    /// Simulates latency, refuses duplicate emails with `false`, otherwise
    /// synthesizes a fresh `role=user` identity, appends it to the credential
    /// table, persists it, and publishes the authenticated snapshot.
    pub async fn signup(&self, email: &str, password: &str, name: &str) -> bool {
        tokio::time::sleep(self.latency).await;

        let identity = {
            let Ok(mut users) = self.users.lock() else {
                return false;
            };
            if users.iter().any(|u| u.email == email) {
                tracing::debug!(email, "signup rejected: email already registered");
                return false;
            }
            let identity = Identity {
                id: Uuid::new_v4(),
                email: email.to_string(),
                name: name.to_string(),
                role: Role::User,
            };
            users.push(CredentialRecord {
                email: email.to_string(),
                password: password.to_string(),
                identity: identity.clone(),
            });
            identity
        };

        self.persist(&identity);
        self.snapshot.send_replace(SessionSnapshot {
            identity: Some(identity),
            loading: false,
        });
        true
    }

    /// logout
    ///
    /// Clears the identity and the persisted slot synchronously. Idempotent:
    /// logging out an anonymous session is a no-op that still publishes an
    /// (unchanged) anonymous snapshot.
    pub fn logout(&self) {
        self.clear_slot();
        self.snapshot.send_replace(SessionSnapshot {
            identity: None,
            loading: false,
        });
    }

    /// Writes the identity to the persisted slot. A write failure is logged
    /// and swallowed: persistence is a best-effort cache, the in-memory
    /// session still advances.
    fn persist(&self, identity: &Identity) {
        match serde_json::to_string(identity) {
            Ok(json) => {
                if let Err(e) = self.storage.set(STORAGE_KEY, &json) {
                    tracing::warn!("failed to persist identity: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize identity: {e}"),
        }
    }

    fn clear_slot(&self) {
        if let Err(e) = self.storage.delete(STORAGE_KEY) {
            tracing::warn!("failed to clear persisted identity: {e}");
        }
    }
}
