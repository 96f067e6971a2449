//! In-memory repositories
//!
//! Process-local stand-ins for Redis and PostgreSQL, used by tests and by
//! local runs without backing services. Expiry follows the tokio clock so
//! paused-time tests can step through TTLs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::domain::entity::user::{User, UserFilter};
use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::value_object::{phone_number::PhoneNumber, user_id::UserId};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// OTP store backed by a map with per-entry expiry
#[derive(Debug, Default)]
pub struct InMemoryOtpRepository {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryOtpRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining lifetime of `key`, `None` when absent or expired
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        let entries = self.entries.lock().await;
        entries
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.expires_at - now)
    }
}

impl OtpRepository for InMemoryOtpRepository {
    async fn put_code(&self, key: &str, code: &str, ttl: Duration) -> AuthResult<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(
            key.to_string(),
            Entry {
                value: code.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn get_code(&self, key: &str) -> AuthResult<Option<String>> {
        let now = Instant::now();
        let entries = self.entries.lock().await;
        Ok(entries
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value.clone()))
    }

    async fn delete_code(&self, key: &str) -> AuthResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn increment_window(&self, key: &str, window: Duration) -> AuthResult<u64> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        let current = entries
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| {
                e.value
                    .parse::<u64>()
                    .map(|n| (n, e.expires_at))
                    .map_err(|_| AuthError::Internal(format!("counter {} is not an integer", key)))
            })
            .transpose()?;

        let (count, expires_at) = match current {
            Some((n, expires_at)) => (n + 1, expires_at),
            None => (1, now + window),
        };

        entries.insert(
            key.to_string(),
            Entry {
                value: count.to_string(),
                expires_at,
            },
        );
        Ok(count)
    }
}

/// User store backed by a vector, ids assigned sequentially from 1
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    creates: AtomicUsize,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `create` calls so far
    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    /// Insert a fully formed user, bypassing id assignment
    pub async fn seed(&self, user: User) {
        self.users.lock().await.push(user);
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn find_by_phone(&self, phone: &PhoneNumber) -> AuthResult<User> {
        let users = self.users.lock().await;
        users
            .iter()
            .find(|u| &u.phone == phone)
            .cloned()
            .ok_or(AuthError::UserNotFound)
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<User> {
        let users = self.users.lock().await;
        users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(AuthError::UserNotFound)
    }

    async fn create(&self, phone: &PhoneNumber) -> AuthResult<User> {
        let mut users = self.users.lock().await;
        if users.iter().any(|u| &u.phone == phone) {
            return Err(AuthError::Internal(format!(
                "phone {} already registered",
                phone
            )));
        }

        let next_id = users.iter().map(|u| u.id.get()).max().unwrap_or(0) + 1;
        let user = User {
            id: UserId::new(next_id),
            phone: phone.clone(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(user)
    }

    async fn list(&self, filter: &UserFilter) -> AuthResult<Vec<User>> {
        let users = self.users.lock().await;
        let mut matched: Vec<User> = users.iter().filter(|u| filter.matches(u)).cloned().collect();
        matched.sort_by_key(|u| u.id);
        Ok(matched
            .into_iter()
            .skip(filter.skip as usize)
            .take(filter.limit as usize)
            .collect())
    }
}
