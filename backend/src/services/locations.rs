//! Per-user fishing location lists
//!
//! Storage is a keyed store of whole lists. Every read-modify-write for a
//! user runs under that user's lock, so concurrent updates from one user
//! never lose writes while different users proceed in parallel.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{FishingLocation, GpsCoordinates, NewFishingLocation};
use sqlx::{FromRow, PgPool};
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Telegram user id
pub type UserId = i64;

/// Keyed store of location lists
pub trait LocationStore: Send + Sync + 'static {
    /// The user's list in insertion order; empty for unknown users
    fn get(&self, user_id: UserId)
        -> impl Future<Output = AppResult<Vec<FishingLocation>>> + Send;

    /// Replace the user's whole list
    fn put(
        &self,
        user_id: UserId,
        locations: Vec<FishingLocation>,
    ) -> impl Future<Output = AppResult<()>> + Send;
}

// ============================================================================
// PostgreSQL store
// ============================================================================

#[derive(Debug, FromRow)]
struct LocationRow {
    id: Uuid,
    name: String,
    country: String,
    latitude: Decimal,
    longitude: Decimal,
    added_at: DateTime<Utc>,
}

impl From<LocationRow> for FishingLocation {
    fn from(row: LocationRow) -> Self {
        FishingLocation {
            id: row.id,
            name: row.name,
            country: row.country,
            coordinates: GpsCoordinates::new(row.latitude, row.longitude),
            added_at: row.added_at,
        }
    }
}

#[derive(Clone)]
pub struct PgLocationStore {
    db: PgPool,
}

impl PgLocationStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

impl LocationStore for PgLocationStore {
    async fn get(&self, user_id: UserId) -> AppResult<Vec<FishingLocation>> {
        let rows = sqlx::query_as::<_, LocationRow>(
            r#"
            SELECT id, name, country, latitude, longitude, added_at
            FROM fishing_locations
            WHERE user_id = $1
            ORDER BY position
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(FishingLocation::from).collect())
    }

    async fn put(&self, user_id: UserId, locations: Vec<FishingLocation>) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM fishing_locations WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for (position, location) in locations.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO fishing_locations
                    (id, user_id, position, name, country, latitude, longitude, added_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(location.id)
            .bind(user_id)
            .bind(position as i32)
            .bind(&location.name)
            .bind(&location.country)
            .bind(location.coordinates.latitude)
            .bind(location.coordinates.longitude)
            .bind(location.added_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

// ============================================================================
// In-memory store
// ============================================================================

#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryLocationStore {
    lists: Arc<tokio::sync::RwLock<HashMap<UserId, Vec<FishingLocation>>>>,
}

#[cfg(test)]
impl MemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl LocationStore for MemoryLocationStore {
    async fn get(&self, user_id: UserId) -> AppResult<Vec<FishingLocation>> {
        Ok(self
            .lists
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn put(&self, user_id: UserId, locations: Vec<FishingLocation>) -> AppResult<()> {
        self.lists.write().await.insert(user_id, locations);
        Ok(())
    }
}

// ============================================================================
// Per-key serialisation
// ============================================================================

/// One async mutex per key, created on demand
#[derive(Default)]
pub struct KeyedLock {
    locks: Mutex<HashMap<UserId, Arc<tokio::sync::Mutex<()>>>>,
}

impl KeyedLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`. Released when the guard drops.
    pub async fn lock(&self, key: UserId) -> OwnedMutexGuard<()> {
        let mutex = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            // Entries only the map refers to are idle
            locks.retain(|k, m| *k == key || Arc::strong_count(m) > 1);
            locks.entry(key).or_default().clone()
        };
        mutex.lock_owned().await
    }

    #[cfg(test)]
    pub fn tracked_keys(&self) -> usize {
        self.locks.lock().map(|l| l.len()).unwrap_or(0)
    }
}

// ============================================================================
// Service
// ============================================================================

pub struct LocationService<S> {
    store: Arc<S>,
    locks: Arc<KeyedLock>,
}

impl<S> Clone for LocationService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<S: LocationStore> LocationService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            locks: Arc::new(KeyedLock::new()),
        }
    }

    pub async fn list(&self, user_id: UserId) -> AppResult<Vec<FishingLocation>> {
        self.store.get(user_id).await
    }

    /// Location at a zero-based list index
    pub async fn get(&self, user_id: UserId, index: usize) -> AppResult<FishingLocation> {
        self.store
            .get(user_id)
            .await?
            .into_iter()
            .nth(index)
            .ok_or_else(|| AppError::NotFound(format!("Location #{}", index + 1)))
    }

    /// Append a geocoded location; the same name and country may only be
    /// stored once per user
    pub async fn add(
        &self,
        user_id: UserId,
        input: NewFishingLocation,
    ) -> AppResult<FishingLocation> {
        input.validate()?;

        let _guard = self.locks.lock(user_id).await;
        let mut locations = self.store.get(user_id).await?;

        if locations
            .iter()
            .any(|l| l.is_same_place(&input.name, &input.country))
        {
            return Err(AppError::DuplicateEntry(format!(
                "Location {}, {}",
                input.name, input.country
            )));
        }

        let location = input.into_location();
        locations.push(location.clone());
        self.store.put(user_id, locations).await?;

        tracing::info!("User {} added location {}", user_id, location.title());
        Ok(location)
    }

    /// Remove the location at a zero-based list index
    pub async fn remove(&self, user_id: UserId, index: usize) -> AppResult<FishingLocation> {
        let _guard = self.locks.lock(user_id).await;
        let mut locations = self.store.get(user_id).await?;

        if index >= locations.len() {
            return Err(AppError::NotFound(format!("Location #{}", index + 1)));
        }
        let removed = locations.remove(index);
        self.store.put(user_id, locations).await?;

        tracing::info!("User {} removed location {}", user_id, removed.title());
        Ok(removed)
    }
}
