//! In-memory driver store.
//!
//! Reference implementation of the record store boundary. Insert and update
//! re-check CPF uniqueness under the write lock, which makes this store the
//! authoritative guard; `frota_cpf::check_uniqueness` against the same store
//! is only the friendly pre-check that runs before a write is attempted.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use frota_cpf::{Cpf, LookupError, RecordLookup};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use crate::driver::Driver;
use crate::id::DriverId;

/// Errors from registry mutations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Another driver already holds this CPF.
    #[error("CPF {} is already registered to another driver", .0.formatted())]
    DuplicateCpf(Cpf),

    /// No driver with this ID exists.
    #[error("driver not found: {0}")]
    NotFound(DriverId),
}

/// In-memory driver registry keyed by [`DriverId`].
///
/// IDs are ULID-based, so iteration order is registration order.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    drivers: RwLock<BTreeMap<DriverId, Driver>>,
}

impl MemoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new driver.
    ///
    /// Rejects the insert if any existing driver holds the same canonical
    /// CPF; the check and the insert happen under one write lock.
    pub async fn insert(&self, driver: Driver) -> Result<DriverId, RegistryError> {
        let mut drivers = self.drivers.write().await;
        if drivers.values().any(|d| d.cpf == driver.cpf) {
            return Err(RegistryError::DuplicateCpf(driver.cpf));
        }
        let id = driver.id;
        debug!(driver_id = %id, cpf = %driver.cpf, "registering driver");
        drivers.insert(id, driver);
        Ok(id)
    }

    /// Replaces an existing driver record and bumps `updated_at`.
    ///
    /// The record's own CPF does not count against it, so editing a driver
    /// without changing the CPF always passes the uniqueness guard.
    pub async fn update(&self, mut driver: Driver) -> Result<(), RegistryError> {
        let mut drivers = self.drivers.write().await;
        if !drivers.contains_key(&driver.id) {
            return Err(RegistryError::NotFound(driver.id));
        }
        if drivers
            .values()
            .any(|d| d.cpf == driver.cpf && d.id != driver.id)
        {
            return Err(RegistryError::DuplicateCpf(driver.cpf));
        }
        driver.updated_at = Utc::now();
        debug!(driver_id = %driver.id, "updating driver");
        drivers.insert(driver.id, driver);
        Ok(())
    }

    /// Fetches a driver by ID.
    pub async fn get(&self, id: DriverId) -> Option<Driver> {
        self.drivers.read().await.get(&id).cloned()
    }

    /// Removes a driver, returning the removed record.
    pub async fn remove(&self, id: DriverId) -> Result<Driver, RegistryError> {
        let mut drivers = self.drivers.write().await;
        debug!(driver_id = %id, "removing driver");
        drivers.remove(&id).ok_or(RegistryError::NotFound(id))
    }

    /// Lists all drivers in registration order.
    pub async fn list(&self) -> Vec<Driver> {
        self.drivers.read().await.values().cloned().collect()
    }

    /// Number of registered drivers.
    pub async fn len(&self) -> usize {
        self.drivers.read().await.len()
    }

    /// Returns true if the registry holds no drivers.
    pub async fn is_empty(&self) -> bool {
        self.drivers.read().await.is_empty()
    }
}

#[async_trait]
impl RecordLookup for MemoryRegistry {
    type RecordId = DriverId;

    async fn exists_with_identifier(
        &self,
        cpf: &Cpf,
        excluding: Option<&DriverId>,
    ) -> Result<bool, LookupError> {
        let drivers = self.drivers.read().await;
        Ok(drivers
            .values()
            .any(|d| d.cpf == *cpf && excluding != Some(&d.id)))
    }
}
