//! # frota-registry
//!
//! Driver records and the record store boundary for the frota fleet
//! registry.
//!
//! The CPF core in `frota-cpf` never touches storage; this crate owns the
//! other side of that boundary:
//!
//! - [`DriverId`]: stable, system-generated driver identifiers
//!   (`drv_{ulid}`, time-ordered, strictly parsed)
//! - [`Driver`]: the registered-driver record, holding its CPF in canonical
//!   form only
//! - [`MemoryRegistry`]: an in-memory store that enforces CPF uniqueness
//!   atomically on write and implements the `RecordLookup` capability the
//!   CPF core's pre-check is wired to

mod driver;
mod id;
mod store;

pub use driver::{CnhCategory, CnhCategoryError, Driver, DriverStatus};
pub use id::{DriverId, DriverIdError};
pub use store::{MemoryRegistry, RegistryError};
