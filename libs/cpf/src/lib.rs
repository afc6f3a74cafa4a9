//! # frota-cpf
//!
//! CPF validation, canonicalization, and uniqueness checking for the frota
//! driver registry.
//!
//! ## Design Principles
//!
//! - One canonical representation: 11 ASCII digits, no punctuation. This is
//!   the only form stored and compared; the punctuated form is derived on
//!   display.
//! - Strict parsing: a [`Cpf`] can only be obtained through [`validate`], so
//!   holding one proves the checksum held.
//! - Validation is pure and synchronous; the uniqueness pre-check is the one
//!   operation with I/O and lives behind an injected [`RecordLookup`].
//!
//! ## Identifier Format
//!
//! ```text
//! canonical: 52998224725
//! display:   529.982.247-25
//! ```
//!
//! The last two digits are check digits computed with the standard two-pass
//! weighted mod-11 scheme (weights 10..2 over the first 9 digits, then 11..2
//! over the first 10). The weights and the remainder-10-maps-to-0 rule are
//! fixed by the external standard; there is no design freedom here.
//!
//! ## Uniqueness
//!
//! [`check_uniqueness`] performs a single read through the injected lookup.
//! It is a best-effort pre-check meant to produce a friendly error before a
//! write is attempted; the store behind the lookup remains the authoritative
//! guard against concurrent inserts.

mod cpf;
mod error;
mod uniqueness;

pub use cpf::{format_cpf, normalize, validate, Cpf};
pub use error::CpfError;
pub use uniqueness::{check_uniqueness, LookupError, RecordLookup, UniquenessError};
