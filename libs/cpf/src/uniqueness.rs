//! Uniqueness pre-check against an injected record lookup.
//!
//! Validation proper is pure; this is the one operation that reads through a
//! collaborator. The lookup answers a single question: does any record
//! other than the excluded one hold this canonical identifier? The store
//! behind it stays the authoritative guard. This check exists to turn
//! a would-be constraint violation into a friendly error before the write.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::cpf::Cpf;

/// Boxed failure from the injected lookup.
pub type LookupError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Capability to ask whether a canonical identifier is already assigned.
///
/// Backed by whatever store the surrounding application uses; this crate
/// never touches storage directly. `excluding` names a record whose own
/// identifier must not count as a match, which is what makes edit-in-place
/// re-validation work.
#[async_trait]
pub trait RecordLookup {
    /// Identifier type of the records the store holds.
    type RecordId: Send + Sync;

    /// Returns true if any record other than `excluding` holds `cpf`.
    async fn exists_with_identifier(
        &self,
        cpf: &Cpf,
        excluding: Option<&Self::RecordId>,
    ) -> Result<bool, LookupError>;
}

/// Errors from the uniqueness pre-check.
#[derive(Debug, Error)]
pub enum UniquenessError {
    /// A different record already holds this identifier.
    #[error("CPF {} is already registered to another record", .0.formatted())]
    Duplicate(Cpf),

    /// The injected lookup itself failed; not a validation verdict.
    #[error("record lookup failed: {0}")]
    Lookup(#[source] LookupError),
}

impl UniquenessError {
    /// Returns true if this is a duplicate-identifier verdict rather than a
    /// lookup fault.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, UniquenessError::Duplicate(_))
    }
}

/// Checks that `cpf` is not held by any record other than `excluding`.
///
/// Performs exactly one read through `lookup`; no caching, no retry, no
/// locking. Best-effort and race-prone: the final insert or update must
/// still be made atomic by the storage layer.
pub async fn check_uniqueness<L>(
    cpf: &Cpf,
    excluding: Option<&L::RecordId>,
    lookup: &L,
) -> Result<(), UniquenessError>
where
    L: RecordLookup + Sync + ?Sized,
{
    let taken = lookup
        .exists_with_identifier(cpf, excluding)
        .await
        .map_err(UniquenessError::Lookup)?;

    if taken {
        debug!(cpf = %cpf, "CPF already assigned to another record");
        return Err(UniquenessError::Duplicate(*cpf));
    }
    Ok(())
}
