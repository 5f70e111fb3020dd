//! Collaborators the ledger entry core talks to.
//!
//! Implementations live outside this crate (typically a REST client); the
//! core only needs these two calls.

use async_trait::async_trait;
use lancamento_shared::AppResult;
use lancamento_shared::types::{AccountId, EntryId, PageRequest, PageResponse};

use super::movements::Movement;
use super::types::EntryPayload;

/// Saves validated entries.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Creates a new entry and returns its identifier.
    async fn save(&self, payload: &EntryPayload) -> AppResult<EntryId>;

    /// Replaces an existing entry.
    async fn update(&self, id: EntryId, payload: &EntryPayload) -> AppResult<EntryId>;
}

/// Read-only lookup of an account's recent movements.
#[async_trait]
pub trait MovementsLookup: Send + Sync {
    /// Most recent movements of `account`, newest first, with the total count.
    async fn recent(&self, account: AccountId, page: PageRequest) -> AppResult<PageResponse<Movement>>;
}
