//! Read-only preview of an account's recent movements.
//!
//! When a line's account changes the form asks for the latest few movements
//! of that account. Lookups are not cancelled; instead every request gets a
//! ticket and only the newest ticket for the still-selected account may
//! update the preview (last request wins).

use chrono::NaiveDate;
use lancamento_shared::config::LedgerConfig;
use lancamento_shared::types::{AccountId, MovementId, PageRequest, PageResponse};
use lancamento_shared::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ports::MovementsLookup;
use super::types::EntryKind;

/// A posted movement on an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// The movement ID.
    pub id: MovementId,
    /// Posting date.
    pub date: NaiveDate,
    /// Debit or credit.
    pub kind: EntryKind,
    /// Amount posted.
    pub amount: Decimal,
    /// Optional note from the originating entry.
    #[serde(default)]
    pub note: Option<String>,
}

/// Handle for one outstanding lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementsTicket {
    account: AccountId,
    generation: u64,
}

/// State of the movements preview panel.
#[derive(Debug, Clone)]
pub struct MovementsPreview {
    page_size: u32,
    selected: Option<AccountId>,
    generation: u64,
    page: Option<PageResponse<Movement>>,
}

impl MovementsPreview {
    /// Creates an empty preview showing up to `page_size` movements.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            selected: None,
            generation: 0,
            page: None,
        }
    }

    /// Creates an empty preview sized from configuration.
    #[must_use]
    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(config.movements_page_size)
    }

    /// Selects `account` and issues a ticket for its lookup.
    ///
    /// Any previously shown movements are dropped and earlier tickets become
    /// stale.
    pub fn request(&mut self, account: AccountId) -> MovementsTicket {
        self.generation += 1;
        self.selected = Some(account);
        self.page = None;
        MovementsTicket {
            account,
            generation: self.generation,
        }
    }

    /// The page to ask the lookup for.
    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        PageRequest::first(self.page_size)
    }

    /// Stores a lookup result if its ticket is still current.
    ///
    /// Returns false (and discards `page`) for stale tickets.
    pub fn resolve(&mut self, ticket: MovementsTicket, page: PageResponse<Movement>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                account = %ticket.account,
                generation = ticket.generation,
                latest = self.generation,
                "Discarding stale movements response"
            );
            return false;
        }
        self.page = Some(page);
        true
    }

    /// Records a failed lookup. The preview stays empty.
    pub fn fail(&mut self, ticket: MovementsTicket, error: &AppError) {
        if self.is_current(ticket) {
            warn!(account = %ticket.account, error = %error, "Movements lookup failed");
        }
    }

    /// Clears the selection and any shown movements.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.selected = None;
        self.page = None;
    }

    /// The account currently selected for preview.
    #[must_use]
    pub fn selected(&self) -> Option<AccountId> {
        self.selected
    }

    /// The movements currently shown.
    #[must_use]
    pub fn movements(&self) -> Option<&PageResponse<Movement>> {
        self.page.as_ref()
    }

    /// Requests and resolves a lookup in one step.
    ///
    /// Returns whether the result was applied.
    pub async fn load(
        &mut self,
        lookup: &dyn MovementsLookup,
        account: AccountId,
    ) -> AppResult<bool> {
        let ticket = self.request(account);
        match lookup.recent(account, self.page_request()).await {
            Ok(page) => Ok(self.resolve(ticket, page)),
            Err(err) => {
                self.fail(ticket, &err);
                Err(err)
            }
        }
    }

    fn is_current(&self, ticket: MovementsTicket) -> bool {
        ticket.generation == self.generation && self.selected == Some(ticket.account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn movement(id: i64, amount: Decimal) -> Movement {
        Movement {
            id: MovementId::new(id),
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            kind: EntryKind::Debit,
            amount,
            note: None,
        }
    }

    fn page(ids: &[i64], total: u64) -> PageResponse<Movement> {
        let data = ids.iter().map(|id| movement(*id, dec!(10))).collect();
        PageResponse::new(data, 1, 5, total)
    }

    struct InMemoryLookup {
        movements: HashMap<AccountId, Vec<Movement>>,
    }

    #[async_trait]
    impl MovementsLookup for InMemoryLookup {
        async fn recent(
            &self,
            account: AccountId,
            page: PageRequest,
        ) -> AppResult<PageResponse<Movement>> {
            let all = self
                .movements
                .get(&account)
                .ok_or_else(|| AppError::NotFound(format!("account {account}")))?;
            let limit = usize::try_from(page.limit()).unwrap();
            let data = all.iter().take(limit).cloned().collect();
            Ok(PageResponse::new(data, page.page, page.per_page, all.len() as u64))
        }
    }

    #[test]
    fn test_latest_request_wins() {
        let mut preview = MovementsPreview::new(5);
        let first = preview.request(AccountId::new(10));
        let second = preview.request(AccountId::new(20));

        assert!(!preview.resolve(first, page(&[1], 1)));
        assert!(preview.movements().is_none());

        assert!(preview.resolve(second, page(&[2, 3], 2)));
        assert_eq!(preview.movements().unwrap().meta.total, 2);
        assert_eq!(preview.selected(), Some(AccountId::new(20)));
    }

    #[test]
    fn test_reselecting_same_account_invalidates_older_ticket() {
        let mut preview = MovementsPreview::new(5);
        let old = preview.request(AccountId::new(10));
        let new = preview.request(AccountId::new(10));
        assert!(!preview.resolve(old, page(&[1], 1)));
        assert!(preview.resolve(new, page(&[1], 1)));
    }

    #[test]
    fn test_clear_discards_in_flight_response() {
        let mut preview = MovementsPreview::new(5);
        let ticket = preview.request(AccountId::new(10));
        preview.clear();
        assert!(!preview.resolve(ticket, page(&[1], 1)));
        assert_eq!(preview.selected(), None);
    }

    #[test]
    fn test_page_request_uses_configured_size() {
        let config = LedgerConfig {
            movements_page_size: 3,
            amount_scale: 2,
        };
        let preview = MovementsPreview::from_config(&config);
        assert_eq!(preview.page_request(), PageRequest { page: 1, per_page: 3 });
        assert_eq!(MovementsPreview::new(0).page_request().per_page, 1);
    }

    #[tokio::test]
    async fn test_load_applies_lookup_result() {
        let lookup = InMemoryLookup {
            movements: HashMap::from([(
                AccountId::new(10),
                (1..=8).map(|id| movement(id, dec!(5))).collect(),
            )]),
        };
        let mut preview = MovementsPreview::new(5);

        assert!(preview.load(&lookup, AccountId::new(10)).await.unwrap());
        let shown = preview.movements().unwrap();
        assert_eq!(shown.data.len(), 5);
        assert_eq!(shown.meta.total, 8);
        assert!(shown.has_more());
    }

    #[tokio::test]
    async fn test_load_failure_leaves_preview_empty() {
        let lookup = InMemoryLookup {
            movements: HashMap::new(),
        };
        let mut preview = MovementsPreview::new(5);

        let err = preview.load(&lookup, AccountId::new(10)).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(preview.movements().is_none());
        assert_eq!(preview.selected(), Some(AccountId::new(10)));
    }
}
