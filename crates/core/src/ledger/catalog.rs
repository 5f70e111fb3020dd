//! Reference data shown in the entry form selectors.
//!
//! Accounts and descriptions are supplied wholesale by the caller; the core
//! never mutates them.

use lancamento_shared::types::{AccountId, DescriptionId};
use serde::{Deserialize, Serialize};

/// A ledger account a line can post to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The account ID.
    pub id: AccountId,
    /// Chart-of-accounts code (e.g. "1.1.01").
    pub code: String,
    /// Display name.
    pub label: String,
}

/// A reusable entry description (histórico).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    /// The description ID.
    pub id: DescriptionId,
    /// Display text.
    pub label: String,
}

/// Accounts and descriptions available to the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Selectable accounts.
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// Selectable descriptions.
    #[serde(default)]
    pub descriptions: Vec<Description>,
}

impl Catalog {
    /// Creates a catalog from both lists.
    #[must_use]
    pub fn new(accounts: Vec<Account>, descriptions: Vec<Description>) -> Self {
        Self {
            accounts,
            descriptions,
        }
    }

    /// Looks up an account.
    #[must_use]
    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    /// Looks up a description.
    #[must_use]
    pub fn description(&self, id: DescriptionId) -> Option<&Description> {
        self.descriptions.iter().find(|description| description.id == id)
    }

    /// Selector label for an account: `"code - label"`.
    #[must_use]
    pub fn account_label(&self, id: AccountId) -> Option<String> {
        self.account(id)
            .map(|account| format!("{} - {}", account.code, account.label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Account {
                    id: AccountId::new(10),
                    code: "1.1.01".to_string(),
                    label: "Caixa".to_string(),
                },
                Account {
                    id: AccountId::new(20),
                    code: "2.1.01".to_string(),
                    label: "Fornecedores".to_string(),
                },
            ],
            vec![Description {
                id: DescriptionId::new(1),
                label: "Pagamento de fornecedor".to_string(),
            }],
        )
    }

    #[test]
    fn test_lookups() {
        let catalog = catalog();
        assert_eq!(catalog.account(AccountId::new(20)).unwrap().code, "2.1.01");
        assert!(catalog.account(AccountId::new(99)).is_none());
        assert_eq!(
            catalog.description(DescriptionId::new(1)).unwrap().label,
            "Pagamento de fornecedor"
        );
    }

    #[test]
    fn test_account_label() {
        assert_eq!(
            catalog().account_label(AccountId::new(10)).as_deref(),
            Some("1.1.01 - Caixa")
        );
        assert_eq!(catalog().account_label(AccountId::new(1)), None);
    }
}
