//! Per-tenant chart-of-accounts registry.

use dashmap::DashMap;
use serde::Deserialize;
use tracing::info;

use folio_core::account::{code_level, parent_code};
use folio_core::{Account, AccountRules, BalanceClassification, LedgerError};
use folio_shared::TenantId;

/// Payload for creating one account, also the shape of chart import files.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    /// Hierarchical account code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Account type.
    pub account_type: folio_core::AccountType,
    /// Whether entries against this account must name a third party.
    #[serde(default)]
    pub requires_third_party: bool,
    /// Whether entries against this account must name a cost center.
    #[serde(default)]
    pub requires_cost_center: bool,
    /// System accounts reject updates and deactivation.
    #[serde(default)]
    pub is_system: bool,
    /// Report classification; derived from the code's group when absent.
    #[serde(default)]
    pub classification: Option<BalanceClassification>,
}

/// Editable account fields. System accounts reject all updates.
///
/// Code, type and nature are identity and never change after creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New third-party requirement.
    pub requires_third_party: Option<bool>,
    /// New cost-center requirement.
    pub requires_cost_center: Option<bool>,
    /// New report classification.
    pub classification: Option<BalanceClassification>,
}

/// Filter for listing accounts.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AccountFilter {
    /// Restrict to one account type.
    pub account_type: Option<folio_core::AccountType>,
    /// Restrict to one hierarchy level.
    pub level: Option<u8>,
    /// Include deactivated accounts.
    #[serde(default)]
    pub include_inactive: bool,
}

/// Chart-of-accounts store, keyed by (tenant, code).
///
/// Lookups during posting take the per-key shard lock only; chart mutations
/// are rare and never block posting on other accounts.
#[derive(Debug, Default)]
pub struct ChartOfAccountRegistry {
    accounts: DashMap<(TenantId, String), Account>,
}

impl ChartOfAccountRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates one account for a tenant.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidAccountCode`] for malformed codes,
    /// [`LedgerError::DuplicateCode`] when the code exists, and
    /// [`LedgerError::UnknownParentAccount`] when the prefix parent is
    /// missing.
    pub fn create(&self, tenant_id: TenantId, new: NewAccount) -> Result<Account, LedgerError> {
        let level = code_level(&new.code)?;
        let parent = parent_code(&new.code)?;
        if let Some(ref parent) = parent {
            if !self.accounts.contains_key(&(tenant_id, parent.clone())) {
                return Err(LedgerError::UnknownParentAccount(parent.clone()));
            }
        }
        let classification = new
            .classification
            .unwrap_or_else(|| BalanceClassification::default_for(new.account_type, &new.code));
        let account = Account {
            code: new.code.clone(),
            name: new.name,
            account_type: new.account_type,
            nature: new.account_type.nature(),
            level,
            parent_code: parent,
            requires_third_party: new.requires_third_party,
            requires_cost_center: new.requires_cost_center,
            is_system: new.is_system,
            is_active: true,
            classification,
        };
        match self.accounts.entry((tenant_id, new.code)) {
            dashmap::Entry::Occupied(occupied) => {
                Err(LedgerError::DuplicateCode(occupied.key().1.clone()))
            }
            dashmap::Entry::Vacant(vacant) => {
                vacant.insert(account.clone());
                Ok(account)
            }
        }
    }

    /// Imports a chart of accounts for a tenant.
    ///
    /// Accounts are sorted by code first so parents land before children
    /// regardless of file order. Existing codes are skipped, making a
    /// re-import of the same chart a no-op.
    ///
    /// Returns the number of accounts created.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed code or missing parent.
    pub fn import_chart(
        &self,
        tenant_id: TenantId,
        mut chart: Vec<NewAccount>,
    ) -> Result<usize, LedgerError> {
        chart.sort_by(|a, b| a.code.cmp(&b.code));
        let mut created = 0;
        for new in chart {
            match self.create(tenant_id, new) {
                Ok(_) => created += 1,
                Err(LedgerError::DuplicateCode(_)) => {}
                Err(other) => return Err(other),
            }
        }
        info!(tenant_id = %tenant_id, created, "chart of accounts imported");
        Ok(created)
    }

    /// Looks up one account by code.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnknownAccount`] when the code does not exist for
    /// this tenant.
    pub fn get(&self, tenant_id: TenantId, code: &str) -> Result<Account, LedgerError> {
        self.accounts
            .get(&(tenant_id, code.to_string()))
            .map(|entry| entry.clone())
            .ok_or_else(|| LedgerError::UnknownAccount(code.to_string()))
    }

    /// Returns the validation facts for one account.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnknownAccount`] when the code does not exist.
    pub fn rules(&self, tenant_id: TenantId, code: &str) -> Result<AccountRules, LedgerError> {
        let account = self.get(tenant_id, code)?;
        Ok(AccountRules {
            code: account.code,
            is_active: account.is_active,
            requires_third_party: account.requires_third_party,
            requires_cost_center: account.requires_cost_center,
        })
    }

    /// Lists a tenant's accounts ordered by code.
    #[must_use]
    pub fn list(&self, tenant_id: TenantId, filter: AccountFilter) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .filter(|entry| entry.key().0 == tenant_id)
            .map(|entry| entry.value().clone())
            .filter(|account| {
                (filter.include_inactive || account.is_active)
                    && filter
                        .account_type
                        .is_none_or(|t| account.account_type == t)
                    && filter.level.is_none_or(|l| account.level == l)
            })
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        accounts
    }

    /// Updates the editable fields of an account.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnknownAccount`] when the code does not exist and
    /// [`LedgerError::SystemAccountImmutable`] for system accounts.
    pub fn update(
        &self,
        tenant_id: TenantId,
        code: &str,
        update: AccountUpdate,
    ) -> Result<Account, LedgerError> {
        let mut entry = self
            .accounts
            .get_mut(&(tenant_id, code.to_string()))
            .ok_or_else(|| LedgerError::UnknownAccount(code.to_string()))?;
        if entry.is_system {
            return Err(LedgerError::SystemAccountImmutable(code.to_string()));
        }
        if let Some(name) = update.name {
            entry.name = name;
        }
        if let Some(requires_third_party) = update.requires_third_party {
            entry.requires_third_party = requires_third_party;
        }
        if let Some(requires_cost_center) = update.requires_cost_center {
            entry.requires_cost_center = requires_cost_center;
        }
        if let Some(classification) = update.classification {
            entry.classification = classification;
        }
        Ok(entry.clone())
    }

    /// Deactivates an account; new postings to it are rejected, history
    /// is untouched.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnknownAccount`] when the code does not exist and
    /// [`LedgerError::SystemAccountImmutable`] for system accounts.
    pub fn deactivate(&self, tenant_id: TenantId, code: &str) -> Result<Account, LedgerError> {
        let mut entry = self
            .accounts
            .get_mut(&(tenant_id, code.to_string()))
            .ok_or_else(|| LedgerError::UnknownAccount(code.to_string()))?;
        if entry.is_system {
            return Err(LedgerError::SystemAccountImmutable(code.to_string()));
        }
        entry.is_active = false;
        Ok(entry.clone())
    }

    /// Deletes an account the ledger has never touched.
    ///
    /// `is_referenced` is supplied by the caller, which owns the entry
    /// store; an account referenced by any entry fails with
    /// [`LedgerError::AccountInUse`] and must be deactivated instead.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnknownAccount`], [`LedgerError::SystemAccountImmutable`]
    /// or [`LedgerError::AccountInUse`].
    pub fn delete(
        &self,
        tenant_id: TenantId,
        code: &str,
        is_referenced: bool,
    ) -> Result<(), LedgerError> {
        let key = (tenant_id, code.to_string());
        let entry = self
            .accounts
            .get(&key)
            .ok_or_else(|| LedgerError::UnknownAccount(code.to_string()))?;
        if entry.is_system {
            return Err(LedgerError::SystemAccountImmutable(code.to_string()));
        }
        drop(entry);
        if is_referenced {
            return Err(LedgerError::AccountInUse(code.to_string()));
        }
        self.accounts.remove(&key);
        Ok(())
    }
}
