use chrono::{DateTime, Utc};
use credmais_api::ReportQuery;
use uuid::Uuid;

use crate::models::common_enums::ContractStatus;
use crate::models::contract::ContractModel;

/// Which owners' records a query may see.
///
/// There is deliberately no `Default`: every query states its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerScope {
    /// Administrator view: no owner constraint at all
    All,
    /// Only records whose `owner_id` equals the given account
    Owner(Uuid),
}

impl OwnerScope {
    pub fn admits(&self, owner_id: Uuid) -> bool {
        match self {
            OwnerScope::All => true,
            OwnerScope::Owner(id) => *id == owner_id,
        }
    }

    pub fn owner_id(&self) -> Option<Uuid> {
        match self {
            OwnerScope::All => None,
            OwnerScope::Owner(id) => Some(*id),
        }
    }
}

/// Predicate over contracts shared by listings, dashboards and reports.
///
/// Text filters:
/// - `product_equals` compares the whole label exactly
/// - `product_contains` and `client_name_contains` are case-insensitive substring matches
/// - `tax_id_contains` is a plain substring match
///
/// `created_from` and `created_to` are inclusive bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractQuery {
    pub scope: OwnerScope,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub seller_id: Option<Uuid>,
    pub product_equals: Option<String>,
    pub product_contains: Option<String>,
    pub client_name_contains: Option<String>,
    pub tax_id_contains: Option<String>,
    pub contract_status: Option<ContractStatus>,
}

impl ContractQuery {
    pub fn scoped(scope: OwnerScope) -> Self {
        Self {
            scope,
            created_from: None,
            created_to: None,
            seller_id: None,
            product_equals: None,
            product_contains: None,
            client_name_contains: None,
            tax_id_contains: None,
            contract_status: None,
        }
    }

    pub fn from_report(scope: OwnerScope, report: &ReportQuery) -> Self {
        Self {
            created_from: report.created_from(),
            created_to: report.created_to(),
            seller_id: report.seller_id,
            product_equals: report.product.clone(),
            client_name_contains: report.client_name_contains.clone(),
            ..Self::scoped(scope)
        }
    }

    pub fn with_product_containing(mut self, fragment: impl Into<String>) -> Self {
        self.product_contains = Some(fragment.into());
        self
    }

    pub fn with_tax_id_containing(mut self, fragment: impl Into<String>) -> Self {
        self.tax_id_contains = Some(fragment.into());
        self
    }

    pub fn with_seller(mut self, seller_id: Uuid) -> Self {
        self.seller_id = Some(seller_id);
        self
    }

    pub fn with_status(mut self, status: ContractStatus) -> Self {
        self.contract_status = Some(status);
        self
    }

    /// Evaluates the predicate in memory. Store implementations must agree with this.
    pub fn matches(&self, contract: &ContractModel) -> bool {
        if !self.scope.admits(contract.owner_id) {
            return false;
        }
        if let Some(from) = self.created_from {
            if contract.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.created_to {
            if contract.created_at > to {
                return false;
            }
        }
        if let Some(seller_id) = self.seller_id {
            if contract.seller_id != Some(seller_id) {
                return false;
            }
        }
        if let Some(status) = self.contract_status {
            if contract.contract_status != status {
                return false;
            }
        }
        let product = contract.product.as_deref();
        if let Some(expected) = &self.product_equals {
            if product != Some(expected.as_str()) {
                return false;
            }
        }
        if let Some(fragment) = &self.product_contains {
            if !product.is_some_and(|p| contains_ignore_case(p, fragment)) {
                return false;
            }
        }
        if let Some(fragment) = &self.client_name_contains {
            if !contains_ignore_case(&contract.name, fragment) {
                return false;
            }
        }
        if let Some(fragment) = &self.tax_id_contains {
            if !contract.tax_id.contains(fragment.as_str()) {
                return false;
            }
        }
        true
    }
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
