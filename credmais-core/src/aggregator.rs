use std::sync::Arc;

use credmais_api::{ApiResult, Identity};
use credmais_db::repository::{ContractQuery, ContractRepository, OwnerScope};
use credmais_db::ContractStatus;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::Database;
use tracing::debug;

use crate::policy::OwnershipPolicy;

/// A dashboard category: the sum over each pattern, matched independently.
///
/// A label matching two patterns of the same category counts twice.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub label: &'static str,
    pub patterns: &'static [&'static str],
}

/// Dashboard categories, in display order.
pub const CATEGORIES: &[Category] = &[
    Category { label: "Cartão", patterns: &["Cartão"] },
    Category { label: "Margem Novo", patterns: &["Margem Novo"] },
    Category { label: "Saque Complementar", patterns: &["Saque Complementar"] },
    Category {
        label: "Margem de Aumento 2026 (Acumulativo)",
        patterns: &["Margem de Aumento 2026", "Aumento 2026"],
    },
    Category { label: "Portabilidade", patterns: &["Portabilidade"] },
    Category { label: "FGTS/CLT", patterns: &["FGTS"] },
    Category { label: "Refin", patterns: &["Refin"] },
    Category { label: "Governo/Prefeitura", patterns: &["Governo", "Prefeitura"] },
    Category { label: "Bolsa", patterns: &["Bolsa"] },
    Category { label: "Empréstimo Pessoal", patterns: &["Empréstimo Pessoal"] },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub label: &'static str,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardTotals {
    pub categories: Vec<CategoryTotal>,
    pub paid: Decimal,
    pub open: Decimal,
    pub cancelled: Decimal,
}

impl DashboardTotals {
    pub fn category(&self, label: &str) -> Option<Decimal> {
        self.categories
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.total)
    }
}

pub struct CategoryAggregator<DB: Database> {
    contracts: Arc<dyn ContractRepository<DB>>,
}

impl<DB: Database> CategoryAggregator<DB> {
    pub fn new(contracts: Arc<dyn ContractRepository<DB>>) -> Self {
        Self { contracts }
    }

    /// Totals visible to `identity`.
    pub async fn dashboard(&self, identity: &Identity) -> ApiResult<DashboardTotals> {
        self.totals(OwnershipPolicy::scope(identity)).await
    }

    pub async fn totals(&self, scope: OwnerScope) -> ApiResult<DashboardTotals> {
        let mut categories = Vec::with_capacity(CATEGORIES.len());
        for category in CATEGORIES {
            categories.push(CategoryTotal {
                label: category.label,
                total: self.category_total(scope, category).await?,
            });
        }

        let totals = DashboardTotals {
            categories,
            paid: self.status_total(scope, ContractStatus::Paid).await?,
            open: self.status_total(scope, ContractStatus::Open).await?,
            cancelled: self.status_total(scope, ContractStatus::Cancelled).await?,
        };
        debug!(?scope, "dashboard totals computed");
        Ok(totals)
    }

    pub async fn category_total(&self, scope: OwnerScope, category: &Category) -> ApiResult<Decimal> {
        let mut total = Decimal::ZERO;
        for pattern in category.patterns {
            let query = ContractQuery::scoped(scope).with_product_containing(*pattern);
            total += self.contracts.sum_amount(&query).await?;
        }
        Ok(total)
    }

    async fn status_total(&self, scope: OwnerScope, status: ContractStatus) -> ApiResult<Decimal> {
        let query = ContractQuery::scoped(scope).with_status(status);
        Ok(self.contracts.sum_amount(&query).await?)
    }
}
