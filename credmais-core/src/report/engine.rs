use std::collections::HashMap;
use std::sync::Arc;

use credmais_api::{
    format_brl, ApiError, ApiResult, Identity, LastReportQuery, ReportFilterInput, ReportQuery,
};
use credmais_db::repository::{ContractQuery, ContractRepository, SellerRepository};
use credmais_db::{ContractModel, SellerModel};
use rust_decimal::Decimal;
use sqlx::Database;
use tracing::{debug, info};
use uuid::Uuid;

use crate::policy::OwnershipPolicy;
use crate::report::document::{Column, DocumentCanvas, ReportDocument};
use crate::session::SessionStore;

/// Rows of a report, newest first, and the sum of their amounts.
#[derive(Debug, Clone)]
pub struct ReportResult {
    pub query: ReportQuery,
    pub contracts: Vec<ContractModel>,
    pub total: Decimal,
}

pub struct ReportEngine<DB: Database> {
    contracts: Arc<dyn ContractRepository<DB>>,
    sellers: Arc<dyn SellerRepository<DB>>,
    sessions: Arc<dyn SessionStore>,
}

impl<DB: Database> ReportEngine<DB> {
    pub fn new(
        contracts: Arc<dyn ContractRepository<DB>>,
        sellers: Arc<dyn SellerRepository<DB>>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            contracts,
            sellers,
            sessions,
        }
    }

    /// Runs the filtered report and remembers the query for export.
    ///
    /// The whole filter is parsed before anything runs, so a malformed field applies nothing.
    pub async fn run(
        &self,
        identity: &Identity,
        token: &str,
        input: &ReportFilterInput,
    ) -> ApiResult<ReportResult> {
        let query = ReportQuery::parse(input)?;
        let result = self.execute(identity, query.clone()).await?;

        let mut state = self.sessions.load(token).await.unwrap_or_default();
        state.last_report = Some(LastReportQuery::new(identity.account_id, query));
        self.sessions.store(token, state).await;
        Ok(result)
    }

    pub async fn execute(&self, identity: &Identity, query: ReportQuery) -> ApiResult<ReportResult> {
        let predicate = ContractQuery::from_report(OwnershipPolicy::scope(identity), &query);
        let contracts = self.contracts.find_contracts(&predicate).await?;
        let total = contracts.iter().map(|c| c.amount).sum();
        debug!(account_id = %identity.account_id, rows = contracts.len(), "report executed");
        Ok(ReportResult {
            query,
            contracts,
            total,
        })
    }

    /// Renders the last report this identity ran in this session.
    pub async fn export_pdf(
        &self,
        identity: &Identity,
        token: &str,
        canvas: &mut dyn DocumentCanvas,
    ) -> ApiResult<ReportResult> {
        let last = self
            .sessions
            .load(token)
            .await
            .and_then(|state| state.last_report)
            .filter(|last| last.account_id == identity.account_id)
            .ok_or_else(|| ApiError::ValidationError("run a report before exporting it".to_string()))?;

        let result = self.execute(identity, last.query).await?;
        let seller_names = self.seller_names(&result.contracts).await?;

        let mut document = ReportDocument::new(
            "Relatório de Clientes",
            vec![
                Column { title: "Cliente", x: 40.0, max_chars: 28 },
                Column { title: "CPF", x: 190.0, max_chars: 16 },
                Column { title: "Produto", x: 275.0, max_chars: 24 },
                Column { title: "Valor", x: 400.0, max_chars: 18 },
                Column { title: "Vendedor", x: 480.0, max_chars: 14 },
            ],
        );
        for contract in &result.contracts {
            let seller = contract
                .seller_id
                .and_then(|id| seller_names.get(&id))
                .cloned()
                .unwrap_or_default();
            document.push_row(vec![
                contract.name.to_string(),
                contract.tax_id.to_string(),
                contract.product.as_deref().unwrap_or_default().to_string(),
                format_brl(contract.amount),
                seller,
            ]);
        }
        document.set_total(format!("Total: {}", format_brl(result.total)));
        let pages = document.render(canvas);
        info!(account_id = %identity.account_id, rows = result.contracts.len(), pages, "report exported");
        Ok(result)
    }

    /// Renders the sales statement of one seller, limited to the caller's contracts.
    pub async fn seller_statement(
        &self,
        identity: &Identity,
        seller_id: Uuid,
        canvas: &mut dyn DocumentCanvas,
    ) -> ApiResult<ReportResult> {
        let seller: SellerModel = self
            .sellers
            .load_batch(&[seller_id])
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| ApiError::not_found("Seller"))?;

        let query = ReportQuery {
            seller_id: Some(seller_id),
            ..Default::default()
        };
        let result = self.execute(identity, query).await?;

        let mut document = ReportDocument::new(
            format!("Extrato de Vendas - {}", seller.name),
            vec![
                Column { title: "Data", x: 40.0, max_chars: 10 },
                Column { title: "Cliente", x: 100.0, max_chars: 30 },
                Column { title: "Produto", x: 270.0, max_chars: 24 },
                Column { title: "Valor", x: 400.0, max_chars: 18 },
                Column { title: "Status", x: 485.0, max_chars: 14 },
            ],
        );
        for contract in &result.contracts {
            document.push_row(vec![
                contract.created_at.format("%d/%m/%Y").to_string(),
                contract.name.to_string(),
                contract.product.as_deref().unwrap_or_default().to_string(),
                format_brl(contract.amount),
                contract.contract_status.label().to_string(),
            ]);
        }
        document.set_total(format!("Total: {}", format_brl(result.total)));
        let pages = document.render(canvas);
        info!(account_id = %identity.account_id, %seller_id, pages, "seller statement exported");
        Ok(result)
    }

    /// Names of the sellers referenced by `contracts`; deleted sellers are absent.
    async fn seller_names(&self, contracts: &[ContractModel]) -> ApiResult<HashMap<Uuid, String>> {
        let mut ids: Vec<Uuid> = contracts.iter().filter_map(|c| c.seller_id).collect();
        ids.sort();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let sellers = self.sellers.load_batch(&ids).await?;
        Ok(sellers
            .into_iter()
            .flatten()
            .map(|s| (s.id, s.name.to_string()))
            .collect())
    }
}
