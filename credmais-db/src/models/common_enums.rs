use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "contract_status", rename_all = "PascalCase")]
pub enum ContractStatus {
    Open,
    UnderReview,
    Paid,
    Cancelled,
}

impl ContractStatus {
    /// Label printed on dashboards and reports
    pub fn label(&self) -> &'static str {
        match self {
            ContractStatus::Open => "Em Aberto",
            ContractStatus::UnderReview => "Em Análise",
            ContractStatus::Paid => "Pago",
            ContractStatus::Cancelled => "Cancelado",
        }
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractStatus::Open => write!(f, "Open"),
            ContractStatus::UnderReview => write!(f, "UnderReview"),
            ContractStatus::Paid => write!(f, "Paid"),
            ContractStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for ContractStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(ContractStatus::Open),
            "UnderReview" => Ok(ContractStatus::UnderReview),
            "Paid" => Ok(ContractStatus::Paid),
            "Cancelled" => Ok(ContractStatus::Cancelled),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "commission_status", rename_all = "PascalCase")]
pub enum CommissionStatus {
    ToPay,
    Paid,
    Cancelled,
}

impl CommissionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CommissionStatus::ToPay => "A Pagar",
            CommissionStatus::Paid => "Pago",
            CommissionStatus::Cancelled => "Cancelado",
        }
    }
}

impl std::fmt::Display for CommissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommissionStatus::ToPay => write!(f, "ToPay"),
            CommissionStatus::Paid => write!(f, "Paid"),
            CommissionStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for CommissionStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ToPay" => Ok(CommissionStatus::ToPay),
            "Paid" => Ok(CommissionStatus::Paid),
            "Cancelled" => Ok(CommissionStatus::Cancelled),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "formalization_status", rename_all = "PascalCase")]
pub enum FormalizationStatus {
    NotFormalized,
    InProgress,
    Formalized,
}

impl FormalizationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FormalizationStatus::NotFormalized => "Não Formalizado",
            FormalizationStatus::InProgress => "Em Formalização",
            FormalizationStatus::Formalized => "Formalizado",
        }
    }
}

impl std::fmt::Display for FormalizationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormalizationStatus::NotFormalized => write!(f, "NotFormalized"),
            FormalizationStatus::InProgress => write!(f, "InProgress"),
            FormalizationStatus::Formalized => write!(f, "Formalized"),
        }
    }
}

impl FromStr for FormalizationStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NotFormalized" => Ok(FormalizationStatus::NotFormalized),
            "InProgress" => Ok(FormalizationStatus::InProgress),
            "Formalized" => Ok(FormalizationStatus::Formalized),
            _ => Err(()),
        }
    }
}
