// src/models/dashboard.rs

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::models::ids::RecordId;

// 1. KPIs (os cards do topo)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CustomerStats {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub leads: u32,
    #[serde(default)]
    pub prospects: u32,
    #[serde(default)]
    pub clientes: u32,
    #[serde(default)]
    pub inativos: u32,
    #[serde(default)]
    pub new_this_month: u32,
    #[serde(default)]
    pub conversion_rate: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DealStats {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub open: u32,
    #[serde(default)]
    pub won: u32,
    #[serde(default)]
    pub lost: u32,
    #[serde(default)]
    pub total_open_value: Decimal,
    #[serde(default)]
    pub won_this_month: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ActivityStats {
    #[serde(default)]
    pub pending: u32,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct InteractionStats {
    #[serde(default)]
    pub this_week: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TopCustomer {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub valor_contrato: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DashboardStats {
    #[serde(default)]
    pub customers: CustomerStats,
    #[serde(default)]
    pub deals: DealStats,
    #[serde(default)]
    pub activities: ActivityStats,
    #[serde(default)]
    pub interactions: InteractionStats,
    #[serde(default)]
    pub top_customers: Vec<TopCustomer>,
}

// 2. Alertas (priorizados pelo backend)

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    High,
    Medium,
    #[default]
    #[serde(other)]
    Low,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DashboardAlert {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub priority: AlertPriority,
    pub message: String,
    #[serde(default)]
    pub customer_id: Option<RecordId>,
    #[serde(default)]
    pub activity_id: Option<RecordId>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AlertsResponse {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub alerts: Vec<DashboardAlert>,
}

// 3. Automações

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomationKind {
    Score,
    Convert,
    Inactive,
    Renewal,
}

impl AutomationKind {
    pub const ALL: [AutomationKind; 4] = [
        AutomationKind::Score,
        AutomationKind::Convert,
        AutomationKind::Inactive,
        AutomationKind::Renewal,
    ];

    pub fn endpoint(&self) -> &'static str {
        match self {
            AutomationKind::Score => "/automation/score-leads",
            AutomationKind::Convert => "/automation/convert-hot-leads",
            AutomationKind::Inactive => "/automation/inactive-customer-alert",
            AutomationKind::Renewal => "/automation/contract-renewal-reminder",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AutomationKind::Score => "score",
            AutomationKind::Convert => "convert",
            AutomationKind::Inactive => "inactive",
            AutomationKind::Renewal => "renewal",
        }
    }
}

impl fmt::Display for AutomationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AutomationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AutomationKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("automação desconhecida: {s} (use score, convert, inactive ou renewal)"))
    }
}

/// `{"message": "...", ...contadores}`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AutomationResult {
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, Value>,
}
