// src/views/dashboard.rs

use std::fmt::Write;

use crate::{
    common::format::{format_brl, format_percent},
    models::dashboard::{AlertPriority, AlertsResponse, DashboardStats},
};

/// Só sai de `Loading` quando estatísticas e alertas chegaram juntos.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DashboardView {
    #[default]
    Loading,
    Ready {
        stats: DashboardStats,
        alerts: AlertsResponse,
    },
}

impl DashboardView {
    pub fn is_ready(&self) -> bool {
        matches!(self, DashboardView::Ready { .. })
    }

    pub fn render(&self) -> String {
        let (stats, alerts) = match self {
            DashboardView::Loading => return "Carregando dashboard...\n".to_string(),
            DashboardView::Ready { stats, alerts } => (stats, alerts),
        };

        let mut out = String::new();
        let c = &stats.customers;
        let _ = writeln!(
            out,
            "Clientes: {} (leads {}, prospects {}, clientes {}, inativos {}) · {} novos no mês · conversão {}",
            c.total,
            c.leads,
            c.prospects,
            c.clientes,
            c.inativos,
            c.new_this_month,
            format_percent(c.conversion_rate)
        );

        let d = &stats.deals;
        let _ = writeln!(
            out,
            "Deals: {} abertos · {} ganhos · {} perdidos · em aberto {} · ganho no mês {}",
            d.open,
            d.won,
            d.lost,
            format_brl(d.total_open_value),
            format_brl(d.won_this_month)
        );
        let _ = writeln!(
            out,
            "Atividades pendentes: {} · Interações na semana: {}",
            stats.activities.pending, stats.interactions.this_week
        );

        if !stats.top_customers.is_empty() {
            let _ = writeln!(out, "\nTop clientes:");
            for (pos, top) in stats.top_customers.iter().enumerate() {
                let _ = writeln!(out, "  {}. {} · {}", pos + 1, top.name, format_brl(top.valor_contrato));
            }
        }

        let _ = writeln!(out, "\nAlertas ({}):", alerts.total);
        if alerts.alerts.is_empty() {
            let _ = writeln!(out, "  nenhum alerta");
        }
        for alert in &alerts.alerts {
            let icon = match alert.priority {
                AlertPriority::High => "🔴",
                AlertPriority::Medium => "🟡",
                AlertPriority::Low => "⚪",
            };
            let _ = writeln!(out, "  {} {}", icon, alert.message);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_renders_placeholder_only() {
        assert_eq!(DashboardView::Loading.render(), "Carregando dashboard...\n");
        assert!(!DashboardView::default().is_ready());
    }

    #[test]
    fn ready_renders_backend_numbers() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{"customers": {"total": 10, "leads": 4, "conversion_rate": 25.5},
                "deals": {"open": 3, "won": 2, "lost": 1, "total_open_value": 12345.6},
                "top_customers": [{"id": 1, "name": "ACME", "valor_contrato": 5000}]}"#,
        )
        .unwrap();
        let alerts: AlertsResponse = serde_json::from_str(
            r#"{"total": 1, "alerts": [{"type": "overdue_activity", "priority": "high", "message": "Ligar para ACME"}]}"#,
        )
        .unwrap();

        let text = DashboardView::Ready { stats, alerts }.render();
        assert!(text.contains("Clientes: 10 (leads 4"));
        assert!(text.contains("conversão 25,5%"));
        assert!(text.contains("em aberto R$ 12.345,60"));
        assert!(text.contains("1. ACME · R$ 5.000,00"));
        assert!(text.contains("🔴 Ligar para ACME"));
    }
}
