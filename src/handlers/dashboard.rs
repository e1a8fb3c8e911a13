// src/handlers/dashboard.rs

use crate::{
    common::error::AppError, config::AppState, models::dashboard::AutomationKind, ui::Interaction,
    views::dashboard::DashboardView,
};

// crm dashboard
pub async fn show(state: &AppState) -> Result<(), AppError> {
    let mut view = DashboardView::default();
    state.dashboard_service.load(&mut view).await?;
    print!("{}", view.render());
    Ok(())
}

// crm automation <kind>
pub async fn automation(state: &AppState, kind: AutomationKind, ui: &dyn Interaction) -> Result<(), AppError> {
    let mut view = DashboardView::default();
    let result = state.dashboard_service.run_automation(&mut view, kind, ui).await?;

    for (key, value) in &result.details {
        println!("{key}: {value}");
    }
    print!("{}", view.render());
    Ok(())
}
