pub mod pipeline_service;
pub use pipeline_service::PipelineService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod enrichment_service;
pub use enrichment_service::{EnrichmentService, LookupOutcome};
pub mod customer_service;
pub use customer_service::CustomerService;
pub mod records_service;
pub use records_service::RecordService;

/// Resultado de uma ação que o usuário pode cancelar num diálogo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Cancelled,
}
