pub mod http;
pub use http::ApiClient;
pub mod crud;
pub use crud::{ActivitiesApi, ContactsApi, CustomersApi, DealsApi};
pub mod extras_api;
pub use extras_api::CustomerExtrasApi;
pub mod pipeline_api;
pub use pipeline_api::PipelineApi;
pub mod dashboard_api;
pub use dashboard_api::DashboardApi;
pub mod lookup_api;
pub use lookup_api::LookupApi;
