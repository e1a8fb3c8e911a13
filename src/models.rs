pub mod crm;
pub mod customer_form;
pub mod dashboard;
pub mod ids;
pub mod lookup;
pub mod pipeline;
pub mod sales;

pub use ids::RecordId;
