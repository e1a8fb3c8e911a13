pub mod board;
pub use board::{BoardView, PendingAction};
pub mod dashboard;
pub use dashboard::DashboardView;
pub mod customers;
pub use customers::{CustomerDetails, CustomerFilter, export_csv};
