mod dashboard;
mod data_table;
mod login;
mod overview;
mod reports;

pub use dashboard::DashboardView;
pub use data_table::DataTableView;
pub use login::{LoginView, SplashView};
pub use overview::OverviewView;
pub use reports::ReportsView;
