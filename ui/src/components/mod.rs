pub mod admin_actions;
pub mod alert;
pub mod charts;
pub mod edit_modal;
pub mod sidebar;
pub mod stats;
pub mod student_info;

pub use admin_actions::AdminActions;
pub use alert::AlertDialog;
pub use charts::{BarChart, HistogramChart};
pub use edit_modal::EditModal;
pub use sidebar::Sidebar;
pub use stats::StatCards;
pub use student_info::StudentInfo;
