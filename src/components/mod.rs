//! UI Components
//!
//! Reusable Leptos components.

mod branch_form;
mod branch_progress_modal;
mod delete_confirm_button;
mod download;
mod department_form;
mod field;
mod kpi_form;
mod modal;
mod navbar;
mod revenue_chart;
mod revenue_target_modal;
mod role_form;
mod sidebar;
mod subtask_form;
mod task_actions;
mod task_board;
mod task_form;
mod task_table;
mod toaster;
mod user_details_modal;
mod user_form;

pub use branch_form::BranchFormModal;
pub use branch_progress_modal::BranchProgressModal;
pub use delete_confirm_button::DeleteConfirmButton;
pub use download::download_text;
pub use department_form::DepartmentFormModal;
pub use field::{FileField, SelectField, TextField};
pub use kpi_form::KpiFormModal;
pub use modal::Modal;
pub use navbar::{Navbar, UserAvatar};
pub use revenue_chart::RevenueChart;
pub use revenue_target_modal::RevenueTargetModal;
pub use role_form::RoleFormModal;
pub use sidebar::Sidebar;
pub use subtask_form::SubTaskModal;
pub use task_actions::TaskActions;
pub use task_board::TaskBoard;
pub use task_form::TaskFormModal;
pub use task_table::TaskTable;
pub use toaster::Toaster;
pub use user_details_modal::UserDetailsModal;
pub use user_form::UserFormModal;
