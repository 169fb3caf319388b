//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chat;
pub mod loading;
pub mod nav;
pub mod toast;
pub mod wait_table;

pub use chat::ChatTranscript;
pub use loading::{Loading, TableSkeleton};
pub use nav::Nav;
pub use toast::Toast;
pub use wait_table::WaitTable;
