//! State Management
//!
//! Global signal state plus the two live feeds built on the channel.

pub mod global;
pub mod triage;
pub mod wait_times;

pub use global::{provide_global_state, GlobalState};
