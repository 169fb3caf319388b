//! REST API Client
//!
//! One-shot request/response calls against the HealthFlow backend. Live
//! data arrives over the channel instead; see `crate::channel`.

pub mod client;

pub use client::{fetch_hospitals, get_api_base, get_ws_base, HospitalRecord};
