//! HealthFlow Dashboard
//!
//! Hospital wait-time and patient-triage dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Live emergency department wait times over WebSocket
//! - AI triage chat for patients
//! - Network-wide facility overview for the paid tier
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Page-load data arrives over HTTP; live updates flow through
//! reconnecting WebSocket channels (see `channel`).

use leptos::*;

mod api;
mod app;
mod channel;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
