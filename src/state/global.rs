//! Global Application State
//!
//! Reactive state management using Leptos signals. The feeds write here
//! through their bridges; pages and the footer only ever read.

use leptos::*;

use crate::api::client::HospitalRecord;
use crate::channel::ConnectionState;
use crate::state::triage::{ChatMessage, GREETING};
use crate::state::wait_times::WaitTimeRow;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Live emergency department rows, replaced wholesale on every frame
    pub wait_rows: RwSignal<Vec<WaitTimeRow>>,
    /// Wait-time feed connection status
    pub wait_status: RwSignal<ConnectionState>,
    /// Set whenever any facility crosses the high-wait threshold
    pub wait_alert: RwSignal<Option<String>>,
    /// Millis timestamp of the last live wait-time update
    pub last_update: RwSignal<Option<i64>>,
    /// Triage chat transcript, append-only
    pub chat: RwSignal<Vec<ChatMessage>>,
    /// Triage feed connection status
    pub triage_status: RwSignal<ConnectionState>,
    /// Hospital directory fetched over REST for the paid dashboard
    pub hospitals: RwSignal<Vec<HospitalRecord>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        wait_rows: create_rw_signal(Vec::new()),
        wait_status: create_rw_signal(ConnectionState::Closed),
        wait_alert: create_rw_signal(None),
        last_update: create_rw_signal(None),
        chat: create_rw_signal(vec![ChatMessage::assistant(GREETING)]),
        triage_status: create_rw_signal(ConnectionState::Closed),
        hospitals: create_rw_signal(Vec::new()),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
