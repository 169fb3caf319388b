//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::channel::ConnectionState;
use crate::components::{Nav, Toast};
use crate::pages::{Dashboard, Home, Hospital, Patient};
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                // Navigation header
                <Nav />

                // Main content area
                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=Home />
                        <Route path="/patient" view=Patient />
                        <Route path="/hospital" view=Hospital />
                        <Route path="/hospital-dashboard" view=Dashboard />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Footer with connection status
                <Footer />

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Footer component showing live-feed status
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                // Channel status pills
                <div class="flex items-center space-x-6">
                    <StatusPill label="Wait times" status=state.wait_status />
                    <StatusPill label="Triage" status=state.triage_status />
                </div>

                // Last live update time
                <div class="text-gray-400">
                    {move || {
                        state.last_update.get()
                            .and_then(|ts| chrono::DateTime::from_timestamp_millis(ts))
                            .map(|dt| format!("Last update: {}", dt.format("%H:%M:%S")))
                            .unwrap_or_else(|| "No live data".to_string())
                    }}
                </div>
            </div>
        </footer>
    }
}

/// Colored connection indicator for one feed
#[component]
fn StatusPill(label: &'static str, status: RwSignal<ConnectionState>) -> impl IntoView {
    view! {
        <div class="flex items-center space-x-2">
            <span class="text-gray-400">{label}</span>
            {move || {
                let connection_state = status.get();
                let (dot, text_class) = match connection_state {
                    ConnectionState::Open => ("bg-green-400 pulse", "text-green-400"),
                    ConnectionState::Connecting | ConnectionState::Retrying => {
                        ("bg-yellow-400", "text-yellow-400")
                    }
                    ConnectionState::Closed => ("bg-red-400", "text-red-400"),
                };

                view! {
                    <span class=format!("flex items-center space-x-1 {}", text_class)>
                        <span class=format!("w-2 h-2 rounded-full {}", dot) />
                        <span>{connection_state.label()}</span>
                    </span>
                }
            }}
        </div>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Back to HealthFlow"
            </A>
        </div>
    }
}
