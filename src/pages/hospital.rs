//! Hospital Metrics Page
//!
//! Free-tier live wait-time board. The feed is page-scoped: it opens on
//! mount and closes on cleanup, which also cancels any pending reconnect.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::channel::ConnectionState;
use crate::components::{TableSkeleton, WaitTable};
use crate::state::global::GlobalState;
use crate::state::wait_times::WaitTimesFeed;

/// Free-tier hospital metrics page
#[component]
pub fn Hospital() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let feed = WaitTimesFeed::connect(state.clone(), &api::get_ws_base());
    on_cleanup(move || feed.close());

    let status = state.wait_status;

    view! {
        <div class="space-y-6">
            // Header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Hospital Metrics"</h1>
                    <p class="text-gray-400 mt-1">"Live emergency department wait times (free tier)"</p>
                </div>

                <A
                    href="/hospital-dashboard"
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "Upgrade to Full Dashboard"
                </A>
            </div>

            // Live board
            <section class="bg-gray-800 rounded-xl p-6">
                {move || {
                    let connecting = status.get() == ConnectionState::Connecting;
                    if connecting && state.wait_rows.get().is_empty() {
                        view! { <TableSkeleton /> }.into_view()
                    } else {
                        view! { <WaitTable /> }.into_view()
                    }
                }}
            </section>
        </div>
    }
}
