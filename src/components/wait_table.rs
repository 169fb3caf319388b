//! Wait-Time Table Component
//!
//! Live emergency department board with the high-wait alert banner and the
//! "updated N min ago" caption.

use leptos::*;

use crate::state::global::GlobalState;

/// Live wait-time table fed from global state
#[component]
pub fn WaitTable() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="space-y-4">
            // High-wait alert banner
            {move || {
                state.wait_alert.get().map(|alert| view! {
                    <div class="flex items-center space-x-2 bg-yellow-900/40 border border-yellow-600
                                text-yellow-300 rounded-lg px-4 py-3">
                        <span class="text-lg">"⚠"</span>
                        <span class="text-sm font-medium">{alert}</span>
                    </div>
                })
            }}

            // Freshness caption
            {move || {
                state.last_update.get().map(|ts| view! {
                    <p class="text-gray-500 text-xs">
                        {updated_label(ts, chrono::Utc::now().timestamp_millis())}
                    </p>
                })
            }}

            <table class="w-full text-left">
                <thead>
                    <tr class="text-gray-400 text-sm border-b border-gray-700">
                        <th class="py-2">"Hospital"</th>
                        <th class="py-2 text-right">"Wait Time"</th>
                        <th class="py-2 text-right">"Operating Hours / Notes"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = state.wait_rows.get();
                        if rows.is_empty() {
                            view! {
                                <tr>
                                    <td colspan="3" class="py-6 text-center text-gray-400">
                                        "Waiting for live data..."
                                    </td>
                                </tr>
                            }.into_view()
                        } else {
                            rows.into_iter().map(|row| view! {
                                <tr class="border-b border-gray-700 last:border-0">
                                    <td class="py-2">{row.name}</td>
                                    <td class="py-2 text-right">{row.wait_time}</td>
                                    <td class="py-2 text-right whitespace-pre-line">
                                        {note_lines(&row.note)}
                                    </td>
                                </tr>
                            }).collect_view()
                        }
                    }}
                </tbody>
            </table>
        </div>
    }
}

/// The upstream source embeds `<br>` tags in notes; render them as lines.
fn note_lines(note: &str) -> String {
    note.replace("<br />", "\n")
        .replace("<br/>", "\n")
        .replace("<br>", "\n")
}

/// "Updated 2 mins ago" caption text.
fn updated_label(then_ms: i64, now_ms: i64) -> String {
    let minutes = (now_ms - then_ms).max(0) / 60_000;
    match minutes {
        0 => "Updated just now".to_string(),
        1 => "Updated 1 min ago".to_string(),
        n => format!("Updated {} mins ago", n),
    }
}
