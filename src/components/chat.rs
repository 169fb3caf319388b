//! Chat Transcript Component
//!
//! Renders the triage conversation as chat bubbles.

use leptos::*;

use crate::state::global::GlobalState;
use crate::state::triage::Sender;

/// Scrollable triage chat transcript
#[component]
pub fn ChatTranscript() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="flex-1 overflow-y-auto px-4 py-3 space-y-2 min-h-[20rem]">
            {move || {
                state.chat.get().into_iter().map(|message| {
                    let from_patient = message.sender == Sender::Patient;
                    let align = if from_patient { "justify-end" } else { "justify-start" };
                    let bubble = if from_patient {
                        "bg-primary-600 text-white"
                    } else {
                        "bg-gray-700 text-gray-100"
                    };

                    view! {
                        <div class=format!("flex {}", align)>
                            <div class=format!(
                                "max-w-[70%] rounded-lg px-4 py-2 text-sm whitespace-pre-line {}",
                                bubble
                            )>
                                {message.text}
                            </div>
                        </div>
                    }
                }).collect_view()
            }}
        </div>
    }
}
