//! Patient Chat Page
//!
//! Free-tier symptom chat backed by the live triage channel. The channel is
//! opened when the page mounts and torn down on cleanup, so leaving the
//! page cancels any pending reconnect.

use std::rc::Rc;

use leptos::*;

use crate::api;
use crate::channel::ConnectionState;
use crate::components::ChatTranscript;
use crate::state::global::GlobalState;
use crate::state::triage::TriageFeed;

const EXAMPLE_PROMPTS: [&str; 3] = [
    "What should I do if someone has a seizure?",
    "Where is the closest hospital with the shortest wait time?",
    "How do I know if my symptoms need urgent care?",
];

/// Patient triage chat page
#[component]
pub fn Patient() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let feed = Rc::new(TriageFeed::connect(state.clone(), &api::get_ws_base()));
    {
        let feed = Rc::clone(&feed);
        on_cleanup(move || feed.close());
    }

    let (input, set_input) = create_signal(String::new());
    let status = state.triage_status;

    let send = {
        let feed = Rc::clone(&feed);
        let state = state.clone();
        move |text: String| {
            let text = text.trim().to_string();
            if text.is_empty() {
                return;
            }
            feed.send_symptoms(&state, &text);
            set_input.set(String::new());
        }
    };

    view! {
        <div class="space-y-6">
            // Header
            <div>
                <h1 class="text-3xl font-bold">"Patient Services"</h1>
                <p class="text-gray-400 mt-1">"Describe your symptoms and get instant triage guidance"</p>
            </div>

            // Example prompts
            <div class="flex flex-wrap gap-2">
                {EXAMPLE_PROMPTS.iter().map(|prompt| {
                    let send = send.clone();
                    view! {
                        <button
                            on:click=move |_| send(prompt.to_string())
                            class="px-4 py-2 bg-gray-800 hover:bg-gray-700 border border-gray-700
                                   rounded-full text-sm transition-colors"
                        >
                            {*prompt}
                        </button>
                    }
                }).collect_view()}
            </div>

            // Chat panel
            <div class="bg-gray-800 rounded-xl flex flex-col max-h-[70vh]">
                <ConnectionBanner status=status />
                <ChatTranscript />

                // Input row
                <div class="px-4 py-3 border-t border-gray-700">
                    <div class="flex space-x-2">
                        <input
                            type="text"
                            placeholder="Type your symptoms here..."
                            prop:value=move || input.get()
                            on:input=move |ev| set_input.set(event_target_value(&ev))
                            on:keydown={
                                let send = send.clone();
                                move |ev: web_sys::KeyboardEvent| {
                                    if ev.key() == "Enter" {
                                        ev.prevent_default();
                                        send(input.get_untracked());
                                    }
                                }
                            }
                            disabled=move || !status.get().is_open()
                            class="flex-1 bg-gray-700 rounded-full px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                        <button
                            on:click={
                                let send = send.clone();
                                move |_| send(input.get_untracked())
                            }
                            disabled=move || !status.get().is_open()
                            class="px-5 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                                   rounded-full font-medium transition-colors"
                        >
                            "Send"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

/// Connecting / retrying banner above the transcript
#[component]
fn ConnectionBanner(status: RwSignal<ConnectionState>) -> impl IntoView {
    view! {
        {move || match status.get() {
            ConnectionState::Open => view! {
                <p class="text-center text-xs text-gray-500 py-2">
                    "Connected • You can start typing..."
                </p>
            }.into_view(),
            ConnectionState::Connecting => view! {
                <p class="text-center text-xs text-gray-400 py-2">"Connecting..."</p>
            }.into_view(),
            _ => view! {
                <p class="text-center text-xs text-red-400 py-2">
                    "Disconnected from AI service. Retrying..."
                </p>
            }.into_view(),
        }}
    }
}
