//! Hospital Dashboard Page
//!
//! Paid-tier overview built from the one-shot hospital directory fetch.
//! This page is purely presentational; it does not hold a live channel.

use std::collections::HashSet;

use leptos::*;

use crate::api;
use crate::components::Loading;
use crate::state::global::GlobalState;
use crate::state::wait_times::wait_minutes;

/// Paid hospital dashboard page
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Extract the signals we need
    let hospitals = state.hospitals;
    let loading = state.loading;

    // Fetch the directory on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        spawn_local(async move {
            state.loading.set(true);
            match api::fetch_hospitals().await {
                Ok(hospitals) => {
                    state.hospitals.set(hospitals);
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }
            state.loading.set(false);
        });
    });

    let facility_count = create_memo(move |_| hospitals.get().len());
    let region_count = create_memo(move |_| {
        hospitals
            .get()
            .iter()
            .map(|h| h.region.clone())
            .filter(|r| !r.is_empty())
            .collect::<HashSet<_>>()
            .len()
    });
    let longest_wait = create_memo(move |_| {
        hospitals
            .get()
            .iter()
            .filter_map(|h| {
                h.wait_time
                    .as_ref()
                    .map(|w| (h.name.clone(), w.clone(), wait_minutes(w)))
            })
            .max_by_key(|(_, _, minutes)| *minutes)
    });

    view! {
        <div class="space-y-8">
            // Header
            <div>
                <h1 class="text-3xl font-bold">"Hospital Dashboard"</h1>
                <p class="text-gray-400 mt-1">"Network-wide overview for hospital operations teams"</p>
            </div>

            // Summary row
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <StatCard
                    label="Facilities"
                    value=Signal::derive(move || facility_count.get().to_string())
                />
                <StatCard
                    label="Regions"
                    value=Signal::derive(move || region_count.get().to_string())
                />
                <StatCard
                    label="Longest Wait"
                    value=Signal::derive(move || {
                        longest_wait.get()
                            .map(|(_, wait, _)| wait)
                            .unwrap_or_else(|| "—".to_string())
                    })
                    caption=Signal::derive(move || {
                        longest_wait.get().map(|(name, _, _)| name).unwrap_or_default()
                    })
                />
            </div>

            // Directory table
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Facility Directory"</h2>

                {move || {
                    if loading.get() {
                        view! { <Loading /> }.into_view()
                    } else {
                        view! { <DirectoryTable /> }.into_view()
                    }
                }}
            </section>
        </div>
    }
}

/// Single summary stat card
#[component]
fn StatCard(
    label: &'static str,
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional, into)]
    caption: Option<Signal<String>>,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
            <span class="text-gray-400 text-sm">{label}</span>
            <div class="text-3xl font-bold mt-2">{move || value.get()}</div>
            {caption.map(|caption| view! {
                <p class="text-gray-500 text-sm mt-1 truncate">{move || caption.get()}</p>
            })}
        </div>
    }
}

/// Full facility directory table
#[component]
fn DirectoryTable() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <table class="w-full text-left text-sm">
            <thead>
                <tr class="text-gray-400 border-b border-gray-700">
                    <th class="py-2">"Hospital"</th>
                    <th class="py-2">"Region"</th>
                    <th class="py-2">"Category"</th>
                    <th class="py-2 text-right">"Wait Time"</th>
                    <th class="py-2 text-right">"Notes"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    let hospitals = state.hospitals.get();
                    if hospitals.is_empty() {
                        view! {
                            <tr>
                                <td colspan="5" class="py-6 text-center text-gray-400">
                                    "No facility data available"
                                </td>
                            </tr>
                        }.into_view()
                    } else {
                        hospitals.into_iter().map(|hospital| view! {
                            <tr class="border-b border-gray-700 last:border-0">
                                <td class="py-2">{hospital.name}</td>
                                <td class="py-2 text-gray-400">{hospital.region}</td>
                                <td class="py-2 text-gray-400">{hospital.category}</td>
                                <td class="py-2 text-right">
                                    {hospital.wait_time.unwrap_or_else(|| "N/A".to_string())}
                                </td>
                                <td class="py-2 text-right text-gray-400">
                                    {hospital.note.unwrap_or_else(|| "N/A".to_string())}
                                </td>
                            </tr>
                        }).collect_view()
                    }
                }}
            </tbody>
        </table>
    }
}
