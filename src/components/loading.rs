//! Loading Component
//!
//! Loading spinners and skeleton states.

use leptos::*;

/// Full-page loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Skeleton loader for the wait-time table
#[component]
pub fn TableSkeleton() -> impl IntoView {
    view! {
        <div class="animate-pulse space-y-3">
            <div class="h-4 bg-gray-700 rounded w-1/4" />
            {(0..5).map(|_| view! {
                <div class="flex space-x-4">
                    <div class="h-4 bg-gray-700 rounded w-1/2" />
                    <div class="h-4 bg-gray-700 rounded w-1/4" />
                    <div class="h-4 bg-gray-700 rounded w-1/4" />
                </div>
            }).collect_view()}
        </div>
    }
}
