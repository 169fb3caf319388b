//! Landing Page
//!
//! Entry point routing visitors to the patient or hospital experience.

use leptos::*;
use leptos_router::*;

/// Landing page component
#[component]
pub fn Home() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[70vh] text-center space-y-6">
            <div class="text-6xl animate-pulse">"🏥"</div>
            <h1 class="text-4xl font-bold">"HealthFlow AI"</h1>
            <p class="text-gray-400 max-w-md">
                "Smarter care decisions — real-time AI insights for all healthcare."
            </p>

            <div class="flex space-x-4">
                <A
                    href="/patient"
                    class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "I am a Patient"
                </A>
                <A
                    href="/hospital"
                    class="px-6 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium transition-colors"
                >
                    "I work at a Hospital"
                </A>
            </div>
        </div>
    }
}
