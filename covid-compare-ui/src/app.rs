//! App Root Component
//!
//! Routing, global providers and the status footer.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{InlineLoading, Toast};
use crate::pages::{refresh_feed, Compare};
use crate::state::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=Compare />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />

                <Toast />
            </div>
        </Router>
    }
}

/// Ask the server to re-read its states file, then fetch the new feed.
///
/// The request guard spans both calls, so Reload stays disabled until the
/// new feed is delivered.
fn reload(state: GlobalState) {
    spawn_local(async move {
        let _request = state.begin_request();
        match api::reload_states().await {
            Ok(report) => {
                match report.errors.first() {
                    Some(first) if report.status == "partial" => state.show_warning(&format!(
                        "{} rows skipped, first: {}",
                        report.rows_failed, first
                    )),
                    _ => state.show_success(&format!("Reloaded {} states", report.total)),
                }
                refresh_feed(state).await;
            }
            Err(e) => state.show_error(&format!("Reload failed: {}", e)),
        }
    });
}

/// Footer showing feed status
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let api_base = api::get_api_base();

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                <div class="flex items-center space-x-2">
                    {move || match state.state_count() {
                        Some(count) => view! {
                            <span class="flex items-center space-x-1 text-green-400">
                                <span class="w-2 h-2 bg-green-400 rounded-full" />
                                <span>{format!("{} states loaded", count)}</span>
                            </span>
                        }.into_view(),
                        None => view! {
                            <span class="flex items-center space-x-1 text-red-400">
                                <span class="w-2 h-2 bg-red-400 rounded-full" />
                                <span>"No data"</span>
                            </span>
                        }.into_view(),
                    }}
                    <span class="text-gray-500">{api_base}</span>
                </div>

                <div class="text-gray-400">
                    {move || {
                        state.last_loaded.get()
                            .and_then(chrono::DateTime::from_timestamp_millis)
                            .map(|dt| format!("Last loaded: {}", dt.format("%H:%M:%S")))
                            .unwrap_or_else(|| "Not loaded".to_string())
                    }}
                </div>

                <div class="flex items-center space-x-3">
                    <Show when=move || state.is_loading()>
                        <span class="flex items-center space-x-2 text-gray-300">
                            <InlineLoading />
                            <span>"Loading..."</span>
                        </span>
                    </Show>
                    <button
                        class="px-3 py-1 bg-gray-700 hover:bg-gray-600 rounded disabled:opacity-50"
                        disabled=move || state.is_loading()
                        on:click=move |_| reload(state)
                    >
                        "Reload"
                    </button>
                </div>
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"Nothing lives at this address."</p>
            <A
                href="/"
                class="px-6 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium transition-colors"
            >
                "Back to the chart"
            </A>
        </div>
    }
}
