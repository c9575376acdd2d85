//! Navbar Component
//!
//! State checkboxes, select/deselect all, and the chart parameter picker.
//! Holds no state of its own: every change goes out through a callback.

use covid_compare::dashboard::{ChartParam, ParamId, StatesMapping};
use leptos::*;

#[component]
pub fn Navbar(
    chart_params: &'static [ChartParam],
    #[prop(into)] current_param: Signal<ParamId>,
    /// `None` until the feed is delivered
    #[prop(into)]
    selected_states: Signal<Option<StatesMapping>>,
    #[prop(into)] on_param_change: Callback<String>,
    #[prop(into)] on_toggle_one: Callback<(String, bool)>,
    #[prop(into)] on_select_all: Callback<()>,
    #[prop(into)] on_deselect_all: Callback<()>,
) -> impl IntoView {
    let not_ready = move || selected_states.with(|s| s.is_none());

    view! {
        <aside class="bg-gray-800 rounded-xl p-4 space-y-4 md:w-64 shrink-0">
            <div>
                <label class="block text-sm text-gray-400 mb-1">"Parameter"</label>
                <select
                    class="w-full bg-gray-700 text-white rounded-lg px-3 py-2"
                    prop:value=move || current_param.get().as_str()
                    on:change=move |ev| on_param_change.call(event_target_value(&ev))
                >
                    {chart_params
                        .iter()
                        .map(|p| view! { <option value=p.id.as_str()>{p.label}</option> })
                        .collect_view()}
                </select>
            </div>

            <div class="flex space-x-2">
                <button
                    class="flex-1 px-3 py-1 rounded-lg text-sm bg-gray-700 hover:bg-gray-600 disabled:opacity-50"
                    disabled=not_ready
                    on:click=move |_| on_select_all.call(())
                >
                    "Select all"
                </button>
                <button
                    class="flex-1 px-3 py-1 rounded-lg text-sm bg-gray-700 hover:bg-gray-600 disabled:opacity-50"
                    disabled=not_ready
                    on:click=move |_| on_deselect_all.call(())
                >
                    "Deselect all"
                </button>
            </div>

            <div class="max-h-[60vh] overflow-y-auto space-y-1">
                {move || match selected_states.get() {
                    None => view! {
                        <p class="text-sm text-gray-500">"Waiting for state data..."</p>
                    }
                    .into_view(),
                    Some(states) => states
                        .iter()
                        .map(|record| {
                            let id = record.id.clone();
                            view! {
                                <label class="flex items-center space-x-2 text-sm text-gray-300 cursor-pointer">
                                    <input
                                        type="checkbox"
                                        prop:checked=record.selected
                                        on:change=move |ev| {
                                            on_toggle_one.call((id.clone(), event_target_checked(&ev)))
                                        }
                                    />
                                    <span>{record.name.clone()}</span>
                                </label>
                            }
                        })
                        .collect_view(),
                }}
            </div>
        </aside>
    }
}
