//! Compare Page
//!
//! Hosts the dashboard [`Page`] in a signal: feed changes and user events go
//! in as page transitions, and the Navbar and Chart read derived props back
//! out.

use covid_compare::dashboard::{
    ChartProps, LayoutConfig, Page, PageEvent, StatesMapping, Viewport,
};
use leptos::*;

use crate::api;
use crate::components::{About, Chart, ChartSkeleton, Navbar};
use crate::state::{GlobalState, SignalSource};

/// Fallback when the window size cannot be read
const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};

fn current_viewport() -> Viewport {
    let window = window();
    let width = window.inner_width().ok().and_then(|v| v.as_f64());
    let height = window.inner_height().ok().and_then(|v| v.as_f64());
    match (width, height) {
        (Some(width), Some(height)) => Viewport::new(width, height),
        _ => DEFAULT_VIEWPORT,
    }
}

/// Fetch the states feed and deliver it
pub async fn refresh_feed(state: GlobalState) {
    let _request = state.begin_request();
    match api::fetch_states().await {
        Ok(mapping) => state.deliver(mapping),
        Err(e) => state.show_error(&format!("Failed to fetch states: {}", e)),
    }
}

#[component]
pub fn Compare() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let page = create_rw_signal(Page::new(
        SignalSource::new(state.feed),
        LayoutConfig::default(),
        current_viewport(),
    ));

    // Every new feed value is a page transition
    create_effect(move |_| {
        state.feed.with(|_| ());
        page.update(|p| {
            p.sync();
        });
    });

    if state.feed.with_untracked(|feed| feed.is_none()) {
        spawn_local(refresh_feed(state));
    }

    // Layout follows the viewport for as long as the page is mounted
    let resize = window_event_listener(ev::resize, move |_| {
        page.update(|p| p.resize(current_viewport()));
    });
    on_cleanup(move || resize.remove());

    let dispatch = move |event: PageEvent| {
        if let Some(Err(e)) = page.try_update(|p| p.dispatch(event)) {
            state.show_error(&e.to_string());
        }
    };

    let current_param = Signal::derive(move || page.with(|p| p.params().current_id()));
    let selected_states: Signal<Option<StatesMapping>> =
        Signal::derive(move || page.with(|p| p.navbar_props().selected_states.cloned()));
    let is_ready = move || page.with(|p| p.is_ready());

    // An unseeded page still draws an empty chart frame
    let chart_props = create_memo(move |_| {
        page.with(|p| {
            p.chart_props().unwrap_or_else(|| {
                ChartProps::new(p.params().current(), StatesMapping::new(), *p.envelope())
            })
        })
    });

    let chart_params = page.with_untracked(|p| p.params().list());

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"COVID-19: Compare States"</h1>
                <p class="text-gray-400 mt-1">
                    "Outbreak trajectories aligned by day of outbreak"
                </p>
            </div>

            <div class="flex flex-col md:flex-row gap-6">
                <Navbar
                    chart_params=chart_params
                    current_param=current_param
                    selected_states=selected_states
                    on_param_change=move |id: String| dispatch(PageEvent::ParamChanged(id))
                    on_toggle_one=move |(state_id, checked): (String, bool)| {
                        dispatch(PageEvent::ToggleOne { state_id, checked })
                    }
                    on_select_all=move |_: ()| dispatch(PageEvent::SelectAll)
                    on_deselect_all=move |_: ()| dispatch(PageEvent::DeselectAll)
                />

                <section class="flex-1 bg-gray-800 rounded-xl p-4 overflow-x-auto">
                    <Show when=is_ready fallback=|| view! { <ChartSkeleton /> }>
                        <Chart props=chart_props />
                    </Show>
                </section>
            </div>

            <About />
        </div>
    }
}
