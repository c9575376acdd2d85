//! About panel

use covid_compare::dashboard::{ABOUT_SECTIONS, ABOUT_TITLE};
use leptos::*;

#[component]
pub fn About() -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-4 text-sm text-gray-300">
            <h2 class="text-xl font-semibold text-white">{ABOUT_TITLE}</h2>
            {ABOUT_SECTIONS
                .iter()
                .map(|section| view! {
                    <div class="space-y-1">
                        <h3 class="font-semibold text-gray-200">{section.title}</h3>
                        {section
                            .entries
                            .iter()
                            .map(|entry| view! {
                                <p>
                                    {entry.term.map(|term| view! { <b>{term}</b> " - " })}
                                    {entry.text}
                                </p>
                            })
                            .collect_view()}
                    </div>
                })
                .collect_view()}
        </section>
    }
}
