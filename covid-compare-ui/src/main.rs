//! covid-compare Dashboard
//!
//! Compare COVID-19 outbreak trajectories across U.S. states, aligned by day
//! of outbreak, built with Leptos (WASM).
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It fetches the states feed from the covid-compare API and
//! drives the shared `covid_compare::dashboard::Page` with the user's events.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
