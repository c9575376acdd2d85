//! Feed notices
//!
//! Corner cards reporting what happened to the states feed: delivered,
//! reloaded with skipped rows, or failed.

use leptos::*;

use crate::state::GlobalState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notice {
    Updated,
    RowsSkipped,
    Failed,
}

impl Notice {
    fn heading(self) -> &'static str {
        match self {
            Notice::Updated => "Feed updated",
            Notice::RowsSkipped => "Reload incomplete",
            Notice::Failed => "Feed unavailable",
        }
    }

    fn accent(self) -> &'static str {
        match self {
            Notice::Updated => "border-green-500",
            Notice::RowsSkipped => "border-amber-400",
            Notice::Failed => "border-red-500",
        }
    }

    /// Stacking order; failures sit closest to the corner
    fn rank(self) -> u8 {
        match self {
            Notice::Failed => 0,
            Notice::RowsSkipped => 1,
            Notice::Updated => 2,
        }
    }
}

#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let notices = move || {
        let mut shown: Vec<(Notice, String)> = [
            (Notice::Updated, state.success.get()),
            (Notice::RowsSkipped, state.warning.get()),
            (Notice::Failed, state.error.get()),
        ]
        .into_iter()
        .filter_map(|(notice, text)| text.map(|text| (notice, text)))
        .collect();
        shown.sort_by_key(|(notice, _)| std::cmp::Reverse(notice.rank()));
        shown
    };

    view! {
        <div class="fixed bottom-20 right-4 z-50 flex flex-col gap-2 w-80">
            {move || {
                notices()
                    .into_iter()
                    .map(|(notice, text)| view! { <NoticeCard notice=notice text=text /> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn NoticeCard(notice: Notice, text: String) -> impl IntoView {
    view! {
        <div class=format!(
            "bg-gray-800 border-l-4 {} rounded shadow-lg px-4 py-2",
            notice.accent()
        )>
            <p class="text-xs uppercase tracking-wide text-gray-400">{notice.heading()}</p>
            <p class="text-sm text-white break-words">{text}</p>
        </div>
    }
}
