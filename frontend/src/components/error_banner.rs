//! Error banner shown after a failed upload attempt.

use leptos::*;

use crate::ViewState;

#[component]
pub fn ErrorBanner(state: ReadSignal<ViewState>) -> impl IntoView {
    view! {
        <Show
            when=move || state.with(|s| s.error.is_some())
            fallback=|| view! { }
        >
            <div class="error-message" role="alert">
                {move || state.with(|s| s.error.clone().unwrap_or_default())}
            </div>
        </Show>
    }
}
