//! Normalized table view.

use leptos::*;

use crate::{ViewState, PLACEHOLDER, UNAVAILABLE_TOOLTIP};

fn cell_view(value: Option<String>) -> View {
    match value {
        Some(text) => view! { <td>{text}</td> }.into_view(),
        None => view! {
            <td>
                <span class="placeholder" title=UNAVAILABLE_TOOLTIP>
                    {PLACEHOLDER}
                    <span class="tooltip">{UNAVAILABLE_TOOLTIP}</span>
                </span>
            </td>
        }
        .into_view(),
    }
}

/// Renders nothing until the state holds at least one row.
#[component]
pub fn DataTable(state: ReadSignal<ViewState>) -> impl IntoView {
    let headers = move || {
        state.with(|s| {
            s.headers
                .iter()
                .map(|h| view! { <th>{h.clone()}</th> })
                .collect_view()
        })
    };

    let rows = move || {
        state.with(|s| {
            (0..s.rows.len())
                .map(|r| {
                    let cells = (0..s.headers.len())
                        .map(|c| cell_view(s.cell(r, c).map(str::to_string)))
                        .collect_view();
                    view! { <tr>{cells}</tr> }
                })
                .collect_view()
        })
    };

    view! {
        <Show
            when=move || state.with(ViewState::has_data)
            fallback=|| view! { }
        >
            <div class="table-wrapper">
                <table class="data-table">
                    <thead>
                        <tr>{headers}</tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
            </div>
        </Show>
    }
}
