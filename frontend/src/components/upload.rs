//! CSV file picker.
//!
//! Checks the file name, uploads the file to the backend and replaces
//! the view state with the outcome.

use leptos::*;
use web_sys::{Event, HtmlInputElement};

use crate::services::upload_csv;
use crate::{ViewState, BACKEND_URL};

#[component]
pub fn UploadSection(
    state: ReadSignal<ViewState>,
    set_state: WriteSignal<ViewState>,
) -> impl IntoView {
    let (is_uploading, set_is_uploading) = create_signal(false);

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let file = input.files().and_then(|files| files.get(0));
        // Allow picking the same file again
        input.set_value("");

        let picked = file.as_ref().map(|f| (f.name(), f.size()));
        let (next, upload) = state
            .get_untracked()
            .picked(picked.as_ref().map(|(name, size)| (name.as_str(), *size)));
        if let (Some((name, _)), Some(error)) = (&picked, &next.error) {
            log::warn!("Rejected {}: {}", name, error);
        }
        set_state.set(next);

        let Some(file) = file.filter(|_| upload) else {
            return;
        };

        spawn_local(async move {
            set_is_uploading.set(true);
            log::info!("Uploading {}", file.name());

            let next = match upload_csv(file, BACKEND_URL).await {
                Ok(response) => {
                    log::info!(
                        "Loaded {} records, {} columns",
                        response.metadata.record_count,
                        response.headers.len()
                    );
                    ViewState::from(response)
                }
                Err(e) => {
                    log::error!("Upload failed: {}", e);
                    state.get_untracked().failed(e.to_string())
                }
            };

            set_state.set(next);
            set_is_uploading.set(false);
        });
    };

    view! {
        <div class="upload-section">
            <label class="upload-title" for="csv-upload">"Upload CSV"</label>
            <input
                type="file"
                id="csv-upload"
                accept=".csv"
                style="display:none"
                on:change=on_file_change
            />
            <label for="csv-upload" class="upload-button" class:disabled=move || is_uploading.get()>
                <span class="upload-icon">"⬆"</span>
                <span>
                    {move || if is_uploading.get() { "Processing..." } else { "Choose CSV File" }}
                </span>
            </label>
        </div>
    }
}
