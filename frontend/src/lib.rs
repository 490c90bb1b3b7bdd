//! Daylight - Frontend Rust/Leptos Application
//!
//! A WebAssembly page for uploading a CSV file and viewing it as a
//! normalized table.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  MainContent (one ViewState signal)                         │
//! │  ├── Hero (title)                                           │
//! │  ├── UploadSection (file picker)                            │
//! │  ├── ErrorBanner (when the last attempt failed)             │
//! │  └── DataTable (when rows are loaded)                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - View state, API types, errors
//! - [`components`] - UI components
//! - [`services`] - Backend communication

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::*;

pub use types::{
    // View
    ViewState,
    // API
    UploadResponse, ResponseMetadata,
    // Errors
    AppError, AppResult,
};

pub use components::*;

pub use services::*;

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_TITLE/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // Replaced as a whole on every upload attempt
    let (state, set_state) = create_signal(ViewState::default());

    view! {
        <div class="container">
            <Hero/>
            <UploadSection state=state set_state=set_state/>
            <ErrorBanner state=state/>
            <DataTable state=state/>
        </div>
    }
}
