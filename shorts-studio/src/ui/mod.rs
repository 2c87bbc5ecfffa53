//! UI rendering functions for the studio TUI
//!
//! This module contains all the rendering logic for different views and
//! components: the project list, creation forms, the detail view, generation
//! monitor tabs and the shared overlays.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::models::{App, View};

// Module declarations
mod components;
mod header_footer;
mod notifications;
mod project_views;
mod tab_views;

// Re-export public functions
pub use components::{centered_rect, render_confirmation, render_file_browser};
pub use header_footer::{render_footer, render_header};
pub use notifications::render_notifications;
pub use project_views::{
    render_create_form, render_project_detail, render_project_list, render_variant_picker,
};
pub use tab_views::{render_empty_tabs, render_tab_bar, render_tab_content};

/// Main UI rendering function - orchestrates all view rendering
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    // Header
    render_header(f, chunks[0], app);

    // Main content
    match &app.current_view {
        View::ProjectList => render_project_list(f, chunks[1], app),
        View::ProjectDetail(_) => render_project_detail(f, chunks[1], app),
        View::VariantPicker => render_variant_picker(f, chunks[1], app),
        View::CreateForm(variant) => render_create_form(f, chunks[1], app, *variant),
        View::Tabs => {
            // Split screen: tab bar + content
            let tab_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Tab bar
                    Constraint::Min(0),    // Content
                ])
                .split(chunks[1]);

            render_tab_bar(f, tab_chunks[0], app);
            if app.open_tabs.is_empty() {
                render_empty_tabs(f, tab_chunks[1]);
            } else if let Some(tab) = app.open_tabs.get(app.active_tab_idx) {
                render_tab_content(f, tab_chunks[1], app, tab);
            }
        }
    }

    // Footer
    render_footer(f, chunks[2], app);

    // Notification overlay
    render_notifications(f, app, f.area());

    // File browser overlay
    if app.show_file_browser {
        render_file_browser(f, f.area(), app);
    }

    // Confirmation overlays
    if app.show_delete_confirmation {
        render_confirmation(
            f,
            f.area(),
            "Delete project",
            "Delete this project and all generated media? This cannot be undone.",
        );
    }
    if app.show_close_confirmation {
        render_confirmation(
            f,
            f.area(),
            "Close tab",
            "Generation is still running. Close the tab and stop watching it?",
        );
    }
}
