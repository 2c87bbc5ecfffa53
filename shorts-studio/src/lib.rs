// Application state and operations
pub mod app;

// Data model re-exports for the UI layer
pub mod models;

// UI rendering
pub mod ui;
