//! Data models for the studio TUI
//!
//! This module re-exports all data structures from the app module.

pub use crate::app::{
    fields_for, split_list, App, FieldKind, FieldSpec, GenerationTab, Notification,
    NotificationLevel, OpOutcome, TabState, View,
};
