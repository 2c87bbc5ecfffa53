//! Navigation and form editing methods

use super::models::fields_for;
use super::*;

impl App {
    pub fn next(&mut self) {
        match self.current_view {
            View::ProjectList => {
                if self.selected < self.projects.len().saturating_sub(1) {
                    self.selected += 1;
                }
            }
            View::VariantPicker => {
                let count = shorts_client::WorkflowVariant::all().len();
                if self.selected < count.saturating_sub(1) {
                    self.selected += 1;
                }
            }
            View::CreateForm(variant) => {
                let fields = fields_for(variant);
                if self.edit_field_index < fields.len().saturating_sub(1) {
                    self.edit_field_index += 1;
                }
            }
            _ => {}
        }
    }

    pub fn previous(&mut self) {
        match self.current_view {
            View::ProjectList | View::VariantPicker => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            View::CreateForm(_) => {
                if self.edit_field_index > 0 {
                    self.edit_field_index -= 1;
                }
            }
            _ => {}
        }
    }

    /// Open the variant picker for a new generation.
    pub fn start_new_project(&mut self) {
        self.selected = 0;
        self.current_view = View::VariantPicker;
    }

    /// Variant chosen; open its creation form with defaults filled in.
    pub fn open_create_form(&mut self) {
        let variants = shorts_client::WorkflowVariant::all();
        let Some(variant) = variants.get(self.selected).copied() else {
            return;
        };
        self.current_view = View::CreateForm(variant);
        self.edit_field_index = 0;
        self.is_editing = false;
        self.field_values.clear();

        for field in fields_for(variant) {
            if let Some(default) = field.default {
                self.field_values
                    .insert(field.name.to_string(), default.to_string());
            }
        }
    }

    pub fn back_to_list(&mut self) {
        self.current_view = View::ProjectList;
        self.selected = self.selected.min(self.projects.len().saturating_sub(1));
        self.field_values.clear();
        self.is_editing = false;
        self.edit_buffer.clear();
    }

    // --- Field editing ---------------------------------------------------

    pub fn start_editing_field(&mut self) {
        let View::CreateForm(variant) = self.current_view else {
            return;
        };
        let Some(field) = fields_for(variant).get(self.edit_field_index) else {
            return;
        };

        // Flags toggle in place instead of opening the editor
        if field.kind == FieldKind::Flag {
            let current = self
                .field_values
                .get(field.name)
                .map(String::as_str)
                .unwrap_or("false");
            let toggled = if current == "true" { "false" } else { "true" };
            self.field_values
                .insert(field.name.to_string(), toggled.to_string());
            return;
        }

        self.edit_buffer = self
            .field_values
            .get(field.name)
            .cloned()
            .unwrap_or_default();
        self.is_editing = true;
    }

    pub fn save_edited_field(&mut self) {
        if let View::CreateForm(variant) = self.current_view {
            if let Some(field) = fields_for(variant).get(self.edit_field_index) {
                self.field_values
                    .insert(field.name.to_string(), self.edit_buffer.clone());
            }
        }
        self.is_editing = false;
        self.edit_buffer.clear();
    }

    pub fn cancel_editing(&mut self) {
        self.is_editing = false;
        self.edit_buffer.clear();
    }

    /// The field currently under the cursor in the create form.
    pub fn current_field(&self) -> Option<&'static FieldSpec> {
        let View::CreateForm(variant) = self.current_view else {
            return None;
        };
        fields_for(variant).get(self.edit_field_index)
    }
}
