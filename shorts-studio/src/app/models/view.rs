//! Application view routing

/// Application view/route
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    ProjectList,
    ProjectDetail(usize), // index into App.projects
    VariantPicker,
    CreateForm(shorts_client::WorkflowVariant),
    Tabs, // running generations
}
