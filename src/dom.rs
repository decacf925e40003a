//! In-memory page model.
//!
//! The client never touches a real DOM. Views write HTML fragments into named
//! [`Container`]s and flip their visibility; interactive controls whose state
//! handlers read back (dependent selects, submit buttons, filter inputs) are
//! tracked as [`Control`]s. An embedding renders the document however it
//! likes; tests inspect it directly.

use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    pub html: String,
    pub visible: bool,
}

// ---------------------------------------------------------------------------
// Control
// ---------------------------------------------------------------------------

/// One `<option>` of a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Form control state: inputs, selects and buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Control {
    pub value: String,
    pub disabled: bool,
    /// Button caption, or the placeholder option of a select.
    pub label: String,
    pub options: Vec<SelectOption>,
}

impl Control {
    /// Replace the options of a select, keeping the placeholder first.
    pub fn set_options(&mut self, placeholder: &str, options: Vec<SelectOption>) {
        self.label = placeholder.to_string();
        self.options = options;
        if !self.options.iter().any(|o| o.value == self.value) {
            self.value.clear();
        }
    }

    pub fn option_values(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.value.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Document {
    containers: BTreeMap<String, Container>,
    controls: BTreeMap<String, Control>,
    pub title: String,
    pub back_visible: bool,
    /// Id of the highlighted sidebar item.
    pub active_nav: Option<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Containers ---------------------------------------------------------

    pub fn container(&self, id: &str) -> Option<&Container> {
        self.containers.get(id)
    }

    /// The container `id`, created hidden and empty on first use.
    pub fn container_mut(&mut self, id: &str) -> &mut Container {
        self.containers.entry(id.to_string()).or_default()
    }

    pub fn set_html(&mut self, id: &str, html: impl Into<String>) {
        self.container_mut(id).html = html.into();
    }

    pub fn html(&self, id: &str) -> &str {
        self.containers.get(id).map(|c| c.html.as_str()).unwrap_or("")
    }

    pub fn show(&mut self, id: &str) {
        self.container_mut(id).visible = true;
    }

    pub fn hide(&mut self, id: &str) {
        self.container_mut(id).visible = false;
    }

    pub fn set_visible(&mut self, id: &str, visible: bool) {
        self.container_mut(id).visible = visible;
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.containers.get(id).is_some_and(|c| c.visible)
    }

    // -- Controls -----------------------------------------------------------

    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls.get(id)
    }

    /// The control `id`, created empty on first use.
    pub fn control_mut(&mut self, id: &str) -> &mut Control {
        self.controls.entry(id.to_string()).or_default()
    }

    pub fn value(&self, id: &str) -> &str {
        self.controls.get(id).map(|c| c.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) {
        self.control_mut(id).value = value.into();
    }

    /// Put a button into its busy state and return the caption to restore.
    pub fn begin_busy(&mut self, id: &str, busy_label: &str) -> String {
        let control = self.control_mut(id);
        control.disabled = true;
        std::mem::replace(&mut control.label, busy_label.to_string())
    }

    pub fn end_busy(&mut self, id: &str, label: String) {
        let control = self.control_mut(id);
        control.disabled = false;
        control.label = label;
    }
}
