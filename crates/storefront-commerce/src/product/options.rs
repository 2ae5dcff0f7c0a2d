//! Variant option toggle groups.

/// A single-select group of variant choices (e.g. color swatches).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionGroup {
    name: String,
    choices: Vec<String>,
    selected: Option<usize>,
}

impl OptionGroup {
    pub fn new(name: impl Into<String>, choices: Vec<String>) -> Self {
        Self {
            name: name.into(),
            choices,
            selected: None,
        }
    }

    /// Start with `index` selected, if it exists.
    pub fn with_selected(mut self, index: usize) -> Self {
        self.select(index);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Select `index`, deselecting its siblings. Out-of-range indices are
    /// ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.choices.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    /// Value of the selected choice.
    pub fn selected_value(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.choices.get(i))
            .map(String::as_str)
    }
}
