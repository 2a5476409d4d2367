use crate::wizard::Notice;

/// One selectable (or, on review, informational) row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub label: String,
    /// `None` for rows that cannot be toggled.
    pub checked: Option<bool>,
    pub detail: Option<String>,
}

impl ItemView {
    pub fn toggle(label: impl Into<String>, checked: bool) -> Self {
        Self {
            label: label.into(),
            checked: Some(checked),
            detail: None,
        }
    }

    pub fn info(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: None,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn render(&self) -> String {
        let marker = match self.checked {
            Some(true) => "[x] ",
            Some(false) => "[ ] ",
            None => "",
        };
        match &self.detail {
            Some(detail) => format!("{marker}{} {detail}", self.label),
            None => format!("{marker}{}", self.label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneView {
    pub title: String,
    pub items: Vec<ItemView>,
    pub cursor: usize,
    pub focused: bool,
    /// Shown when `items` is empty.
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardViewModel {
    pub title: String,
    pub step_line: String,
    pub tabs: Vec<String>,
    pub active_tab: Option<usize>,
    pub chips: Vec<String>,
    pub panes: Vec<PaneView>,
    pub search: Option<String>,
    pub dialog: Option<String>,
    pub status: Option<Notice>,
    pub hint: String,
}
