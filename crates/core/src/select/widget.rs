//! Filterable select state machine.
//!
//! The widget is headless: a renderer draws [`SelectView`] and feeds user
//! input back as [`SelectEvent`]s. Each event returns the side effects the
//! host must perform ([`SelectEffect`]), in place of callbacks.

use std::time::Duration;

use tesorero_shared::types::RecordId;

use super::accessor::OptionAccessor;

/// Default delay before the filter input grabs focus after opening.
pub const DEFAULT_FOCUS_DELAY: Duration = Duration::from_millis(50);

/// Open/closed state of the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectState {
    /// Only the trigger is shown.
    #[default]
    Closed,
    /// The dropdown with filter input and rows is shown.
    Open,
}

/// Where the widget is hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectVariant {
    /// Dropdown anchored to a form field.
    #[default]
    Popup,
    /// Inline in a table cell: offers a clear row and keeps clicks inside the
    /// widget from reaching the hosting row.
    TableCell,
}

/// User-visible texts. Defaults are es-PE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectLabels {
    /// Trigger text when nothing is selected.
    pub placeholder: String,
    /// Row shown when the filter matches nothing.
    pub no_results: String,
    /// Create-new row when the filter is empty.
    pub create_new: String,
    /// Create-new row with filter text; `{text}` is replaced.
    pub create_named: String,
    /// Clear-selection row of the table-cell variant.
    pub clear: String,
}

impl Default for SelectLabels {
    fn default() -> Self {
        Self {
            placeholder: "Seleccionar...".to_string(),
            no_results: "Sin resultados".to_string(),
            create_new: "+ Crear nuevo".to_string(),
            create_named: "+ Crear \"{text}\"".to_string(),
            clear: "Sin selección".to_string(),
        }
    }
}

/// Input fed back by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectEvent {
    /// The trigger button was clicked.
    TriggerClicked,
    /// The filter input changed.
    FilterChanged(String),
    /// An option row was clicked; carries the row's source index.
    OptionClicked(usize),
    /// The create-new row was clicked.
    CreateNewClicked,
    /// The clear row was clicked.
    ClearClicked,
    /// A pointer went down somewhere in the document.
    PointerDown {
        /// Whether the target is inside the widget's subtree.
        inside: bool,
    },
}

/// Side effects requested from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectEffect {
    /// The selection changed to this value (the option's value, not the record).
    Changed(RecordId),
    /// The user asked to create an option from this text.
    CreateNew(String),
    /// The selection was cleared.
    Cleared,
    /// Focus the filter input after this delay.
    FocusFilter {
        /// Delay before focusing.
        after: Duration,
    },
    /// Stop the pointer event from reaching the hosting row.
    StopPropagation,
}

/// A rendered dropdown row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Clears the selection (table-cell variant).
    Clear {
        /// Row text.
        label: String,
    },
    /// A visible option.
    Option {
        /// Index in the source option list.
        index: usize,
        /// Row text.
        label: String,
        /// Whether this option is the current value.
        selected: bool,
    },
    /// Creates a new option from the filter text.
    CreateNew {
        /// Row text.
        label: String,
    },
    /// Placeholder shown when nothing matches.
    Empty {
        /// Row text.
        label: String,
    },
}

/// Snapshot of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectView {
    /// Text on the trigger button.
    pub trigger_label: String,
    /// Open or closed.
    pub state: SelectState,
    /// Current filter text.
    pub filter: String,
    /// Whether the trigger is disabled.
    pub disabled: bool,
    /// Dropdown rows; empty while closed.
    pub rows: Vec<Row>,
}

/// Single-selection dropdown over caller-provided options.
#[derive(Debug)]
pub struct FilterableSelect<T> {
    options: Vec<T>,
    accessor: OptionAccessor<T>,
    value: Option<RecordId>,
    state: SelectState,
    filter: String,
    disabled: bool,
    creatable: bool,
    variant: SelectVariant,
    labels: SelectLabels,
    focus_delay: Duration,
}

impl<T> FilterableSelect<T> {
    /// Creates a closed popup select with no value.
    pub fn new(options: Vec<T>, accessor: OptionAccessor<T>) -> Self {
        Self {
            options,
            accessor,
            value: None,
            state: SelectState::Closed,
            filter: String::new(),
            disabled: false,
            creatable: false,
            variant: SelectVariant::Popup,
            labels: SelectLabels::default(),
            focus_delay: DEFAULT_FOCUS_DELAY,
        }
    }

    /// Uses the table-cell variant.
    #[must_use]
    pub fn in_table_cell(mut self) -> Self {
        self.variant = SelectVariant::TableCell;
        self
    }

    /// Enables the create-new row; the host handles [`SelectEffect::CreateNew`].
    #[must_use]
    pub fn creatable(mut self) -> Self {
        self.creatable = true;
        self
    }

    /// Replaces the texts.
    #[must_use]
    pub fn with_labels(mut self, labels: SelectLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the focus delay.
    #[must_use]
    pub fn with_focus_delay(mut self, delay: Duration) -> Self {
        self.focus_delay = delay;
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn with_value(mut self, value: Option<RecordId>) -> Self {
        self.value = value;
        self
    }

    /// Replaces the options (e.g. after a reload). The value is kept.
    pub fn set_options(&mut self, options: Vec<T>) {
        self.options = options;
    }

    /// Sets the value from outside (controlled usage).
    pub fn set_value(&mut self, value: Option<RecordId>) {
        self.value = value;
    }

    /// Enables or disables the trigger. Disabling closes the dropdown.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.state = SelectState::Closed;
        }
    }

    /// Source options.
    pub fn options(&self) -> &[T] {
        &self.options
    }

    /// Current value.
    pub fn value(&self) -> Option<&RecordId> {
        self.value.as_ref()
    }

    /// Open or closed.
    pub fn state(&self) -> SelectState {
        self.state
    }

    /// Current filter text.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Whether `option` is the current value, comparing loosely.
    pub fn is_selected(&self, option: &T) -> bool {
        self.value
            .as_ref()
            .is_some_and(|value| value.loosely_eq(&self.accessor.value(option)))
    }

    /// The option matching the current value, if loaded.
    pub fn selected_option(&self) -> Option<&T> {
        self.options.iter().find(|option| self.is_selected(option))
    }

    /// Indices of the options matching the filter, in source order.
    ///
    /// Matching is a case-insensitive substring test against the rendered
    /// label. Hidden options stay in the source list.
    pub fn visible_options(&self) -> Vec<usize> {
        let needle = self.filter.to_lowercase();
        self.options
            .iter()
            .enumerate()
            .filter(|(_, option)| {
                needle.is_empty() || self.accessor.label(option).to_lowercase().contains(&needle)
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Applies an event and returns the effects for the host.
    pub fn handle(&mut self, event: SelectEvent) -> Vec<SelectEffect> {
        match event {
            SelectEvent::TriggerClicked => self.toggle(),
            SelectEvent::FilterChanged(text) => {
                self.filter = text;
                Vec::new()
            }
            SelectEvent::OptionClicked(index) => self.select(index),
            SelectEvent::CreateNewClicked => self.create_new(),
            SelectEvent::ClearClicked => self.clear(),
            SelectEvent::PointerDown { inside } => self.pointer_down(inside),
        }
    }

    fn toggle(&mut self) -> Vec<SelectEffect> {
        match self.state {
            SelectState::Open => {
                self.state = SelectState::Closed;
                Vec::new()
            }
            SelectState::Closed if self.disabled => Vec::new(),
            SelectState::Closed => {
                self.state = SelectState::Open;
                vec![SelectEffect::FocusFilter {
                    after: self.focus_delay,
                }]
            }
        }
    }

    fn select(&mut self, index: usize) -> Vec<SelectEffect> {
        if self.state != SelectState::Open || !self.visible_options().contains(&index) {
            return Vec::new();
        }
        let value = self.accessor.value(&self.options[index]);
        self.value = Some(value.clone());
        self.filter.clear();
        self.state = SelectState::Closed;
        vec![SelectEffect::Changed(value)]
    }

    fn create_new(&mut self) -> Vec<SelectEffect> {
        if self.state != SelectState::Open || !self.creatable {
            return Vec::new();
        }
        let text = std::mem::take(&mut self.filter);
        self.state = SelectState::Closed;
        vec![SelectEffect::CreateNew(text)]
    }

    fn clear(&mut self) -> Vec<SelectEffect> {
        if self.state != SelectState::Open || self.variant != SelectVariant::TableCell {
            return Vec::new();
        }
        self.value = None;
        self.filter.clear();
        self.state = SelectState::Closed;
        vec![SelectEffect::Cleared]
    }

    fn pointer_down(&mut self, inside: bool) -> Vec<SelectEffect> {
        if inside {
            return match self.variant {
                SelectVariant::TableCell => vec![SelectEffect::StopPropagation],
                SelectVariant::Popup => Vec::new(),
            };
        }
        self.state = SelectState::Closed;
        Vec::new()
    }

    /// Text on the trigger: the selected option's label, else the placeholder.
    pub fn trigger_label(&self) -> String {
        self.selected_option().map_or_else(
            || self.labels.placeholder.clone(),
            |option| self.accessor.label(option),
        )
    }

    /// Renders the current state.
    pub fn view(&self) -> SelectView {
        SelectView {
            trigger_label: self.trigger_label(),
            state: self.state,
            filter: self.filter.clone(),
            disabled: self.disabled,
            rows: self.rows(),
        }
    }

    fn rows(&self) -> Vec<Row> {
        if self.state == SelectState::Closed {
            return Vec::new();
        }

        let mut rows = Vec::new();
        if self.variant == SelectVariant::TableCell {
            rows.push(Row::Clear {
                label: self.labels.clear.clone(),
            });
        }

        let visible = self.visible_options();
        let no_matches = visible.is_empty();
        rows.extend(visible.into_iter().map(|index| {
            let option = &self.options[index];
            Row::Option {
                index,
                label: self.accessor.label(option),
                selected: self.is_selected(option),
            }
        }));

        if self.creatable {
            let label = if self.filter.is_empty() {
                self.labels.create_new.clone()
            } else {
                self.labels.create_named.replace("{text}", &self.filter)
            };
            rows.push(Row::CreateNew { label });
        } else if no_matches {
            rows.push(Row::Empty {
                label: self.labels.no_results.clone(),
            });
        }

        rows
    }
}
