//! Option accessors.
//!
//! The caller decides which field of an option record is shown and which is
//! the value, by passing selector functions instead of field names.

use std::fmt;

use tesorero_shared::types::RecordId;

type Selector<T, R> = Box<dyn Fn(&T) -> R + Send + Sync>;

/// Display/value selectors for options of type `T`.
pub struct OptionAccessor<T> {
    display: Selector<T, String>,
    value: Selector<T, RecordId>,
    render: Option<Selector<T, String>>,
}

impl<T> OptionAccessor<T> {
    /// Creates an accessor from a display selector and a value selector.
    pub fn new<D, V>(display: D, value: V) -> Self
    where
        D: Fn(&T) -> String + Send + Sync + 'static,
        V: Fn(&T) -> RecordId + Send + Sync + 'static,
    {
        Self {
            display: Box::new(display),
            value: Box::new(value),
            render: None,
        }
    }

    /// Overrides the display selector with a formatter.
    ///
    /// The rendered text is also what the filter matches against.
    #[must_use]
    pub fn with_render<R>(mut self, render: R) -> Self
    where
        R: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.render = Some(Box::new(render));
        self
    }

    /// Text shown for an option.
    pub fn label(&self, option: &T) -> String {
        match &self.render {
            Some(render) => render(option),
            None => (self.display)(option),
        }
    }

    /// Resolved value of an option.
    pub fn value(&self, option: &T) -> RecordId {
        (self.value)(option)
    }
}

impl<T: ScalarOption + 'static> OptionAccessor<T> {
    /// Accessor for plain scalar options: the scalar is both label and value.
    #[must_use]
    pub fn scalar() -> Self {
        Self::new(<T as ScalarOption>::label, <T as ScalarOption>::record_id)
    }
}

impl<T> fmt::Debug for OptionAccessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionAccessor")
            .field("render", &self.render.is_some())
            .finish_non_exhaustive()
    }
}

/// Options that are plain scalars rather than records.
pub trait ScalarOption {
    /// Text shown for the scalar.
    fn label(&self) -> String;

    /// Value of the scalar.
    fn record_id(&self) -> RecordId;
}

impl ScalarOption for String {
    fn label(&self) -> String {
        self.clone()
    }

    fn record_id(&self) -> RecordId {
        RecordId::Text(self.clone())
    }
}

impl ScalarOption for &'static str {
    fn label(&self) -> String {
        (*self).to_string()
    }

    fn record_id(&self) -> RecordId {
        RecordId::from(*self)
    }
}

impl ScalarOption for i64 {
    fn label(&self) -> String {
        self.to_string()
    }

    fn record_id(&self) -> RecordId {
        RecordId::Number(*self)
    }
}

impl ScalarOption for RecordId {
    fn label(&self) -> String {
        self.to_string()
    }

    fn record_id(&self) -> RecordId {
        self.clone()
    }
}
