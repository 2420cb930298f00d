// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Select configuration and the externally visible value type.

use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::option::{Options, SelectOption};

/// A select's value as seen from outside: what `on_change` reports and what a
/// controlling caller feeds back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectValue {
    /// Nothing selected.
    #[default]
    Null,
    /// A single option (single-select mode).
    One(SelectOption),
    /// All selected options (multiple mode).
    Many(Vec<SelectOption>),
}

impl SelectValue {
    /// Returns `true` for [`SelectValue::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The value as a selection list.
    #[must_use]
    pub fn to_selected(&self) -> Vec<SelectOption> {
        match self {
            Self::Null => Vec::new(),
            Self::One(option) => vec![option.clone()],
            Self::Many(options) => options.clone(),
        }
    }

    /// The value reported for `selected`: the whole list in multiple mode,
    /// otherwise its first entry.
    #[must_use]
    pub fn from_selected(selected: &[SelectOption], multiple: bool) -> Self {
        if multiple {
            Self::Many(selected.to_vec())
        } else {
            selected.first().cloned().map_or(Self::Null, Self::One)
        }
    }
}

impl From<SelectOption> for SelectValue {
    fn from(option: SelectOption) -> Self {
        Self::One(option)
    }
}

impl From<Vec<SelectOption>> for SelectValue {
    fn from(options: Vec<SelectOption>) -> Self {
        Self::Many(options)
    }
}

/// Callback notified with the new value whenever the selection changes.
pub type ChangeCallback = Rc<dyn Fn(&SelectValue)>;

/// Configuration of a [`Select`](crate::Select).
///
/// A select is *controlled* when it has both an `on_change` callback and a
/// defined `value` (`Some`, including `Some(SelectValue::Null)`). Clicks then
/// only report through `on_change` and the caller is expected to feed the new
/// value back with [`Select::set_value`](crate::Select::set_value).
/// Otherwise it is *uncontrolled*: clicks update the internal selection,
/// and `on_change` (if any) hears about every actual change.
///
/// # Example
///
/// ```rust
/// use understory_select::{Options, SelectConfig, SelectOption};
///
/// let config = SelectConfig::new()
///     .multiple(true)
///     .searchable(true)
///     .options(Options::Flat(vec![
///         SelectOption::new("Vienna", 1),
///         SelectOption::new("Havana", 4),
///     ]))
///     .on_change(|value| println!("{value:?}"));
/// assert!(config.is_multiple());
/// ```
#[derive(Clone, Default)]
pub struct SelectConfig {
    pub(crate) multiple: bool,
    pub(crate) once_click_option: bool,
    pub(crate) searchable: bool,
    pub(crate) disabled: bool,
    pub(crate) value: Option<SelectValue>,
    pub(crate) options: Options,
    pub(crate) on_change: Option<ChangeCallback>,
}

impl SelectConfig {
    /// All flags off, no value, no options, no callback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allows more than one selected option.
    #[must_use]
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// In multiple mode, closes the menu after every option click.
    #[must_use]
    pub fn once_click_option(mut self, once_click_option: bool) -> Self {
        self.once_click_option = once_click_option;
        self
    }

    /// Focuses the search input whenever the menu opens.
    #[must_use]
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Keeps the menu closed.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Sets the external value; `None` leaves the select uncontrolled.
    #[must_use]
    pub fn value(mut self, value: Option<SelectValue>) -> Self {
        self.value = value;
        self
    }

    /// Sets the option source.
    #[must_use]
    pub fn options(mut self, options: impl Into<Options>) -> Self {
        self.options = options.into();
        self
    }

    /// Sets the change callback.
    #[must_use]
    pub fn on_change(mut self, on_change: impl Fn(&SelectValue) + 'static) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    /// Whether multiple mode is on.
    #[must_use]
    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Whether option clicks close the menu in multiple mode.
    #[must_use]
    pub fn is_once_click_option(&self) -> bool {
        self.once_click_option
    }

    /// Whether the search input is focused on open.
    #[must_use]
    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    /// Whether the menu is kept closed.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The external value.
    #[must_use]
    pub fn current_value(&self) -> Option<&SelectValue> {
        self.value.as_ref()
    }

    /// The option source.
    #[must_use]
    pub fn current_options(&self) -> &Options {
        &self.options
    }

    /// Returns `true` when clicks report through `on_change` only.
    #[must_use]
    pub fn is_controlled(&self) -> bool {
        self.on_change.is_some() && self.value.is_some()
    }

    /// The value as the initial selection; nullish values select nothing.
    pub(crate) fn initial_selected(&self) -> Vec<SelectOption> {
        self.value
            .as_ref()
            .map(SelectValue::to_selected)
            .unwrap_or_default()
    }
}

// Manual Debug impl since callbacks aren't Debug
impl fmt::Debug for SelectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectConfig")
            .field("multiple", &self.multiple)
            .field("once_click_option", &self.once_click_option)
            .field("searchable", &self.searchable)
            .field("disabled", &self.disabled)
            .field("value", &self.value)
            .field("options", &self.options)
            .field("has_on_change", &self.on_change.is_some())
            .finish()
    }
}
