// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Option model: flat and grouped option collections plus the pure helpers
//! that normalize, flatten, filter, and project them.
//!
//! Whether a collection is flat or grouped is carried explicitly by
//! [`Options`]. [`Options::from_entries`] accepts a loose list of
//! [`OptionEntry`] values and decides the mode from the first entry alone.

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

/// The identity of an option.
///
/// Selection membership, de-duplication, and removal all compare options by
/// their value alone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum OptionValue {
    /// No value.
    #[default]
    Null,
    /// An integer value.
    Int(i64),
    /// A string value.
    Text(String),
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<SelectOption> for OptionValue {
    fn from(option: SelectOption) -> Self {
        option.value
    }
}

impl From<&SelectOption> for OptionValue {
    fn from(option: &SelectOption) -> Self {
        option.value.clone()
    }
}

/// The displayed label of an option or group.
///
/// Filtering matches against the [`Display`](fmt::Display) form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    /// A numeric label.
    Int(i64),
    /// A text label.
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Label {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A single selectable option.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectOption {
    /// Displayed label.
    pub label: Label,
    /// Identity used for selection.
    pub value: OptionValue,
    /// Disabled options ignore clicks.
    pub is_disabled: bool,
}

impl SelectOption {
    /// Creates an enabled option.
    #[must_use]
    pub fn new(label: impl Into<Label>, value: impl Into<OptionValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            is_disabled: false,
        }
    }

    /// Sets the disabled flag.
    #[must_use]
    pub fn disabled(mut self, is_disabled: bool) -> Self {
        self.is_disabled = is_disabled;
        self
    }

    /// The label and value only, as recorded in a selection when the option
    /// is clicked.
    #[must_use]
    pub fn payload(&self) -> Self {
        Self::new(self.label.clone(), self.value.clone())
    }
}

/// A labelled group of options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectGroup {
    /// Optional group heading.
    pub label: Option<Label>,
    /// Options in display order.
    pub options: Vec<SelectOption>,
}

impl SelectGroup {
    /// Creates a labelled group.
    #[must_use]
    pub fn new(label: impl Into<Label>, options: Vec<SelectOption>) -> Self {
        Self {
            label: Some(label.into()),
            options,
        }
    }

    /// Creates a group without a heading.
    #[must_use]
    pub fn anonymous(options: Vec<SelectOption>) -> Self {
        Self {
            label: None,
            options,
        }
    }
}

/// One entry of a loosely typed option list, see [`Options::from_entries`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionEntry {
    /// A plain option.
    Option(SelectOption),
    /// A group of options.
    Group(SelectGroup),
}

/// The option source of a select: either flat or grouped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Options {
    /// A flat list of options.
    Flat(Vec<SelectOption>),
    /// A list of groups.
    Grouped(Vec<SelectGroup>),
}

impl Default for Options {
    fn default() -> Self {
        Self::Flat(Vec::new())
    }
}

impl From<Vec<SelectOption>> for Options {
    fn from(options: Vec<SelectOption>) -> Self {
        Self::Flat(options)
    }
}

impl From<Vec<SelectGroup>> for Options {
    fn from(groups: Vec<SelectGroup>) -> Self {
        Self::Grouped(groups)
    }
}

impl Options {
    /// Builds options from a loose entry list.
    ///
    /// The list is grouped iff its first entry is a group. Mixing is not
    /// supported: entries that disagree with the first one are skipped.
    #[must_use]
    pub fn from_entries(entries: Vec<OptionEntry>) -> Self {
        match entries.first() {
            Some(OptionEntry::Group(_)) => Self::Grouped(
                entries
                    .into_iter()
                    .filter_map(|entry| match entry {
                        OptionEntry::Group(group) => Some(group),
                        OptionEntry::Option(_) => None,
                    })
                    .collect(),
            ),
            _ => Self::Flat(
                entries
                    .into_iter()
                    .filter_map(|entry| match entry {
                        OptionEntry::Option(option) => Some(option),
                        OptionEntry::Group(_) => None,
                    })
                    .collect(),
            ),
        }
    }

    /// Returns `true` for grouped options.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        matches!(self, Self::Grouped(_))
    }

    /// Returns `true` when there are no top-level entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flat(options) => options.is_empty(),
            Self::Grouped(groups) => groups.is_empty(),
        }
    }
}

/// Concatenates all group options in group order; flat options are returned as-is.
#[must_use]
pub fn flatten(options: &Options) -> Vec<SelectOption> {
    match options {
        Options::Flat(options) => options.clone(),
        Options::Grouped(groups) => groups
            .iter()
            .flat_map(|group| group.options.iter().cloned())
            .collect(),
    }
}

/// Normalizes to groups: flat options become a single anonymous group.
#[must_use]
pub fn to_groups(options: &Options) -> Vec<SelectGroup> {
    match options {
        Options::Flat(options) => vec![SelectGroup::anonymous(options.clone())],
        Options::Grouped(groups) => groups.clone(),
    }
}

/// Keeps the options whose label contains `query`, ignoring case.
#[must_use]
pub fn filter_options(options: &[SelectOption], query: &str) -> Vec<SelectOption> {
    let query = query.to_lowercase();
    options
        .iter()
        .filter(|option| option.label.to_string().to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Filters every group and drops the groups left empty.
#[must_use]
pub fn filter_groups(groups: &[SelectGroup], query: &str) -> Vec<SelectGroup> {
    groups
        .iter()
        .filter_map(|group| {
            let options = filter_options(&group.options, query);
            (!options.is_empty()).then(|| SelectGroup {
                label: group.label.clone(),
                options,
            })
        })
        .collect()
}

/// The groups to display for a search query.
///
/// An empty query shows everything. Otherwise flat options are wrapped in
/// an anonymous group first and then filtered like any group, so no group
/// without matches is ever returned.
#[must_use]
pub fn visible_groups(options: &Options, query: &str) -> Vec<SelectGroup> {
    if options.is_empty() {
        return Vec::new();
    }
    if query.is_empty() {
        return to_groups(options);
    }
    match options {
        Options::Grouped(groups) => filter_groups(groups, query),
        Options::Flat(options) => {
            let filtered = filter_options(options, query);
            if filtered.is_empty() {
                Vec::new()
            } else {
                vec![SelectGroup::anonymous(filtered)]
            }
        }
    }
}

/// Projects options to their values.
///
/// Pass a slice for a list or `[&option]` for a single option.
#[must_use]
pub fn values_of<'a>(options: impl IntoIterator<Item = &'a SelectOption>) -> Vec<OptionValue> {
    options
        .into_iter()
        .map(|option| option.value.clone())
        .collect()
}

/// Projects options to their labels.
#[must_use]
pub fn labels_of<'a>(options: impl IntoIterator<Item = &'a SelectOption>) -> Vec<Label> {
    options
        .into_iter()
        .map(|option| option.label.clone())
        .collect()
}
