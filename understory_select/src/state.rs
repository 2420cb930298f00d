// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The select state record and its reducer.
//!
//! [`reduce`] is the only way a [`SelectState`] changes. It is pure and
//! total: every action is valid in every state, and the result is always a
//! fresh value.

use alloc::string::String;
use alloc::vec::Vec;

use crate::option::{OptionValue, SelectOption};

/// Open/closed flag, selection, and search text of one select.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectState {
    /// Whether the options menu is open.
    pub is_open: bool,
    /// Selected options in insertion order.
    pub selected: Vec<SelectOption>,
    /// Current search text.
    pub search_value: String,
}

impl SelectState {
    /// A closed state with an empty search and the given selection.
    #[must_use]
    pub fn new(selected: Vec<SelectOption>) -> Self {
        Self {
            is_open: false,
            selected,
            search_value: String::new(),
        }
    }

    /// Returns `true` if some selected option has `value`.
    #[must_use]
    pub fn is_selected(&self, value: &OptionValue) -> bool {
        self.selected.iter().any(|option| &option.value == value)
    }
}

/// A requested state transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Open the menu.
    OpenMenu,
    /// Close the menu. The search text is kept.
    CloseMenu,
    /// Replace the search text.
    SetSearchValue(String),
    /// Empty the search text.
    ClearSearchValue,
    /// Replace the whole selection.
    SetSelected(Vec<SelectOption>),
    /// Append to the selection, without checking for duplicates.
    AddSelected(SelectOption),
    /// Remove every selected option with this value.
    RemoveSelected(OptionValue),
}

/// Applies `action` to `state`, producing the next state.
#[must_use]
pub fn reduce(state: &SelectState, action: Action) -> SelectState {
    match action {
        Action::OpenMenu => SelectState {
            is_open: true,
            ..state.clone()
        },
        Action::CloseMenu => SelectState {
            is_open: false,
            ..state.clone()
        },
        Action::SetSearchValue(search_value) => SelectState {
            search_value,
            ..state.clone()
        },
        Action::ClearSearchValue => SelectState {
            search_value: String::new(),
            ..state.clone()
        },
        Action::SetSelected(selected) => SelectState {
            selected,
            ..state.clone()
        },
        Action::AddSelected(option) => {
            let mut selected = Vec::with_capacity(state.selected.len() + 1);
            selected.extend_from_slice(&state.selected);
            selected.push(option);
            SelectState {
                selected,
                ..state.clone()
            }
        }
        Action::RemoveSelected(value) => SelectState {
            selected: state
                .selected
                .iter()
                .filter(|option| option.value != value)
                .cloned()
                .collect(),
            ..state.clone()
        },
    }
}
