// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_select --heading-base-level=0

//! Understory Select: headless state for select and combobox controls.
//!
//! This crate owns the _behavior_ of a dropdown: which options are selected,
//! whether the menu is open, what the user typed into the search box, and how
//! those change in response to clicks. It renders nothing. Instead it hands out
//! **prop getters**, bags of attributes and event handlers that you attach
//! to whatever elements your toolkit draws.
//!
//! The core type is [`Select`], a cloneable handle configured by a
//! [`SelectConfig`]. It tracks a [`SelectState`]:
//! - `is_open`: whether the options menu is shown.
//! - `selected`: the selected options, in insertion order.
//! - `search_value`: the search text used to filter options.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_select::props::{Event, ON_CHANGE, ON_CLICK, Props};
//! use understory_select::{Options, Select, SelectConfig, SelectOption};
//!
//! let select = Select::new(SelectConfig::new().options(Options::Flat(vec![
//!     SelectOption::new("Vienna", 1),
//!     SelectOption::new("Bucharest", 2),
//!     SelectOption::new("Bukhara", 3),
//!     SelectOption::new("Havana", 4),
//! ])));
//!
//! // Wire the input: typing filters the options.
//! let input = select.input_props(Props::new());
//! input.call(ON_CHANGE, &Event::Input("bu".into()));
//!
//! let groups = select.group_options();
//! let labels: Vec<String> = groups[0]
//!     .options
//!     .iter()
//!     .map(|view| view.option.label.to_string())
//!     .collect();
//! assert_eq!(labels, ["Bucharest", "Bukhara"]);
//!
//! // Clicking an option selects it and closes the menu.
//! groups[0].options[1].option_props(Props::new()).call(ON_CLICK, &Event::Click);
//! assert_eq!(select.state().selected, vec![SelectOption::new("Bukhara", 3)]);
//! ```
//!
//! ## Concepts
//!
//! **Options** are either flat or grouped ([`Options`]). Filtering is a
//! case-insensitive substring match on labels; groups left without matches
//! are hidden. [`Select::group_options`] always yields groups, wrapping flat
//! options into one anonymous group, with every option annotated as active or
//! not.
//!
//! **Controlled vs uncontrolled.** With both an `on_change` callback and a
//! defined value, the select is controlled: clicks only report the new value,
//! and the caller answers with [`Select::set_value`]. Without them, clicks
//! update the selection directly and `on_change` hears about each change.
//!
//! **Prop getters** merge your overrides with the select's own props (see
//! [`props`]). Handlers are chained, the select's first, so its state is
//! already updated when your handler runs.
//!
//! **Element slots.** [`Select::select_ref`], [`Select::options_ref`], and
//! [`Select::input_ref`] are handed out through the prop getters. Attach them
//! to your rendered elements (their world-space bounds) so outside clicks can
//! close the menu ([`Select::handle_pointer`]) and the search input can be
//! focused.
//!
//! ## Logging
//!
//! State transitions are reported through [`tracing`] at `trace` level and
//! ignored requests at `debug` level. No subscriber is installed.
//!
//! ## Features
//!
//! - `std` (default): builds Kurbo with `std`.
//! - `libm`: builds Kurbo with `libm` for `no_std` targets.
//! - `hashbrown`: annotates active options through a hashed set of selected
//!   values, which helps with large selections.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod element;
pub mod option;
pub mod outside;
pub mod props;
mod select;
pub mod state;
pub mod track;

pub use config::{ChangeCallback, SelectConfig, SelectValue};
pub use element::ElementRef;
pub use option::{Label, OptionEntry, OptionValue, Options, SelectGroup, SelectOption};
pub use select::{GroupOption, OptionView, Select, WeakSelect};
pub use state::SelectState;
