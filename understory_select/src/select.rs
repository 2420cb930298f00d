// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The select handle: state machine, value reconciliation, and prop getters.
//!
//! ## Processing model
//!
//! Every change is processed as a *step*: at most one queued [`Action`] is
//! reduced, then the effects run against the new state in a fixed order:
//!
//! 1. focus the search input when `(searchable, is_open)` became `(true, true)`;
//! 2. queue a close when the select is disabled while open;
//! 3. report the selection through `on_change` when uncontrolled and it
//!    differs from the previous step (never on the very first step);
//! 4. reconcile the external value into the selection when it changed.
//!
//! Effects may queue more actions; those are drained by the same loop before
//! the originating call returns. Callbacks run with no internal borrow held,
//! so they may call back into the handle.

use alloc::collections::VecDeque;
use alloc::format;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::config::{ChangeCallback, SelectConfig, SelectValue};
use crate::element::ElementRef;
use crate::option::{Label, OptionValue, Options, SelectOption, visible_groups};
use crate::outside::{OutsideClick, OutsideClickOptions, PointerEvent};
use crate::props::{
    Event, Handler, KEY, ON_CHANGE, ON_CLICK, PropGetter, Props, REF, VALUE, merge_props,
};
use crate::state::{Action, SelectState, reduce};
use crate::track::{FirstRun, Previous};

/// Work that must run after the core borrow is released.
enum Callout {
    FocusInput,
    Change(ChangeCallback, SelectValue),
}

struct Core {
    config: SelectConfig,
    state: SelectState,
    queue: VecDeque<Action>,
    /// Configuration changed since the last step.
    dirty: bool,
    first: FirstRun,
    prev_focus: Previous<(bool, bool)>,
    prev_selected: Previous<Vec<SelectOption>>,
    prev_value: Previous<Option<SelectValue>>,
}

impl Core {
    fn step(&mut self) -> Option<SmallVec<[Callout; 2]>> {
        let action = self.queue.pop_front();
        if action.is_none() && !self.dirty {
            return None;
        }
        self.dirty = false;
        if let Some(action) = action {
            trace!(?action, "dispatch");
            self.state = reduce(&self.state, action);
        }
        Some(self.commit())
    }

    fn commit(&mut self) -> SmallVec<[Callout; 2]> {
        let mut callouts = SmallVec::new();
        let first = self.first.take();

        let focus = (self.config.searchable, self.state.is_open);
        if self.prev_focus.replace(focus) != Some(focus) && focus == (true, true) {
            callouts.push(Callout::FocusInput);
        }

        if self.config.disabled && self.state.is_open {
            trace!("disabled while open, closing");
            self.queue.push_back(Action::CloseMenu);
        }

        let prev_selected = self.prev_selected.replace(self.state.selected.clone());
        if !first
            && self.config.value.is_none()
            && prev_selected.as_ref() != Some(&self.state.selected)
            && let Some(on_change) = &self.config.on_change
        {
            callouts.push(Callout::Change(
                Rc::clone(on_change),
                SelectValue::from_selected(&self.state.selected, self.config.multiple),
            ));
        }

        let prev_value = self.prev_value.replace(self.config.value.clone()).flatten();
        let value = self.config.value.as_ref();
        if is_nullish(value) {
            if !is_nullish(prev_value.as_ref()) {
                trace!("external value cleared");
                self.queue.push_back(Action::SetSelected(Vec::new()));
            }
        } else if value != prev_value.as_ref() {
            let next = value.map(SelectValue::to_selected).unwrap_or_default();
            if next != self.state.selected {
                trace!("external value changed, syncing selection");
                self.queue.push_back(Action::SetSelected(next));
            }
        }

        callouts
    }
}

fn is_nullish(value: Option<&SelectValue>) -> bool {
    value.is_none_or(SelectValue::is_null)
}

struct Shared {
    core: RefCell<Core>,
    flushing: Cell<bool>,
    input_ref: ElementRef,
    select_ref: ElementRef,
    options_ref: ElementRef,
}

/// Resets the flushing flag even if a callback unwinds.
struct FlushGuard<'a>(&'a Cell<bool>);

impl Drop for FlushGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Selected values, for annotating options as active.
#[cfg(feature = "hashbrown")]
struct ActiveSet<'a>(hashbrown::HashSet<&'a OptionValue>);

#[cfg(feature = "hashbrown")]
impl<'a> ActiveSet<'a> {
    fn new(selected: &'a [SelectOption]) -> Self {
        Self(selected.iter().map(|option| &option.value).collect())
    }

    fn contains(&self, value: &OptionValue) -> bool {
        self.0.contains(value)
    }
}

/// Selected values, for annotating options as active.
#[cfg(not(feature = "hashbrown"))]
struct ActiveSet<'a>(&'a [SelectOption]);

#[cfg(not(feature = "hashbrown"))]
impl<'a> ActiveSet<'a> {
    fn new(selected: &'a [SelectOption]) -> Self {
        Self(selected)
    }

    fn contains(&self, value: &OptionValue) -> bool {
        self.0.iter().any(|option| &option.value == value)
    }
}

/// A headless select.
///
/// `Select` is a cheap, cloneable handle; clones drive the same select. It
/// is single-threaded: all processing happens synchronously inside the call
/// that caused it.
///
/// # Example
///
/// ```rust
/// use understory_select::props::{Event, ON_CLICK, Props};
/// use understory_select::{Options, Select, SelectConfig, SelectOption};
///
/// let select = Select::new(SelectConfig::new().options(Options::Flat(vec![
///     SelectOption::new("Vienna", 1),
///     SelectOption::new("Bucharest", 2),
/// ])));
///
/// select.control_props(Props::new()).call(ON_CLICK, &Event::Click);
/// assert!(select.state().is_open);
///
/// let groups = select.group_options();
/// groups[0].options[1].option_props(Props::new()).call(ON_CLICK, &Event::Click);
///
/// let state = select.state();
/// assert_eq!(state.selected, vec![SelectOption::new("Bucharest", 2)]);
/// assert!(!state.is_open);
/// ```
#[derive(Clone)]
pub struct Select {
    shared: Rc<Shared>,
}

/// A non-owning [`Select`] handle, for callbacks that need to reach back.
#[derive(Clone, Debug)]
pub struct WeakSelect {
    shared: Weak<Shared>,
}

impl WeakSelect {
    /// The select, if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Select> {
        self.shared.upgrade().map(|shared| Select { shared })
    }
}

impl Select {
    /// Creates a select, seeding the selection from the configured value.
    #[must_use]
    pub fn new(config: SelectConfig) -> Self {
        let state = SelectState::new(config.initial_selected());
        trace!(
            grouped = config.options.is_grouped(),
            multiple = config.multiple,
            "select created"
        );
        let select = Self {
            shared: Rc::new(Shared {
                core: RefCell::new(Core {
                    config,
                    state,
                    queue: VecDeque::new(),
                    dirty: true,
                    first: FirstRun::new(),
                    prev_focus: Previous::new(),
                    prev_selected: Previous::new(),
                    prev_value: Previous::new(),
                }),
                flushing: Cell::new(false),
                input_ref: ElementRef::new(),
                select_ref: ElementRef::new(),
                options_ref: ElementRef::new(),
            }),
        };
        select.flush();
        select
    }

    /// A non-owning handle to this select.
    #[must_use]
    pub fn downgrade(&self) -> WeakSelect {
        WeakSelect {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// A snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SelectState {
        self.shared.core.borrow().state.clone()
    }

    /// A snapshot of the current configuration.
    #[must_use]
    pub fn config(&self) -> SelectConfig {
        self.shared.core.borrow().config.clone()
    }

    /// Returns `true` when the options are grouped.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        self.shared.core.borrow().config.options.is_grouped()
    }

    /// The slot for the root select element; see [`Select::select_props`].
    #[must_use]
    pub fn select_ref(&self) -> &ElementRef {
        &self.shared.select_ref
    }

    /// The slot for the options container; see [`Select::options_props`].
    #[must_use]
    pub fn options_ref(&self) -> &ElementRef {
        &self.shared.options_ref
    }

    /// The slot for the search input; see [`Select::input_props`].
    #[must_use]
    pub fn input_ref(&self) -> &ElementRef {
        &self.shared.input_ref
    }

    /// Replaces the selection.
    pub fn set_selected(&self, selected: Vec<SelectOption>) {
        self.dispatch(Action::SetSelected(selected));
    }

    /// Appends to the selection.
    pub fn add_selected(&self, option: SelectOption) {
        self.dispatch(Action::AddSelected(option));
    }

    /// Removes an option, given either the option itself or its value.
    pub fn remove_selected(&self, target: impl Into<OptionValue>) {
        self.dispatch(Action::RemoveSelected(target.into()));
    }

    /// Opens the menu, unless the select is disabled.
    pub fn show_options(&self) {
        if self.shared.core.borrow().config.disabled {
            debug!("show_options ignored: select is disabled");
            return;
        }
        self.dispatch(Action::OpenMenu);
    }

    /// Closes the menu.
    pub fn hide_options(&self) {
        self.dispatch(Action::CloseMenu);
    }

    /// Opens a closed menu or closes an open one.
    pub fn toggle_options(&self) {
        if self.shared.core.borrow().state.is_open {
            self.hide_options();
        } else {
            self.show_options();
        }
    }

    /// Sets the search text that filters the options.
    pub fn set_search_value(&self, value: impl Into<String>) {
        self.dispatch(Action::SetSearchValue(value.into()));
    }

    /// Clears the search text.
    pub fn clear_search_value(&self) {
        self.dispatch(Action::ClearSearchValue);
    }

    /// Sets the external value; `None` makes the select uncontrolled.
    pub fn set_value(&self, value: Option<SelectValue>) {
        self.update(|config| config.value = value);
    }

    /// Replaces the option source.
    pub fn set_options(&self, options: impl Into<Options>) {
        let options = options.into();
        self.update(|config| config.options = options);
    }

    /// Enables or disables the select. Disabling closes an open menu.
    pub fn set_disabled(&self, disabled: bool) {
        self.update(|config| config.disabled = disabled);
    }

    /// Switches multiple mode.
    pub fn set_multiple(&self, multiple: bool) {
        self.update(|config| config.multiple = multiple);
    }

    /// Switches search-input focusing on open.
    pub fn set_searchable(&self, searchable: bool) {
        self.update(|config| config.searchable = searchable);
    }

    /// Switches closing on option click in multiple mode.
    pub fn set_once_click_option(&self, once_click_option: bool) {
        self.update(|config| config.once_click_option = once_click_option);
    }

    /// Replaces the change callback.
    pub fn set_on_change(&self, on_change: impl Fn(&SelectValue) + 'static) {
        let on_change: ChangeCallback = Rc::new(on_change);
        self.update(|config| config.on_change = Some(on_change));
    }

    /// The visible groups for the current search, each option annotated
    /// with whether it is selected.
    #[must_use]
    pub fn group_options(&self) -> Vec<GroupOption> {
        let core = self.shared.core.borrow();
        let active = ActiveSet::new(&core.state.selected);
        visible_groups(&core.config.options, &core.state.search_value)
            .into_iter()
            .enumerate()
            .map(|(index, group)| GroupOption {
                index,
                label: group.label,
                options: group
                    .options
                    .into_iter()
                    .enumerate()
                    .map(|(index, option)| OptionView {
                        index,
                        is_active: active.contains(&option.value),
                        option,
                        select: self.downgrade(),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Props for the search input: its slot, the search text, and a change
    /// handler expecting [`Event::Input`].
    #[must_use]
    pub fn input_props(&self, overrides: impl Into<PropGetter>) -> Props {
        let search_value = self.shared.core.borrow().state.search_value.clone();
        let select = self.downgrade();
        let internal = Props::new()
            .with(REF, self.shared.input_ref.clone())
            .with(VALUE, search_value)
            .with(
                ON_CHANGE,
                Handler::new(move |event| {
                    if let Event::Input(text) = event
                        && let Some(select) = select.upgrade()
                    {
                        select.set_search_value(text.clone());
                    }
                }),
            );
        merge_props(internal, overrides)
    }

    /// Props for the root select element; outside clicks are measured against it.
    #[must_use]
    pub fn select_props(&self, overrides: impl Into<PropGetter>) -> Props {
        let internal = Props::new().with(REF, self.shared.select_ref.clone());
        merge_props(internal, overrides)
    }

    /// Props for the control that opens and closes the menu.
    #[must_use]
    pub fn control_props(&self, overrides: impl Into<PropGetter>) -> Props {
        let select = self.downgrade();
        let internal = Props::new().with(
            ON_CLICK,
            Handler::new(move |_| {
                if let Some(select) = select.upgrade() {
                    select.toggle_options();
                }
            }),
        );
        merge_props(internal, overrides)
    }

    /// Props for the options container; clicks inside it refocus the search input.
    #[must_use]
    pub fn options_props(&self, overrides: impl Into<PropGetter>) -> Props {
        let select = self.downgrade();
        let internal = Props::new()
            .with(REF, self.shared.options_ref.clone())
            .with(
                ON_CLICK,
                Handler::new(move |_| {
                    if let Some(select) = select.upgrade() {
                        select.focus_input();
                    }
                }),
            );
        merge_props(internal, overrides)
    }

    /// Feeds a pointer event to the outside-click detector.
    ///
    /// While the menu is open, an event outside both the select element and
    /// the options container closes it. Returns whether it did.
    pub fn handle_pointer(&self, event: &PointerEvent) -> bool {
        let is_open = self.shared.core.borrow().state.is_open;
        let detector =
            OutsideClick::new(self.shared.select_ref.clone()).with_options(OutsideClickOptions {
                disabled: !is_open,
                ignore: Some(self.shared.options_ref.clone()),
                ..OutsideClickOptions::default()
            });
        detector.handle(event, |_| self.hide_options())
    }

    fn focus_input(&self) {
        let focus = {
            let core = self.shared.core.borrow();
            core.config.searchable && core.state.is_open
        };
        if focus {
            self.shared.input_ref.focus();
        }
    }

    fn click_option(&self, option: &SelectOption) {
        if option.is_disabled {
            debug!(value = ?option.value, "click on disabled option ignored");
            return;
        }
        let payload = option.payload();
        let (next, close) = {
            let core = self.shared.core.borrow();
            if core.config.multiple {
                let next = if core.state.is_selected(&payload.value) {
                    core.state
                        .selected
                        .iter()
                        .filter(|selected| selected.value != payload.value)
                        .cloned()
                        .collect()
                } else {
                    let mut next = core.state.selected.clone();
                    next.push(payload);
                    next
                };
                (next, core.config.once_click_option)
            } else {
                (vec![payload], true)
            }
        };
        self.change_or_set_selected(next);
        if close {
            self.hide_options();
        }
    }

    /// Routes a new selection: reported when controlled, applied otherwise.
    fn change_or_set_selected(&self, selected: Vec<SelectOption>) {
        let controlled = {
            let core = self.shared.core.borrow();
            match (&core.config.on_change, &core.config.value) {
                (Some(on_change), Some(_)) => Some((
                    Rc::clone(on_change),
                    SelectValue::from_selected(&selected, core.config.multiple),
                )),
                _ => None,
            }
        };
        match controlled {
            Some((on_change, value)) => on_change(&value),
            None => self.set_selected(selected),
        }
    }

    fn update(&self, f: impl FnOnce(&mut SelectConfig)) {
        {
            let mut core = self.shared.core.borrow_mut();
            f(&mut core.config);
            core.dirty = true;
        }
        self.flush();
    }

    fn dispatch(&self, action: Action) {
        self.shared.core.borrow_mut().queue.push_back(action);
        self.flush();
    }

    /// Drains queued work. Nested calls return at once and leave the work
    /// to the outermost loop.
    fn flush(&self) {
        if self.shared.flushing.replace(true) {
            return;
        }
        let _guard = FlushGuard(&self.shared.flushing);
        loop {
            let callouts = self.shared.core.borrow_mut().step();
            let Some(callouts) = callouts else {
                break;
            };
            for callout in callouts {
                match callout {
                    Callout::FocusInput => {
                        self.shared.input_ref.focus();
                    }
                    Callout::Change(on_change, value) => on_change(&value),
                }
            }
        }
    }
}

impl fmt::Debug for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Select");
        match self.shared.core.try_borrow() {
            Ok(core) => s.field("config", &core.config).field("state", &core.state),
            Err(_) => s.field("state", &"<busy>"),
        };
        s.finish_non_exhaustive()
    }
}

/// A visible group of options.
#[derive(Clone, Debug)]
pub struct GroupOption {
    /// Position among the visible groups.
    pub index: usize,
    /// Group heading, if any.
    pub label: Option<Label>,
    /// Visible options of this group.
    pub options: Vec<OptionView>,
}

impl GroupOption {
    /// Props for the group element.
    #[must_use]
    pub fn group_props(&self, overrides: impl Into<PropGetter>) -> Props {
        let internal = Props::new().with(KEY, format!("select-group-{}", self.index));
        merge_props(internal, overrides)
    }
}

/// A visible option.
#[derive(Clone, Debug)]
pub struct OptionView {
    /// Position within its group.
    pub index: usize,
    /// The option as configured.
    pub option: SelectOption,
    /// Whether a selected option has this option's value.
    pub is_active: bool,
    select: WeakSelect,
}

impl OptionView {
    /// Props for the option element; its click handler selects or toggles
    /// the option.
    #[must_use]
    pub fn option_props(&self, overrides: impl Into<PropGetter>) -> Props {
        let select = self.select.clone();
        let option = self.option.clone();
        let internal = Props::new()
            .with(KEY, format!("select-option-{}", self.index))
            .with(
                ON_CLICK,
                Handler::new(move |_| {
                    if let Some(select) = select.upgrade() {
                        select.click_option(&option);
                    }
                }),
            );
        merge_props(internal, overrides)
    }
}
