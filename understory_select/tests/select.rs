// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_select` crate.
//!
//! These drive a `Select` the way a UI would: through prop getters, option
//! clicks, and external value changes, checking state and `on_change` traffic.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_select::option::labels_of;
use understory_select::outside::{PointerEvent, PointerKind};
use understory_select::props::{Event, Handler, ON_CHANGE, ON_CLICK, PropGetter, Props, REF};
use understory_select::{
    GroupOption, Label, Options, Select, SelectConfig, SelectGroup, SelectOption, SelectValue,
};

fn cities() -> Vec<SelectOption> {
    vec![
        SelectOption::new("Vienna", 1),
        SelectOption::new("Bucharest", 2),
        SelectOption::new("Bukhara", 3),
        SelectOption::new("Havana", 4),
    ]
}

fn config() -> SelectConfig {
    SelectConfig::new()
        .value(Some(SelectValue::One(cities()[0].clone())))
        .options(cities())
}

fn click(groups: &[GroupOption], group: usize, index: usize) {
    let props = groups[group].options[index].option_props(Props::new());
    assert!(props.call(ON_CLICK, &Event::Click), "option has a click handler");
}

fn visible_labels(select: &Select) -> Vec<String> {
    select
        .group_options()
        .iter()
        .flat_map(|group| group.options.iter())
        .map(|view| view.option.label.to_string())
        .collect()
}

type Changes = Rc<RefCell<Vec<SelectValue>>>;

fn recording(config: SelectConfig) -> (SelectConfig, Changes) {
    let changes = Changes::default();
    let sink = Rc::clone(&changes);
    (
        config.on_change(move |value| sink.borrow_mut().push(value.clone())),
        changes,
    )
}

#[test]
fn initial_value_seeds_selection() {
    let select = Select::new(config());
    assert_eq!(select.state().selected, vec![cities()[0].clone()]);

    let select = Select::new(config().value(Some(SelectValue::Null)));
    assert!(select.state().selected.is_empty());

    let select = Select::new(config().value(None));
    assert!(select.state().selected.is_empty());

    let select = Select::new(config().value(Some(SelectValue::Many(cities()))));
    assert_eq!(select.state().selected, cities());
}

#[test]
fn new_external_value_replaces_selection_without_notifying() {
    let (config, changes) = recording(config());
    let select = Select::new(config);
    let new_value = SelectOption::new("2", 2);

    select.set_value(Some(SelectValue::One(new_value.clone())));

    assert!(changes.borrow().is_empty());
    assert_eq!(select.state().selected, vec![new_value]);
}

#[test]
fn null_external_value_clears_selection() {
    let select = Select::new(config());
    select.set_value(Some(SelectValue::Null));
    assert!(select.state().selected.is_empty());
}

#[test]
fn undefined_external_value_clears_selection() {
    let select = Select::new(config());
    select.set_value(None);
    assert!(select.state().selected.is_empty());
}

#[test]
fn uncontrolled_single_clicks_report_one_option_each() {
    let (config, changes) = recording(config().value(None));
    let select = Select::new(config);
    assert!(changes.borrow().is_empty());

    click(&select.group_options(), 0, 0);
    click(&select.group_options(), 0, 1);
    click(&select.group_options(), 0, 0);

    let changes = changes.borrow();
    assert_eq!(changes.len(), 3);
    assert_eq!(changes[0], SelectValue::One(cities()[0].clone()));
    assert_eq!(changes[1], SelectValue::One(cities()[1].clone()));
    assert_eq!(changes[2], SelectValue::One(cities()[0].clone()));
    assert_eq!(select.state().selected, vec![cities()[0].clone()]);
}

#[test]
fn uncontrolled_multiple_clicks_toggle() {
    let (config, changes) = recording(config().value(None).multiple(true));
    let select = Select::new(config);

    click(&select.group_options(), 0, 0);
    assert_eq!(select.state().selected, vec![cities()[0].clone()]);
    click(&select.group_options(), 0, 1);
    assert_eq!(select.state().selected, vec![cities()[0].clone(), cities()[1].clone()]);
    click(&select.group_options(), 0, 0);
    assert_eq!(select.state().selected, vec![cities()[1].clone()]);

    let changes = changes.borrow();
    assert_eq!(changes.len(), 3);
    assert_eq!(changes[2], SelectValue::Many(vec![cities()[1].clone()]));
}

#[test]
fn controlled_select_reports_and_follows_external_value() {
    for multiple in [false, true] {
        let new_value = SelectOption::new("2", 2);
        let initial = SelectOption::new("Vienna", 1);
        let select = Select::new(
            SelectConfig::new()
                .value(Some(SelectValue::One(initial.clone())))
                .multiple(multiple)
                .options(vec![new_value.clone()]),
        );

        let changes = Changes::default();
        let sink = Rc::clone(&changes);
        let weak = select.downgrade();
        select.set_on_change(move |value| {
            sink.borrow_mut().push(value.clone());
            if let Some(select) = weak.upgrade() {
                select.set_value(Some(value.clone()));
            }
        });
        assert!(changes.borrow().is_empty());

        click(&select.group_options(), 0, 0);

        let expected = if multiple {
            vec![initial.clone(), new_value.clone()]
        } else {
            vec![new_value.clone()]
        };
        assert_eq!(changes.borrow().len(), 1, "multiple: {multiple}");
        assert_eq!(
            changes.borrow()[0],
            SelectValue::from_selected(&expected, multiple)
        );
        assert_eq!(select.state().selected, expected);
    }
}

#[test]
fn controlled_click_without_feedback_leaves_selection() {
    let (config, changes) = recording(config());
    let select = Select::new(config);

    click(&select.group_options(), 0, 2);

    assert_eq!(
        *changes.borrow(),
        vec![SelectValue::One(cities()[2].clone())]
    );
    assert_eq!(select.state().selected, vec![cities()[0].clone()]);
}

#[test]
fn search_filters_and_clearing_restores() {
    let select = Select::new(config());
    let all: Vec<String> = labels_of(&cities()).iter().map(ToString::to_string).collect();
    assert_eq!(visible_labels(&select), all);

    select.set_search_value("Bu");
    assert_eq!(visible_labels(&select), ["Bucharest", "Bukhara"]);

    select.set_search_value("");
    assert_eq!(visible_labels(&select).len(), 4);

    select.set_search_value("bu");
    select.clear_search_value();
    assert_eq!(visible_labels(&select).len(), 4);
}

#[test]
fn search_drops_groups_without_matches() {
    let select = Select::new(SelectConfig::new().options(vec![
        SelectGroup::new("Europe", vec![cities()[0].clone(), cities()[1].clone()]),
        SelectGroup::new("Asia", vec![cities()[2].clone()]),
        SelectGroup::new("Americas", vec![cities()[3].clone()]),
    ]));
    assert!(select.is_grouped());
    assert_eq!(select.group_options().len(), 3);

    select.set_search_value("bu");
    let groups = select.group_options();
    let labels: Vec<_> = groups.iter().map(|group| group.label.clone()).collect();
    assert_eq!(
        labels,
        vec![Some(Label::from("Europe")), Some(Label::from("Asia"))]
    );
    assert_eq!(groups[0].options.len(), 1);

    // Search never rewrites the source options.
    select.clear_search_value();
    assert_eq!(select.group_options().len(), 3);
}

#[test]
fn input_props_drive_search() {
    let select = Select::new(config());
    let input = select.input_props(Props::new());
    assert_eq!(input.element_ref(REF), Some(select.input_ref()));
    assert_eq!(input.text("value"), Some(""));

    assert!(input.call(ON_CHANGE, &Event::Input("hav".into())));
    assert_eq!(select.state().search_value, "hav");
    assert_eq!(select.input_props(Props::new()).text("value"), Some("hav"));
    assert_eq!(visible_labels(&select), ["Havana"]);
}

#[test]
fn search_survives_close_and_reopen() {
    let select = Select::new(config());
    select.show_options();
    select.set_search_value("Bu");
    select.hide_options();
    select.show_options();
    assert_eq!(select.state().search_value, "Bu");
}

#[test]
fn set_add_and_remove_selected() {
    let select = Select::new(config());
    let one = SelectOption::new("1", 1);
    let two = SelectOption::new("2", 2);

    select.set_selected(vec![one.clone(), two.clone()]);
    assert_eq!(select.state().selected, vec![one.clone(), two.clone()]);

    select.remove_selected(1);
    assert_eq!(select.state().selected, vec![two.clone()]);

    select.remove_selected(&two);
    assert!(select.state().selected.is_empty());

    select.add_selected(two.clone());
    assert_eq!(select.state().selected, vec![two]);
}

#[test]
fn add_selected_appends_to_initial_value() {
    let select = Select::new(config());
    let extra = SelectOption::new("2", 2);
    select.add_selected(extra.clone());
    assert_eq!(select.state().selected, vec![cities()[0].clone(), extra]);
}

#[test]
fn remove_by_value_or_option_is_equivalent() {
    let by_value = Select::new(config().value(Some(SelectValue::Many(cities()))));
    let by_option = Select::new(config().value(Some(SelectValue::Many(cities()))));
    by_value.remove_selected(3);
    by_option.remove_selected(cities()[2].clone());
    assert_eq!(by_value.state().selected, by_option.state().selected);

    // Unknown values are ignored.
    by_value.remove_selected("nope");
    assert_eq!(by_value.state().selected, by_option.state().selected);
}

#[test]
fn show_and_hide_options() {
    let select = Select::new(config());
    select.show_options();
    assert!(select.state().is_open);
    select.hide_options();
    assert!(!select.state().is_open);
}

#[test]
fn hide_when_closed_is_idempotent_and_silent() {
    let (config, changes) = recording(config().value(None));
    let select = Select::new(config);
    select.hide_options();
    select.hide_options();
    assert!(!select.state().is_open);
    assert!(changes.borrow().is_empty());
}

#[test]
fn control_props_toggle_the_menu() {
    let select = Select::new(config());
    let control = select.control_props(Props::new());
    control.call(ON_CLICK, &Event::Click);
    assert!(select.state().is_open);
    control.call(ON_CLICK, &Event::Click);
    assert!(!select.state().is_open);
}

#[test]
fn user_handlers_run_after_state_changes() {
    let select = Select::new(config());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let weak = select.downgrade();
    let control = select.control_props(Props::new().with(
        ON_CLICK,
        Handler::new(move |_| {
            let open = weak.upgrade().is_some_and(|select| select.state().is_open);
            sink.borrow_mut().push(open);
        }),
    ));
    control.call(ON_CLICK, &Event::Click);
    control.call(ON_CLICK, &Event::Click);
    assert_eq!(*seen.borrow(), vec![true, false]);
}

#[test]
fn function_override_replaces_props() {
    let select = Select::new(config());
    let props = select.control_props(PropGetter::from_fn(|internal| {
        assert!(internal.handler(ON_CLICK).is_some());
        Props::new().with("role", "button")
    }));
    assert_eq!(props.text("role"), Some("button"));
    assert!(!props.call(ON_CLICK, &Event::Click));
    assert!(!select.state().is_open);
}

#[test]
fn multiple_stays_open_unless_once_click_option() {
    let select = Select::new(config().value(None).multiple(true));
    select.show_options();
    click(&select.group_options(), 0, 0);
    assert!(select.state().is_open);

    select.set_once_click_option(true);
    click(&select.group_options(), 0, 1);
    assert!(!select.state().is_open);
    assert_eq!(select.state().selected.len(), 2);
}

#[test]
fn single_click_closes_menu() {
    let select = Select::new(config().value(None));
    select.show_options();
    click(&select.group_options(), 0, 3);
    assert!(!select.state().is_open);
    assert_eq!(select.state().selected, vec![cities()[3].clone()]);
}

#[test]
fn disabled_options_ignore_clicks() {
    let (config, changes) = recording(
        SelectConfig::new().options(vec![SelectOption::new("Off", 1).disabled(true)]),
    );
    let select = Select::new(config);
    select.show_options();
    click(&select.group_options(), 0, 0);
    assert!(select.state().selected.is_empty());
    assert!(select.state().is_open);
    assert!(changes.borrow().is_empty());
}

#[test]
fn click_payload_drops_disabled_flag_and_marks_active() {
    let select = Select::new(config().value(None).multiple(true));
    click(&select.group_options(), 0, 1);
    let groups = select.group_options();
    let active: Vec<bool> = groups[0].options.iter().map(|view| view.is_active).collect();
    assert_eq!(active, vec![false, true, false, false]);
    assert!(!select.state().selected[0].is_disabled);
}

#[test]
fn disabled_blocks_opening_and_closes_open_menu() {
    let select = Select::new(config());
    select.show_options();
    assert!(select.state().is_open);

    select.set_disabled(true);
    assert!(!select.state().is_open);

    select.show_options();
    select.toggle_options();
    assert!(!select.state().is_open);

    // Other setters keep working.
    select.set_search_value("x");
    select.set_selected(Vec::new());
    assert_eq!(select.state().search_value, "x");
    assert!(select.state().selected.is_empty());
}

#[test]
fn searchable_focuses_input_on_open() {
    let select = Select::new(config().searchable(true));
    let focused = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&focused);
    select.input_ref().set_focus_hook(move || *sink.borrow_mut() += 1);
    select.input_ref().attach(Rect::new(0.0, 0.0, 100.0, 20.0));

    select.show_options();
    assert_eq!(*focused.borrow(), 1);

    // Staying open does not refocus; reopening does.
    select.set_search_value("a");
    assert_eq!(*focused.borrow(), 1);
    select.hide_options();
    select.show_options();
    assert_eq!(*focused.borrow(), 2);

    // Clicking in the options container refocuses while open.
    select.options_props(Props::new()).call(ON_CLICK, &Event::Click);
    assert_eq!(*focused.borrow(), 3);
}

#[test]
fn non_searchable_never_focuses() {
    let select = Select::new(config());
    select.input_ref().attach(Rect::new(0.0, 0.0, 100.0, 20.0));
    select.show_options();
    select.options_props(Props::new()).call(ON_CLICK, &Event::Click);
    assert_eq!(select.input_ref().focus_requests(), 0);
}

#[test]
fn outside_pointer_closes_open_menu() {
    let select = Select::new(config());
    select.select_ref().attach(Rect::new(0.0, 0.0, 200.0, 30.0));
    select.options_ref().attach(Rect::new(0.0, 30.0, 200.0, 150.0));
    let at = |x, y| PointerEvent::new(PointerKind::MouseDown, Point::new(x, y));

    // Closed: the detector is off.
    assert!(!select.handle_pointer(&at(500.0, 500.0)));

    select.show_options();
    assert!(!select.handle_pointer(&at(10.0, 10.0)));
    assert!(!select.handle_pointer(&at(10.0, 100.0)));
    assert!(select.state().is_open);

    assert!(select.handle_pointer(&at(500.0, 500.0)));
    assert!(!select.state().is_open);
}

#[test]
fn select_and_options_props_carry_slots() {
    let select = Select::new(config());
    assert_eq!(
        select.select_props(Props::new()).element_ref(REF),
        Some(select.select_ref())
    );
    assert_eq!(
        select.options_props(Props::new()).element_ref(REF),
        Some(select.options_ref())
    );
    let groups = select.group_options();
    assert_eq!(groups[0].group_props(Props::new()).text("key"), Some("select-group-0"));
    assert_eq!(
        groups[0].options[2].option_props(Props::new()).text("key"),
        Some("select-option-2")
    );
}

#[test]
fn empty_options_have_no_groups() {
    let select = Select::new(SelectConfig::new());
    assert!(select.group_options().is_empty());
    assert!(!select.is_grouped());

    select.set_options(Options::Flat(cities()));
    assert_eq!(select.group_options()[0].options.len(), 4);
}

#[test]
fn uncontrolled_reports_imperative_changes_once() {
    let (config, changes) = recording(config().value(None).multiple(true));
    let select = Select::new(config);
    select.add_selected(cities()[0].clone());
    select.show_options();
    select.hide_options();
    select.set_selected(vec![cities()[0].clone()]);
    assert_eq!(
        *changes.borrow(),
        vec![SelectValue::Many(vec![cities()[0].clone()])]
    );
}

#[test]
fn dropped_select_disarms_handlers() {
    let select = Select::new(config());
    let control = select.control_props(Props::new());
    drop(select);
    // The handler still exists but has nothing left to drive.
    assert!(control.call(ON_CLICK, &Event::Click));
}
