// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Select basics.
//!
//! Drive a headless multi-select through its prop getters, the way a UI
//! toolkit would: click the control, type into the search box, click options,
//! and click outside to dismiss.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example select_basics`

use kurbo::{Point, Rect};
use understory_demos::{cities, init_tracing, render};
use understory_select::outside::{PointerEvent, PointerKind};
use understory_select::props::{Event, Handler, ON_CHANGE, ON_CLICK, Props, REF};
use understory_select::{Select, SelectConfig};

fn main() {
    init_tracing();

    let select = Select::new(
        SelectConfig::new()
            .multiple(true)
            .searchable(true)
            .options(cities())
            .on_change(|value| println!("on_change: {value:?}")),
    );

    // "Render": attach the element slots to where our widgets live.
    let root = select.select_props(Props::new());
    if let Some(el) = root.element_ref(REF) {
        el.attach(Rect::new(0.0, 0.0, 240.0, 32.0));
    }
    let menu = select.options_props(Props::new());
    if let Some(el) = menu.element_ref(REF) {
        el.attach(Rect::new(0.0, 32.0, 240.0, 200.0));
    }
    let input = select.input_props(Props::new());
    if let Some(el) = input.element_ref(REF) {
        el.attach(Rect::new(4.0, 36.0, 236.0, 56.0));
        el.set_focus_hook(|| println!("(search input focused)"));
    }

    // The caller's own click handler runs after the select's.
    let control = select.control_props(
        Props::new()
            .with(ON_CLICK, Handler::new(|_| println!("control clicked")))
            .with("aria-haspopup", "listbox"),
    );

    control.call(ON_CLICK, &Event::Click);
    print!("{}", render(&select));

    input.call(ON_CHANGE, &Event::Input("bu".into()));
    print!("{}", render(&select));

    for group in select.group_options() {
        for view in &group.options {
            view.option_props(Props::new()).call(ON_CLICK, &Event::Click);
        }
    }
    select.clear_search_value();
    print!("{}", render(&select));

    // A press far away from the select and its menu dismisses it.
    let outside = PointerEvent::new(PointerKind::MouseDown, Point::new(600.0, 400.0));
    if select.handle_pointer(&outside) {
        println!("dismissed by outside click");
    }
    print!("{}", render(&select));
}
