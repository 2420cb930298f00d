// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Understory demos.

use std::fmt::Write as _;

use understory_select::{Select, SelectOption};

/// Installs a `tracing` subscriber honoring `RUST_LOG`, defaulting to `trace`
/// for the select engine.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
                .add_directive(
                    "understory_select=trace"
                        .parse()
                        .unwrap_or_else(|_| tracing::Level::INFO.into()),
                ),
        )
        .init();
}

/// The option list used throughout the demos.
pub fn cities() -> Vec<SelectOption> {
    vec![
        SelectOption::new("Vienna", 1),
        SelectOption::new("Bucharest", 2),
        SelectOption::new("Bukhara", 3),
        SelectOption::new("Havana", 4),
        SelectOption::new("Reykjavik", 5).disabled(true),
    ]
}

/// Draws a select as text: the control line, then the menu when open.
pub fn render(select: &Select) -> String {
    let state = select.state();
    let summary = if state.selected.is_empty() {
        "(none)".to_owned()
    } else {
        state
            .selected
            .iter()
            .map(|option| option.label.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let mut out = String::new();
    let marker = if state.is_open { '^' } else { 'v' };
    let _ = writeln!(out, "[{summary}] {marker}  search: {:?}", state.search_value);
    if state.is_open {
        for group in select.group_options() {
            if let Some(label) = &group.label {
                let _ = writeln!(out, "  {label}");
            }
            for view in &group.options {
                let check = if view.is_active { 'x' } else { ' ' };
                let disabled = if view.option.is_disabled { " (disabled)" } else { "" };
                let _ = writeln!(out, "    [{check}] {}{disabled}", view.option.label);
            }
        }
    }
    out
}
