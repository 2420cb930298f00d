// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Commit-to-commit bookkeeping: previous values and first-run guards.

use core::mem;

/// Remembers the value observed at the previous commit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Previous<T> {
    value: Option<T>,
}

impl<T> Previous<T> {
    /// Creates a tracker that has observed nothing yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { value: None }
    }

    /// The value from the previous commit, or `None` before the first.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Records `current` and returns what was recorded before it.
    pub fn replace(&mut self, current: T) -> Option<T> {
        mem::replace(&mut self.value, Some(current))
    }
}

/// Lets an effect skip its very first run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FirstRun {
    done: bool,
}

impl FirstRun {
    /// Creates a guard that has not run yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { done: false }
    }

    /// Returns `true` exactly once: on the first call.
    pub fn take(&mut self) -> bool {
        !mem::replace(&mut self.done, true)
    }
}
