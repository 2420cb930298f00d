// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element slots that correlate caller-rendered nodes with select behavior.
//!
//! A select hands out [`ElementRef`]s through its prop getters. The caller
//! attaches each one to the node it rendered by reporting that node's
//! world-space bounds, and optionally a focus hook. The select then uses the
//! slots for outside-click containment and for focusing the search input.

use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::fmt;

use kurbo::{Point, Rect};

/// Hook invoked when the engine asks for an element to take focus.
pub type FocusHook = Rc<dyn Fn()>;

#[derive(Default)]
struct Slot {
    bounds: Cell<Option<Rect>>,
    focus_hook: RefCell<Option<FocusHook>>,
    focus_requests: Cell<u32>,
}

/// A shared, cloneable reference to a caller-rendered element.
///
/// Clones refer to the same slot; equality is identity.
#[derive(Clone, Default)]
pub struct ElementRef {
    slot: Rc<Slot>,
}

impl ElementRef {
    /// Creates a detached slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the slot to an element occupying `bounds` (world space).
    ///
    /// Call again whenever the element moves or resizes.
    pub fn attach(&self, bounds: Rect) {
        self.slot.bounds.set(Some(bounds));
    }

    /// Detaches the slot, as when the element unmounts.
    pub fn detach(&self) {
        self.slot.bounds.set(None);
    }

    /// Returns `true` while attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.slot.bounds.get().is_some()
    }

    /// The attached element's bounds.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.slot.bounds.get()
    }

    /// Returns `true` if the attached element contains `point`.
    ///
    /// A detached slot contains nothing.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.bounds().is_some_and(|bounds| bounds.contains(point))
    }

    /// Installs the hook run by [`ElementRef::focus`].
    pub fn set_focus_hook(&self, hook: impl Fn() + 'static) {
        *self.slot.focus_hook.borrow_mut() = Some(Rc::new(hook));
    }

    /// Requests focus for the attached element.
    ///
    /// Returns `false`, doing nothing, while detached.
    pub fn focus(&self) -> bool {
        if !self.is_attached() {
            return false;
        }
        self.slot
            .focus_requests
            .set(self.slot.focus_requests.get().wrapping_add(1));
        // Clone out so the hook may reinstall itself.
        let hook = self.slot.focus_hook.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
        true
    }

    /// Number of focus requests served while attached.
    #[must_use]
    pub fn focus_requests(&self) -> u32 {
        self.slot.focus_requests.get()
    }

    /// Returns `true` if both refer to the same slot.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl PartialEq for ElementRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("bounds", &self.slot.bounds.get())
            .field("has_focus_hook", &self.slot.focus_hook.borrow().is_some())
            .field("focus_requests", &self.slot.focus_requests.get())
            .finish()
    }
}
