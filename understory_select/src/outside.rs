// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-click detection.
//!
//! [`OutsideClick`] decides whether a pointer event landed outside a root
//! element (and outside an optional ignored element). It does not listen to
//! anything by itself: the embedder forwards its pointer events, typically
//! at the window or document level, and the detector reports qualifying ones.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_select::element::ElementRef;
//! use understory_select::outside::{OutsideClick, PointerEvent, PointerKind};
//!
//! let root = ElementRef::new();
//! root.attach(Rect::new(0.0, 0.0, 100.0, 30.0));
//!
//! let detector = OutsideClick::new(root);
//! let mut closed = false;
//! let fired = detector.handle(
//!     &PointerEvent::new(PointerKind::MouseDown, Point::new(50.0, 200.0)),
//!     |_| closed = true,
//! );
//! assert!(fired && closed);
//! ```

use kurbo::Point;

use crate::element::ElementRef;

/// The kind of a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Mouse button pressed.
    MouseDown,
    /// Mouse button released.
    MouseUp,
    /// Touch contact started.
    TouchStart,
    /// Touch contact ended.
    TouchEnd,
    /// Pointer moved.
    Move,
}

impl PointerKind {
    /// The event-type bit of this kind; empty for kinds that can't be listened for.
    #[must_use]
    pub fn event_type(self) -> EventTypes {
        match self {
            Self::MouseDown => EventTypes::MOUSE_DOWN,
            Self::MouseUp => EventTypes::MOUSE_UP,
            Self::TouchStart => EventTypes::TOUCH_START,
            Self::TouchEnd => EventTypes::TOUCH_END,
            Self::Move => EventTypes::empty(),
        }
    }
}

/// A pointer event in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,
    /// Where it happened.
    pub position: Point,
}

impl PointerEvent {
    /// Creates a pointer event.
    #[must_use]
    pub fn new(kind: PointerKind, position: Point) -> Self {
        Self { kind, position }
    }
}

bitflags::bitflags! {
    /// Pointer event types an [`OutsideClick`] listens for.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventTypes: u8 {
        /// Mouse button pressed.
        const MOUSE_DOWN  = 0b0000_0001;
        /// Touch contact started.
        const TOUCH_START = 0b0000_0010;
        /// Mouse button released.
        const MOUSE_UP    = 0b0000_0100;
        /// Touch contact ended.
        const TOUCH_END   = 0b0000_1000;
    }
}

impl Default for EventTypes {
    fn default() -> Self {
        Self::MOUSE_DOWN | Self::TOUCH_START
    }
}

/// Options for an [`OutsideClick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutsideClickOptions {
    /// When set, nothing is reported.
    pub disabled: bool,
    /// Events inside this element are not "outside" either.
    pub ignore: Option<ElementRef>,
    /// Event types to react to.
    pub event_types: EventTypes,
}

/// Reports pointer events that land outside a root element.
#[derive(Clone, Debug, PartialEq)]
pub struct OutsideClick {
    root: ElementRef,
    options: OutsideClickOptions,
}

impl OutsideClick {
    /// Creates an enabled detector listening for the default event types.
    #[must_use]
    pub fn new(root: ElementRef) -> Self {
        Self {
            root,
            options: OutsideClickOptions::default(),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: OutsideClickOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns `true` if `event` qualifies as an outside click.
    ///
    /// A detached root never reports: there is nothing to be outside of.
    #[must_use]
    pub fn is_outside(&self, event: &PointerEvent) -> bool {
        if self.options.disabled
            || !self
                .options
                .event_types
                .intersects(event.kind.event_type())
            || !self.root.is_attached()
        {
            return false;
        }
        if self.root.contains(event.position) {
            return false;
        }
        !self
            .options
            .ignore
            .as_ref()
            .is_some_and(|ignore| ignore.contains(event.position))
    }

    /// Invokes `on_outside` once if `event` qualifies, returning whether it did.
    pub fn handle(&self, event: &PointerEvent, on_outside: impl FnOnce(&PointerEvent)) -> bool {
        if self.is_outside(event) {
            on_outside(event);
            true
        } else {
            false
        }
    }
}
