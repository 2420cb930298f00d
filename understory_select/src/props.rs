// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prop bags and the prop-getter merge protocol.
//!
//! A select describes each element it cares about as a [`Props`] bag:
//! attributes plus event [`Handler`]s. Callers pass their own overrides as a
//! [`PropGetter`], and [`merge_props`] combines the two:
//!
//! - a bag is merged key by key: when both sides carry a handler for the same
//!   key, the handlers are chained (internal first, then the caller's); any
//!   other collision resolves to the caller's value;
//! - a list is folded left to right, each entry merged onto the result so far;
//! - a function receives the internal bag and its result replaces it. Keys
//!   the function does not return are dropped.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_select::props::{Event, Handler, Props, merge_props, ON_CLICK};
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let (a, b) = (Rc::clone(&log), Rc::clone(&log));
//!
//! let internal = Props::new()
//!     .with(ON_CLICK, Handler::new(move |_| a.borrow_mut().push("internal")))
//!     .with("role", "listbox");
//! let user = Props::new()
//!     .with(ON_CLICK, Handler::new(move |_| b.borrow_mut().push("user")))
//!     .with("role", "menu");
//!
//! let merged = merge_props(internal, user);
//! assert!(merged.call(ON_CLICK, &Event::Click));
//! assert_eq!(*log.borrow(), ["internal", "user"]);
//! assert_eq!(merged.text("role"), Some("menu"));
//! ```

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

use crate::element::ElementRef;
use crate::outside::PointerEvent;

/// Element identity key, for list reconciliation in the caller's renderer.
pub const KEY: &str = "key";
/// Element slot the caller must attach.
pub const REF: &str = "ref";
/// Current value of an input.
pub const VALUE: &str = "value";
/// Click handler.
pub const ON_CLICK: &str = "onClick";
/// Input change handler.
pub const ON_CHANGE: &str = "onChange";

/// Name of a prop.
pub type PropKey = Cow<'static, str>;

/// An event delivered to a [`Handler`].
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The element was clicked or activated.
    Click,
    /// The text of an input changed to the given value.
    Input(String),
    /// A raw pointer event.
    Pointer(PointerEvent),
}

/// A shareable event handler.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(&Event)>);

impl Handler {
    /// Wraps a closure.
    pub fn new(f: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invokes the handler.
    pub fn call(&self, event: &Event) {
        (self.0)(event);
    }

    /// A handler that runs `first` and then `second` with the same event.
    #[must_use]
    pub fn chain(first: Self, second: Self) -> Self {
        Self::new(move |event| {
            first.call(event);
            second.call(event);
        })
    }

    /// Returns `true` if both wrap the same closure.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

/// The value of a prop.
#[derive(Clone, Debug)]
pub enum PropValue {
    /// A boolean attribute.
    Bool(bool),
    /// An integer attribute.
    Int(i64),
    /// A text attribute.
    Text(String),
    /// An event handler.
    Handler(Handler),
    /// An element slot.
    Ref(ElementRef),
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Handler(a), Self::Handler(b)) => a.ptr_eq(b),
            (Self::Ref(a), Self::Ref(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Handler> for PropValue {
    fn from(value: Handler) -> Self {
        Self::Handler(value)
    }
}

impl From<ElementRef> for PropValue {
    fn from(value: ElementRef) -> Self {
        Self::Ref(value)
    }
}

/// An insertion-ordered bag of props.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    entries: SmallVec<[(PropKey, PropValue); 4]>,
}

impl Props {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Props::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<PropKey>, value: impl Into<PropValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets `key`, keeping its position if present. Returns the old value.
    pub fn set(&mut self, key: impl Into<PropKey>, value: impl Into<PropValue>) -> Option<PropValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(core::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Removes `key`.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Looks up `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries
            .iter()
            .find_map(|(k, value)| (k == key).then_some(value))
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The handler under `key`, if that prop is a handler.
    #[must_use]
    pub fn handler(&self, key: &str) -> Option<&Handler> {
        match self.get(key)? {
            PropValue::Handler(handler) => Some(handler),
            _ => None,
        }
    }

    /// The text under `key`, if that prop is text.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            PropValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The element slot under `key`, if that prop is a ref.
    #[must_use]
    pub fn element_ref(&self, key: &str) -> Option<&ElementRef> {
        match self.get(key)? {
            PropValue::Ref(el) => Some(el),
            _ => None,
        }
    }

    /// Invokes the handler under `key`, returning whether there was one.
    pub fn call(&self, key: &str, event: &Event) -> bool {
        // Clone out so the handler may freely drop or rebuild this bag.
        match self.handler(key).cloned() {
            Some(handler) => {
                handler.call(event);
                true
            }
            None => false,
        }
    }

    /// Number of props.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no props.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates props in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Merges `user` over `self`.
    ///
    /// Handlers present on both sides are chained, `self`'s first. Any other
    /// collision takes `user`'s value. New keys keep `user`'s order after
    /// the existing ones.
    #[must_use]
    pub fn merge(mut self, user: Self) -> Self {
        for (key, value) in user.entries {
            match self.entries.iter_mut().find(|(k, _)| *k == key) {
                Some((_, slot)) => {
                    let chained = match (&*slot, &value) {
                        (PropValue::Handler(internal), PropValue::Handler(user)) => {
                            Some(Handler::chain(internal.clone(), user.clone()))
                        }
                        _ => None,
                    };
                    *slot = chained.map_or(value, PropValue::Handler);
                }
                None => self.entries.push((key, value)),
            }
        }
        self
    }
}

/// Caller overrides for a prop getter.
pub enum PropGetter {
    /// A bag merged onto the internal props.
    Props(Props),
    /// Overrides applied left to right.
    List(Vec<PropGetter>),
    /// Computes the final props from the internal ones.
    Fn(Box<dyn FnOnce(&Props) -> Props>),
}

impl PropGetter {
    /// Wraps a function override.
    pub fn from_fn(f: impl FnOnce(&Props) -> Props + 'static) -> Self {
        Self::Fn(Box::new(f))
    }
}

impl Default for PropGetter {
    fn default() -> Self {
        Self::Props(Props::new())
    }
}

impl fmt::Debug for PropGetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Props(props) => f.debug_tuple("Props").field(props).finish(),
            Self::List(list) => f.debug_tuple("List").field(list).finish(),
            Self::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

impl From<Props> for PropGetter {
    fn from(props: Props) -> Self {
        Self::Props(props)
    }
}

impl From<Vec<Props>> for PropGetter {
    fn from(list: Vec<Props>) -> Self {
        Self::List(list.into_iter().map(Self::Props).collect())
    }
}

impl<const N: usize> From<[Props; N]> for PropGetter {
    fn from(list: [Props; N]) -> Self {
        Self::List(list.into_iter().map(Self::Props).collect())
    }
}

impl From<Vec<Self>> for PropGetter {
    fn from(list: Vec<Self>) -> Self {
        Self::List(list)
    }
}

/// Merges caller overrides onto internal props.
#[must_use]
pub fn merge_props(internal: Props, overrides: impl Into<PropGetter>) -> Props {
    match overrides.into() {
        PropGetter::Props(user) => internal.merge(user),
        PropGetter::List(list) => list.into_iter().fold(internal, merge_props),
        PropGetter::Fn(f) => {
            let user = f(&internal);
            merge_props(Props::new(), user)
        }
    }
}
