//! Listener handles and the registrations a hub stores for them.
//!
//! A [`Listener`] wraps a callback in a reference-counted allocation. The
//! allocation is the listener's identity: clones of a handle compare equal,
//! while two handles built from separate [`Listener::new`] calls never do,
//! even when their closures are textually identical.
//!
//! # Example
//!
//! ```rust
//! use microevent::{EventHub, Listener};
//!
//! let hub = EventHub::<u32>::new();
//! let listener = Listener::new(|_hub: &EventHub<u32>, value: &u32| {
//!     assert_eq!(*value, 7);
//! });
//!
//! hub.on("tick", &listener);
//! hub.emit("tick", &7);
//! hub.off("tick", &listener);
//! ```

use std::{fmt, rc::Rc};

use crate::hub::EventHub;

/// Callback signature shared by every listener.
///
/// The hub passes itself as the receiving context, followed by the argument
/// payload given to [`EventHub::emit`].
pub type Callback<A> = dyn Fn(&EventHub<A>, &A);

/// Shared handle to a listener callback.
///
/// Equality is identity: `a == b` only when both handles point at the same
/// callback allocation.
pub struct Listener<A: 'static> {
    callback: Rc<Callback<A>>,
}

impl<A: 'static> Listener<A> {
    /// Wraps `callback` in a new handle with a fresh identity.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&EventHub<A>, &A) + 'static,
    {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Returns `true` if both handles refer to the same callback allocation.
    #[inline]
    pub fn same(&self, other: &Listener<A>) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }

    /// Invokes the callback. Panics raised by the callback are not caught.
    #[inline]
    pub(crate) fn call(&self, hub: &EventHub<A>, args: &A) {
        (self.callback)(hub, args)
    }
}

impl<A: 'static> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<A: 'static> PartialEq for Listener<A> {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<A: 'static> Eq for Listener<A> {}

impl<A: 'static> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("ptr", &Rc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

/// Identifier of one registration, unique within its hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationId(u64);

impl RegistrationId {
    #[inline]
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value, mostly useful for logging.
    #[inline]
    pub const fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One subscription: a listener plus its firing mode.
pub struct Registration<A: 'static> {
    id: RegistrationId,
    listener: Listener<A>,
    once: bool,
}

impl<A: 'static> Registration<A> {
    pub(crate) fn new(id: RegistrationId, listener: Listener<A>, once: bool) -> Self {
        Self { id, listener, once }
    }

    /// Hub-unique id of this registration.
    #[inline]
    pub fn id(&self) -> RegistrationId {
        self.id
    }

    /// The registered listener handle.
    #[inline]
    pub fn listener(&self) -> &Listener<A> {
        &self.listener
    }

    /// `true` if the registration removes itself when first invoked.
    #[inline]
    pub fn is_once(&self) -> bool {
        self.once
    }
}

impl<A: 'static> Clone for Registration<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            listener: self.listener.clone(),
            once: self.once,
        }
    }
}

impl<A: 'static> fmt::Debug for Registration<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("listener", &self.listener)
            .field("once", &self.once)
            .finish()
    }
}
