//! The listener registry and synchronous dispatcher.
//!
//! This module provides [`EventHub`], which maps event names to ordered
//! sequences of [`Registration`]s and dispatches events to them.
//!
//! # Overview
//!
//! - **Registration**: [`on()`](EventHub::on) adds a persistent listener,
//!   [`once()`](EventHub::once) adds one that removes itself when first invoked
//! - **Removal**: [`off()`](EventHub::off) removes by listener identity, following
//!   the hub's [`RemovalPolicy`]
//! - **Dispatch**: [`emit()`](EventHub::emit) calls listeners in registration order
//!   and returns once every one of them has returned
//!
//! # Re-entrancy
//!
//! Every operation takes `&self`, and listeners receive the hub as their first
//! argument, so a listener may register, remove or emit while it is being
//! dispatched. No internal borrow is held while a listener runs.
//!
//! `emit()` captures the number of registrations when it starts and walks a
//! live cursor over the sequence for at most that many steps:
//!
//! - listeners appended during the call fall outside the captured range and
//!   are not invoked by it
//! - `off()` during the call shifts the remaining entries under the cursor,
//!   so the entry that moved into the current slot is skipped
//! - the cursor stops early if it runs past the end of a shrunken sequence
//!
//! # Example
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//! use microevent::{EventHub, Listener};
//!
//! let hub = EventHub::<(i32, &'static str)>::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let sink = Rc::clone(&seen);
//! let listener = Listener::new(move |_: &EventHub<(i32, &'static str)>, args: &(i32, &'static str)| {
//!     sink.borrow_mut().push(*args);
//! });
//!
//! hub.on("update", &listener);
//! hub.emit("update", &(1, "a"));
//! hub.off("update", &listener);
//! hub.emit("update", &(2, "b"));
//!
//! assert_eq!(*seen.borrow(), vec![(1, "a")]);
//! ```

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    fmt,
};

use crate::{
    listener::{Listener, Registration, RegistrationId},
    policy::RemovalPolicy,
};

/// Per-instance registry of listeners keyed by event name.
///
/// `A` is the argument payload every listener of this hub receives. A tuple
/// models a variable argument list. `A` must be `'static`: use owned values
/// (`String`, `Vec<T>`, `Rc<T>`) or `'static` borrows, not references into
/// locals of the emitting scope.
///
/// # Thread Safety
///
/// `EventHub` is neither `Send` nor `Sync`. Callers that share one across
/// threads must wrap and synchronize it themselves.
pub struct EventHub<A: 'static> {
    /// Registrations per event name, in delivery order. Never holds an empty
    /// sequence.
    events: RefCell<HashMap<String, Vec<Registration<A>>>>,

    /// Next registration id.
    next_id: Cell<u64>,

    policy: RemovalPolicy,
}

impl<A: 'static> EventHub<A> {
    /// Creates an empty hub that removes the first match on [`off()`](Self::off).
    pub fn new() -> Self {
        Self::with_policy(RemovalPolicy::default())
    }

    /// Creates an empty hub using the given removal policy.
    ///
    /// # Example
    ///
    /// ```rust
    /// use microevent::{EventHub, RemovalPolicy};
    ///
    /// let hub = EventHub::<()>::with_policy(RemovalPolicy::AllMatches);
    /// assert_eq!(hub.policy(), RemovalPolicy::AllMatches);
    /// ```
    pub fn with_policy(policy: RemovalPolicy) -> Self {
        Self {
            events: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
            policy,
        }
    }

    #[inline]
    pub fn policy(&self) -> RemovalPolicy {
        self.policy
    }

    /// Registers `listener` for every future emission of `event`.
    ///
    /// Registering the same listener twice creates two independent
    /// registrations. Both fire, and both have to be removed.
    pub fn on(&self, event: &str, listener: &Listener<A>) {
        self.register(event, listener, false);
    }

    /// Registers `listener` for the next emission of `event` only.
    ///
    /// The registration is removed right before the listener is invoked, not
    /// after it returns, so it cannot fire twice even if the listener emits
    /// `event` again, and a panicking listener is already unregistered when
    /// the panic reaches the caller. Calling [`off()`](Self::off) with the
    /// same listener from inside the callback therefore removes some other
    /// registration of it, if one exists.
    pub fn once(&self, event: &str, listener: &Listener<A>) {
        self.register(event, listener, true);
    }

    /// Removes registrations of `event` whose listener is `listener`.
    ///
    /// Matching is by identity, see [`Listener::same()`]. With
    /// [`RemovalPolicy::FirstMatch`] only the earliest match goes, with
    /// [`RemovalPolicy::AllMatches`] every match goes.
    ///
    /// Unknown events and listeners are ignored. Returns the number of
    /// registrations removed.
    pub fn off(&self, event: &str, listener: &Listener<A>) -> usize {
        let mut events = self.events.borrow_mut();
        let Some(registrations) = events.get_mut(event) else {
            log::debug!("off '{event}': no listeners registered");
            return 0;
        };

        let removed = match self.policy {
            RemovalPolicy::FirstMatch => {
                match registrations
                    .iter()
                    .position(|registration| registration.listener().same(listener))
                {
                    Some(index) => {
                        registrations.remove(index);
                        1
                    }
                    None => 0,
                }
            }
            RemovalPolicy::AllMatches => {
                let before = registrations.len();
                registrations.retain(|registration| !registration.listener().same(listener));
                before - registrations.len()
            }
        };

        if registrations.is_empty() {
            events.remove(event);
        }

        if removed == 0 {
            log::debug!("off '{event}': listener not registered");
        } else {
            log::trace!("off '{event}': removed {removed} registration(s)");
        }
        removed
    }

    /// Removes every registration of `event`. Returns how many were removed.
    pub fn off_all(&self, event: &str) -> usize {
        let removed = self
            .events
            .borrow_mut()
            .remove(event)
            .map_or(0, |registrations| registrations.len());
        log::trace!("off_all '{event}': removed {removed} registration(s)");
        removed
    }

    /// Removes every registration of every event.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
        log::trace!("cleared all registrations");
    }

    /// Invokes the listeners of `event` with `args`, in registration order.
    ///
    /// Returns after every listener has returned, with the number of
    /// listeners invoked. Emitting an event nobody listens to does nothing.
    ///
    /// A panicking listener is not caught: the panic propagates to the caller
    /// and the remaining listeners are not invoked. The hub stays usable.
    pub fn emit(&self, event: &str, args: &A) -> usize {
        let captured = self.listener_count(event);
        if captured == 0 {
            log::debug!("emit '{event}': no listeners registered");
            return 0;
        }
        log::trace!("emit '{event}' to {captured} listener(s)");

        let mut cursor = 0;
        let mut invoked = 0;
        for _ in 0..captured {
            let Some(registration) = self.claim(event, cursor) else {
                log::trace!("emit '{event}': stopped at slot {cursor}, sequence shrank");
                break;
            };

            // A claimed once-registration has already left its slot, and its
            // successor now occupies the cursor.
            if !registration.is_once() {
                cursor += 1;
            }

            registration.listener().call(self, args);
            invoked += 1;
        }
        invoked
    }

    /// Returns the registration at `slot`, removing it first when it is a
    /// once-registration.
    fn claim(&self, event: &str, slot: usize) -> Option<Registration<A>> {
        let mut events = self.events.borrow_mut();
        let registrations = events.get_mut(event)?;
        let registration = registrations.get(slot)?.clone();

        if registration.is_once() {
            registrations.remove(slot);
            if registrations.is_empty() {
                events.remove(event);
            }
            log::trace!("emit '{event}': retired once-registration {}", registration.id());
        }
        Some(registration)
    }

    fn register(&self, event: &str, listener: &Listener<A>, once: bool) {
        let id = RegistrationId::new(self.next_id.get());
        self.next_id.set(id.index() + 1);

        self.events
            .borrow_mut()
            .entry(event.to_owned())
            .or_default()
            .push(Registration::new(id, listener.clone(), once));
        log::trace!("on '{event}': registered {id} (once: {once})");
    }

    /// Number of live registrations for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.events.borrow().get(event).map_or(0, Vec::len)
    }

    #[inline]
    pub fn has_listeners(&self, event: &str) -> bool {
        self.listener_count(event) > 0
    }

    /// Names of the events that currently have listeners, sorted.
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.events.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Snapshot of the registrations for `event`, in delivery order.
    pub fn registrations(&self, event: &str) -> Vec<Registration<A>> {
        self.events
            .borrow()
            .get(event)
            .map(|registrations| registrations.to_vec())
            .unwrap_or_default()
    }
}

impl<A: 'static> Default for EventHub<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: 'static> fmt::Debug for EventHub<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let events = self.events.borrow();
        let mut counts: Vec<(&str, usize)> = events
            .iter()
            .map(|(name, registrations)| (name.as_str(), registrations.len()))
            .collect();
        counts.sort();

        f.debug_struct("EventHub")
            .field("policy", &self.policy)
            .field("events", &counts)
            .finish()
    }
}
