//! Composition trait for types that carry an [`EventHub`].
//!
//! A type becomes an emitter by owning a hub and pointing [`Emitter::events`]
//! at it. The remaining methods delegate to that hub.
//!
//! # Example
//!
//! ```rust
//! use microevent::{Emitter, EventHub, Listener};
//!
//! struct Door {
//!     events: EventHub<bool>,
//! }
//!
//! impl Emitter<bool> for Door {
//!     fn events(&self) -> &EventHub<bool> {
//!         &self.events
//!     }
//! }
//!
//! let door = Door { events: EventHub::new() };
//! door.on("toggled", &Listener::new(|_: &EventHub<bool>, open: &bool| {
//!     assert!(*open);
//! }));
//! door.emit("toggled", &true);
//! ```

use crate::{hub::EventHub, listener::Listener};

/// Event-emitter capability for a type that owns an [`EventHub`].
pub trait Emitter<A: 'static> {
    /// The hub all other methods delegate to.
    fn events(&self) -> &EventHub<A>;

    /// Registers a persistent listener, see [`EventHub::on`].
    fn on(&self, event: &str, listener: &Listener<A>) {
        self.events().on(event, listener);
    }

    /// Registers a single-shot listener, see [`EventHub::once`].
    fn once(&self, event: &str, listener: &Listener<A>) {
        self.events().once(event, listener);
    }

    /// Removes a listener by identity, see [`EventHub::off`].
    fn off(&self, event: &str, listener: &Listener<A>) -> usize {
        self.events().off(event, listener)
    }

    /// Dispatches `args` to the listeners of `event`, see [`EventHub::emit`].
    fn emit(&self, event: &str, args: &A) -> usize {
        self.events().emit(event, args)
    }
}

impl<A: 'static> Emitter<A> for EventHub<A> {
    fn events(&self) -> &EventHub<A> {
        self
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    struct Thermostat {
        events: EventHub<f32>,
        target: f32,
    }

    impl Thermostat {
        fn set_target(&mut self, target: f32) {
            self.target = target;
            self.emit("target", &target);
        }
    }

    impl Emitter<f32> for Thermostat {
        fn events(&self) -> &EventHub<f32> {
            &self.events
        }
    }

    fn thermostat() -> Thermostat {
        Thermostat {
            events: EventHub::new(),
            target: 20.0,
        }
    }

    fn collector(seen: &Rc<RefCell<Vec<f32>>>) -> Listener<f32> {
        let seen = Rc::clone(seen);
        Listener::new(move |_: &EventHub<f32>, value: &f32| seen.borrow_mut().push(*value))
    }

    #[test]
    fn owner_emits_through_its_hub() {
        let mut thermostat = thermostat();
        let seen = Rc::new(RefCell::new(Vec::new()));

        thermostat.on("target", &collector(&seen));
        thermostat.set_target(21.5);

        assert_eq!(thermostat.target, 21.5);
        assert_eq!(*seen.borrow(), vec![21.5]);
        assert_eq!(thermostat.events().listener_count("target"), 1);
    }

    #[test]
    fn owner_once_and_off_delegate() {
        let mut thermostat = thermostat();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let persistent = collector(&seen);

        thermostat.once("target", &collector(&seen));
        thermostat.on("target", &persistent);
        thermostat.set_target(18.0);

        assert_eq!(thermostat.off("target", &persistent), 1);
        thermostat.set_target(19.0);

        assert_eq!(*seen.borrow(), vec![18.0, 18.0]);
    }

    #[test]
    fn owners_have_separate_hubs() {
        let mut first = thermostat();
        let mut second = thermostat();
        let seen = Rc::new(RefCell::new(Vec::new()));

        first.on("target", &collector(&seen));
        second.set_target(25.0);
        first.set_target(22.0);

        assert_eq!(*seen.borrow(), vec![22.0]);
    }

    #[test]
    fn hub_is_its_own_emitter() {
        fn fire<E: Emitter<f32>>(emitter: &E) -> usize {
            emitter.emit("target", &1.0)
        }

        let hub = EventHub::<f32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        Emitter::on(&hub, "target", &collector(&seen));

        assert_eq!(fire(&hub), 1);
        assert_eq!(*seen.borrow(), vec![1.0]);
    }
}
