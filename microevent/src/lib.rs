//! Synchronous, per-instance event emitter.
//!
//! An [`EventHub`] keeps, per event name, an ordered list of listeners and
//! invokes them in registration order when the event is emitted. Types gain
//! emitter behavior by owning a hub and implementing [`Emitter`].
//!
//! ```rust
//! use std::{cell::Cell, rc::Rc};
//! use microevent::{EventHub, Listener};
//!
//! let hub = EventHub::<()>::new();
//! let hits = Rc::new(Cell::new(0));
//!
//! let counter = Rc::clone(&hits);
//! hub.once("ready", &Listener::new(move |_: &EventHub<()>, _: &()| {
//!     counter.set(counter.get() + 1);
//! }));
//!
//! hub.emit("ready", &());
//! hub.emit("ready", &());
//! assert_eq!(hits.get(), 1);
//! ```

pub mod emitter;
pub mod hub;
pub mod listener;
pub mod policy;
pub mod sink;

pub use emitter::Emitter;
pub use hub::EventHub;
pub use listener::{Listener, Registration, RegistrationId};
pub use policy::RemovalPolicy;
