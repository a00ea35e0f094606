//! Benchmark fixtures for microevent.
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p microevent_bench
//!
//! # Run one group
//! cargo bench -p microevent_bench -- emit
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports.

use std::{cell::Cell, rc::Rc};

use microevent::{EventHub, Listener};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Event name used by every fixture.
pub const EVENT: &str = "bench";

/// `count` distinct listeners that each add their payload to a shared total.
pub fn summing_listeners(count: usize) -> (Vec<Listener<u64>>, Rc<Cell<u64>>) {
    let total = Rc::new(Cell::new(0u64));
    let listeners = (0..count)
        .map(|_| {
            let total = Rc::clone(&total);
            Listener::new(move |_: &EventHub<u64>, value: &u64| {
                total.set(total.get().wrapping_add(*value))
            })
        })
        .collect();
    (listeners, total)
}

/// A hub with every listener registered on [`EVENT`].
pub fn populated_hub(listeners: &[Listener<u64>]) -> EventHub<u64> {
    let hub = EventHub::new();
    for listener in listeners {
        hub.on(EVENT, listener);
    }
    hub
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChurnOp {
    On(usize),
    Once(usize),
    Off(usize),
    Emit,
}

/// Deterministic mix of registrations, removals and emits over `pool`
/// listener slots.
pub fn churn_plan(seed: u64, pool: usize, ops: usize) -> Vec<ChurnOp> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..ops)
        .map(|_| match rng.gen_range(0..10) {
            0..=3 => ChurnOp::On(rng.gen_range(0..pool)),
            4 => ChurnOp::Once(rng.gen_range(0..pool)),
            5..=7 => ChurnOp::Off(rng.gen_range(0..pool)),
            _ => ChurnOp::Emit,
        })
        .collect()
}

/// Applies `plan` to `hub`, returning the number of listener invocations.
pub fn run_churn(hub: &EventHub<u64>, listeners: &[Listener<u64>], plan: &[ChurnOp]) -> usize {
    let mut invoked = 0;
    for op in plan {
        match *op {
            ChurnOp::On(slot) => hub.on(EVENT, &listeners[slot]),
            ChurnOp::Once(slot) => hub.once(EVENT, &listeners[slot]),
            ChurnOp::Off(slot) => {
                hub.off(EVENT, &listeners[slot]);
            }
            ChurnOp::Emit => invoked += hub.emit(EVENT, &1),
        }
    }
    invoked
}
