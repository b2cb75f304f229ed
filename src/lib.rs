//! A stopwatch with laps that survives restarts.
//!
//! [`stopwatch::Stopwatch`] does the time accounting against a monotonic
//! [`clock::Clock`]. [`storage::Persistence`] keeps its durable fields in a
//! key-value [`storage::Store`]. [`widget::Widget`] wires both to a periodic
//! refresh task and a [`widget::Renderer`].

pub mod clock;
pub mod console;
pub mod stopwatch;
pub mod storage;
pub mod ticker;
pub mod widget;
