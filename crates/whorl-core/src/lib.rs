//! Core state machine for a cursor-anchored radial menu.
//!
//! This crate has no GUI dependencies. It owns the ring geometry, the
//! per-item mount/reveal/collapse lifecycle with its cancellable deferred
//! transitions, and the top-level [`controller::Menu`] that reacts to open
//! requests and outside clicks. A renderer consumes the per-item
//! [`lifecycle::ItemStyle`] triples and feeds hit-test regions back.

pub mod catalog;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod lifecycle;
mod macros;
