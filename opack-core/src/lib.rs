//! # OPACK Core Library
//!
//! Engine-agnostic decision structures for multi-agent simulations.
//!
//! The host ECS owns entities, relations and scheduling. This crate provides
//! the pieces an agent uses to decide and to remember:
//!
//! - [`InfluenceGraph`] — behaviours vote for or against candidate actions;
//!   the best-scoring candidate wins, ties broken by a caller-supplied RNG.
//! - [`Selection`] — runs the impacts of an agent's behaviours into a fresh
//!   influence graph every decision cycle.
//! - [`RingBuffer`] — fixed-capacity circular history, most recent first.
//! - [`ActionHistory`] — the last N actions an agent performed.
//!
//! All types are single-owner values with no internal synchronization.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod history;
pub mod influence;
pub mod ring_buffer;
pub mod selection;

pub use config::{HistoryConfig, OpackConfig, SelectionConfig};
pub use error::{OpackError, Result};
pub use history::ActionHistory;
pub use influence::{InfluenceGraph, Scope};
pub use ring_buffer::RingBuffer;
pub use selection::{Decision, Impact, Selection};
