//! Core of schedsync.
//!
//! This crate holds everything that does not talk to a specific provider:
//! - `event` with the canonical `Event` type shared with providers
//! - `export` and `normalize` for turning a schedule export into events
//! - `sync` for reconciling those events against a destination store
//! - `remote` for the CLI-provider communication protocol

pub mod config;
pub mod constants;
pub mod date_range;
pub mod error;
pub mod event;
pub mod export;
pub mod normalize;
pub mod remote;
pub mod source;
pub mod sync;
pub mod zone;

pub use event::{Event, EventTime};
