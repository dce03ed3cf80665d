//! Wheel spinner core: spin resolution, win statistics, persistence and
//! the reveal sequence, with no rendering dependency.

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod items;
pub mod report;
pub mod resolver;
pub mod rng;
pub mod session;
pub mod statistics;
pub mod store;
pub mod types;
