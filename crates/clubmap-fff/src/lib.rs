//! Client for the football federation's public "dofa" REST API.
//!
//! Exposes the three reads the club overlay needs (club by id, pools of a
//! championship, engagements of a pool) both as fallible `try_*` methods and
//! through [`clubmap_core::ClubSource`], whose methods log and fall back to
//! `None` or an empty list instead of failing.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::FffClient;
pub use error::FffError;
