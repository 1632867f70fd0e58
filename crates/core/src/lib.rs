//! Pure domain logic for the bancnet pool-configuration engine.
//!
//! This crate has **zero I/O dependencies**. Field key codec, catalog,
//! override cascade math, value canonicalization, edit snapshots, and
//! the change-set diff all operate on in-memory data that the session
//! layer (`bancnet-session`) hydrates and persists.

pub mod canonical;
pub mod cascade;
pub mod catalog;
pub mod changeset;
pub mod diff;
pub mod error;
pub mod field_key;
pub mod snapshot;
pub mod types;
