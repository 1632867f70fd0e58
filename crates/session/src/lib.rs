//! Edit-session and save-orchestration layer for the bancnet
//! pool-configuration engine.
//!
//! Everything here talks to the backend only through the injected
//! [`port::ConfigStore`] trait; the REST transport, auth, and wire
//! format live in the surrounding application. The flow:
//!
//! 1. [`session::EditSession::open`] hydrates a Baseline via the
//!    resolver and the section read endpoints.
//! 2. The UI mutates the WorkingState.
//! 3. [`session::EditSession::changes`] produces a sectioned change
//!    set (pure diff, `bancnet-core`).
//! 4. [`save::commit`] persists only the dirty sections, isolating
//!    per-section failures and advancing the Baseline for the
//!    sections that succeeded.

pub mod error;
pub mod port;
pub mod resolver;
pub mod save;
pub mod session;
