//! Terminal chess against a UCI engine.
//!
//! [`session`] runs the human/engine turn cycle on top of the `chess` rules
//! crate and an [`engine::EngineBridge`]; [`config`] holds the runtime tunables.

pub mod config;
pub mod session;

pub use session::{
    run_session, GameOutcome, GameSession, SessionError, SessionSettings, SessionState,
    SessionSummary,
};
