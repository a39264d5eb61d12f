//! Process lifecycle.
//!
//! # Data Flow
//! ```text
//! startup.rs:
//!     source document → MockSession (routes generated) → docs saved → Bootstrap
//!
//! signals.rs:
//!     Ctrl+C / SIGTERM → Shutdown::trigger
//!
//! shutdown.rs:
//!     trigger → listener closed → in-flight requests drained → reload task stopped
//! ```
//!
//! # Design Decisions
//! - An unreadable source document aborts startup; a docs store failure does not
//! - The listener is bound only after the session is ready

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{stopped, Shutdown};
pub use startup::{bootstrap, Bootstrap, StartupError};
