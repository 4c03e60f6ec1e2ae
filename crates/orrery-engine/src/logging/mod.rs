//! Logger setup.
//!
//! Library code only talks to the `log` facade; the binary picks the backend
//! here, early in `main`.

mod init;

pub use init::{init_logging, LoggingConfig};
