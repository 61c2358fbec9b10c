//! HTTP API module.
//!
//! Upload endpoint, download directory and live log stream for the cwrkit
//! backend.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::*;
pub use server::{router, start_server};
pub use types::*;
