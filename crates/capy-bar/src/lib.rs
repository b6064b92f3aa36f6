//! capy-bar - i3blocks protocol library
//!
//! Shared by every CapyBlocks producer:
//! - `Output` record encoding (one JSON line on stdout)
//! - `Input` decoding from the `BLOCK_*` environment
//! - "More info" desktop notifications

pub mod error;
pub mod input;
pub mod notify;
pub mod output;

pub use error::BarError;
pub use input::{Input, MouseButton, Point};
pub use notify::more_info;
pub use output::{Alignment, Markup, Output, span};
