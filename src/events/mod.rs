//! # Events Module
//!
//! Channel-based progress reporting.
//!
//! The core library emits events through a channel; any front end (CLI today,
//! something richer tomorrow) subscribes on its own thread and renders
//! progress however it likes. The core components themselves never print.

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
