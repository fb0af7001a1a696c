//! Terminal UI for roomchat
//!
//! A thin shell over [`roomchat_client::ChatController`] that provides
//! terminal-specific I/O. Chat semantics live in the client crate; this crate
//! only handles input, screens, and rendering.
//!
//! # Components
//!
//! - [`App`]: pure UI state machine wrapping the controller
//! - [`input`]: key abstraction and line editing
//! - [`ui`]: ratatui rendering
//! - [`runtime::Runtime`]: terminal setup and the tokio event loop

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod app;
pub mod input;
pub mod runtime;
pub mod ui;

pub use app::{App, AppAction, AppEvent};
pub use input::{KeyInput, LineEditor};
pub use runtime::{Runtime, RuntimeError};
