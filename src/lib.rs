//! Gemchat is a full-screen terminal chat client for a Gemini chat relay.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns session state: the message history, persistence,
//!   configuration, and transcript export.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`commands`] implements slash-command parsing used by the chat loop.
//! - [`api`] defines the relay request/response payloads and performs the
//!   single round-trip per user turn.
//! - [`voice`] drives an external speech-to-text command and reports its
//!   result back to the input field.
//!
//! The runtime entrypoint lives in the binary crate (`src/main.rs`), which
//! resolves configuration and dispatches into [`ui::chat_loop`].

pub mod api;
pub mod commands;
pub mod core;
pub mod logging;
pub mod ui;
pub mod utils;
pub mod voice;
