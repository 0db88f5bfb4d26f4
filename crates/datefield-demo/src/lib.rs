#![forbid(unsafe_code)]

//! Interactive demo of the datefield widget.
//!
//! The binary in `main.rs` wires these pieces to a real terminal; they
//! live in a library so they can be tested without one.

pub mod app;
pub mod cli;
pub mod presenter;
