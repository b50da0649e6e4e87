#![deny(rust_2018_idioms)]

//! Command parsing and dispatch.
//!
//! Commands are trees of [`CommandNode`](commands::CommandNode)s registered
//! in a [`CommandRegistry`](commands::CommandRegistry). Arguments can be
//! composed out of several typed components with the builders in
//! [`commands::aggregate`].

pub mod commands;
pub mod config;
pub mod tuple;
