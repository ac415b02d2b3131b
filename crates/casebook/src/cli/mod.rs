//! CLI module for the Casebook console
//!
//! One module per command group. Every command except `login` requires a
//! saved profile; the list commands and `browse` run through the same
//! controller the interactive view uses.

pub mod auth;
pub mod browse;
pub mod cases;
pub mod context;
pub mod evidence;
pub mod output;
pub mod reports;
pub mod statements;
