//! CLI subcommand modules.
//!
//! This module contains the implementations for all ronda CLI subcommands.

pub(crate) mod providers;
pub(crate) mod report;
pub(crate) mod run;
