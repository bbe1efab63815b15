// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod gui;
pub mod ipn;
pub mod record;
pub mod sync;
pub mod vendors;
