// src/lib.rs
//! Testsmells library.

#![deny(missing_docs)]

pub mod cli;
pub mod config;
pub mod correlate;
pub mod csv;
pub mod detector;
pub mod error;
pub mod log;
pub mod report;
pub mod run;
