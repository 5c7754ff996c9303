//! `roster` - A small student record manager backed by a JSON file
//!
//! The library holds the record type, the flat-file store and the interactive
//! menu that the `roster` binary drives over standard input and output.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod menu;
pub mod store;
pub mod student;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use menu::{Choice, Menu, Outcome};
pub use store::{Roster, Store};
pub use student::{Age, Student, StudentUpdate, ValidationError};
