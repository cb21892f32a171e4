//! `shacklog` - a simple ADIF contact logger for amateur radio operators
//!
//! This library provides the core functionality for entering QSO (contact)
//! information, validating and normalizing the field values, and appending
//! each contact to a plain-text ADIF log file.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod adif;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod logfile;
pub mod logging;
pub mod qso;
pub mod validate;

pub use config::Config;
pub use error::{Error, Result};
pub use form::Form;
pub use logfile::{LogFile, LogStats};
pub use logging::init_logging;
pub use qso::{AdifField, Qso};
