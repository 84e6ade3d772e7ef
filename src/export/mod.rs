//! Output table export.
//!
//! This module owns the persisted row type and the fixed CSV schema the
//! lookup tables are written in.

mod csv;

pub use csv::{write_table, OutputRow};
