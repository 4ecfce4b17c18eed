//! Configuration helpers shared by cache components.
//!
//! Capacities are byte counts. The [`Size`] type and [`parse_size`] accept
//! human-readable values so capacities can come straight from config files
//! or environment variables.
//!
//! # Example
//!
//! ```
//! use lrucache::config::{format_size, Size};
//!
//! let size: Size = "256MB".parse().unwrap();
//! assert_eq!(size.bytes(), 256 * 1024 * 1024);
//! assert_eq!(format_size(size.bytes()), "256MB");
//! ```

mod size;

pub use size::{format_size, parse_size, Size, SizeParseError};
