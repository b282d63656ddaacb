//! A streaming token scanner that knows where it is.
//!
//! `tokscan` reads a small JSON-like token alphabet from strings, byte
//! buffers or arbitrary readers. Its defining feature is the location
//! subsystem: every token and every error carries an immutable [`Location`]
//! (byte offset, char offset, line, column) paired with a [`SourceRef`] that
//! renders a bounded description of the input it came from.
//!
//! Descriptions never exceed [`MAX_CONTENT_SNIPPET`] content units, never
//! read from a live reader, and can be suppressed entirely for privacy via
//! [`ScanConfig::include_source_in_location`] while keeping positions exact.
//!
//! ```rust
//! use tokscan::Scanner;
//!
//! let scanner = Scanner::new();
//! let err = scanner.scan_str("[ foobar ]").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Unrecognized token 'foobar' at [Source: (String)\"[ foobar ]\"; line: 1, column: 3]"
//! );
//! ```

pub mod errors;
pub mod location;
pub mod scanner;
pub mod source;

mod serde_impl;
mod util;

pub use crate::errors::{ScanError, ScanResult};
pub use crate::location::Location;
pub use crate::scanner::{ScanConfig, Scanner, Token, TokenKind, TokenStream};
pub use crate::source::{MAX_CONTENT_SNIPPET, RawSource, SourceRef};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
