//! Immutable positional snapshots used in error reporting.

use std::fmt;
use std::fmt::{Display, Formatter};

use crate::source::SourceRef;

/// Where in the input the scanner was when this snapshot was taken.
///
/// A `Location` is plain immutable value data: it has no state transitions
/// after construction, compares field-by-field (including the source
/// reference), and hashes consistently with equality, so it can serve as a
/// map key or be deduplicated in sets.
///
/// # Examples
///
/// ```rust
/// # use tokscan::{Location, SourceRef};
/// let loc = Location::new(Some(SourceRef::from_text("string-source")), 10, 10, 1, 2);
/// assert_eq!(
///     loc.to_string(),
///     "[Source: (String)\"string-source\"; line: 1, column: 2]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    source: Option<SourceRef>,
    byte_offset: u64,
    char_offset: u64,
    line: usize,
    column: usize,
}

impl Location {
    /// Creates a snapshot from externally supplied coordinates.
    ///
    /// `source` is `None` when no source reference could be determined at
    /// all; a present reference with an absent handle (see
    /// [`SourceRef::unknown`]) renders the same way.
    pub const fn new(
        source: Option<SourceRef>,
        byte_offset: u64,
        char_offset: u64,
        line: usize,
        column: usize,
    ) -> Self {
        Location {
            source,
            byte_offset,
            char_offset,
            line,
            column,
        }
    }

    /// Byte offset from the start of the input.
    pub fn byte_offset(&self) -> u64 {
        self.byte_offset
    }

    /// Character offset from the start of the input.
    pub fn char_offset(&self) -> u64 {
        self.char_offset
    }

    /// 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column number within the line.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The source reference in effect when this snapshot was taken.
    pub fn source(&self) -> Option<&SourceRef> {
        self.source.as_ref()
    }

    /// The bounded source description alone, without the line/column wrapper.
    ///
    /// `UNKNOWN` when the reference is absent or carries no handle.
    pub fn source_description(&self) -> String {
        match &self.source {
            Some(source) => source.description(),
            None => "UNKNOWN".to_string(),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(
            f,
            "[Source: {}; line: {}, column: {}]",
            self.source_description(),
            self.line,
            self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_constructed_values() {
        let source = SourceRef::from_text("src");
        let loc = Location::new(Some(source.clone()), 10, 9, 3, 2);
        assert_eq!(loc.byte_offset(), 10);
        assert_eq!(loc.char_offset(), 9);
        assert_eq!(loc.line(), 3);
        assert_eq!(loc.column(), 2);
        assert_eq!(loc.source(), Some(&source));
    }

    #[test]
    fn display_with_absent_source() {
        let loc = Location::new(None, 10, 10, 3, 2);
        assert_eq!(loc.to_string(), "[Source: UNKNOWN; line: 3, column: 2]");
        assert_eq!(loc.source_description(), "UNKNOWN");
    }

    #[test]
    fn display_with_unknown_handle() {
        let loc = Location::new(Some(SourceRef::unknown()), 0, 0, 1, 1);
        assert_eq!(loc.to_string(), "[Source: UNKNOWN; line: 1, column: 1]");
    }
}
