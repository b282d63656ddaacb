//! Hand-written serde support for diagnostics types.
//!
//! Locations serialize as a flat struct of their coordinates plus the
//! rendered source description; a [`SourceRef`] serializes as its description
//! string. Raw handles are never serialized, so the privacy mode's `UNKNOWN`
//! degradation carries over to serialized diagnostics unchanged.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::location::Location;
use crate::source::SourceRef;

impl Serialize for SourceRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.description())
    }
}

impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("Location", 5)?;
        s.serialize_field("byte_offset", &self.byte_offset())?;
        s.serialize_field("char_offset", &self.char_offset())?;
        s.serialize_field("line", &self.line())?;
        s.serialize_field("column", &self.column())?;
        s.serialize_field("source", &self.source_description())?;
        s.end()
    }
}
