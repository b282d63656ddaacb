//! Bounded, rendering-safe references to the input being scanned.
//!
//! A [`SourceRef`] is captured once when a scanner is attached to input and is
//! shared, read-only, by every [`Location`](crate::location::Location)
//! snapshot taken while reading that input. Its only job is to produce a
//! bounded textual description of where the data came from; it never reads
//! from or advances a live reader.

use std::any;
use std::sync::Arc;

/// Maximum number of content units (chars or bytes) shown when rendering a
/// content-bearing source. Content beyond this is summarized as
/// `[truncated K chars]` or `[truncated K bytes]`.
pub const MAX_CONTENT_SNIPPET: usize = 500;

/// The raw input handle wrapped by a [`SourceRef`].
///
/// This is a closed set: every kind of input the scanner can be attached to
/// has a variant carrying exactly the data its description needs. Handle
/// kinds that cannot be safely re-read (readers, arbitrary values) carry only
/// a type name captured at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawSource {
    /// No source available. Also used when source inclusion is disabled.
    Unknown,
    /// An in-memory text buffer.
    Text(Arc<str>),
    /// An in-memory character array.
    Chars(Arc<[char]>),
    /// An in-memory byte buffer.
    Bytes(Arc<[u8]>),
    /// A live reader. Only its type name is retained; the reader itself must
    /// never be touched when rendering a description.
    Stream {
        /// Fully-qualified type name of the reader, as captured at construction.
        type_name: &'static str,
    },
    /// Only the *kind* of source is known, not an instance. Produced by
    /// factories that decide the input type before any data exists.
    TypeMarker {
        /// Fully-qualified name of the marker type.
        type_name: &'static str,
    },
    /// Any other value. Rendered by its fully-qualified type name.
    Opaque {
        /// Fully-qualified type name of the wrapped value.
        type_name: &'static str,
    },
}

/// Immutable reference to the input a scanner was attached to.
///
/// Equality and hashing follow the wrapped handle: content-bearing kinds
/// compare by content, handle kinds by their captured type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRef {
    raw: RawSource,
    content_length: Option<usize>,
}

impl SourceRef {
    /// A reference with no source attached. Its description is `UNKNOWN`.
    pub fn unknown() -> Self {
        SourceRef {
            raw: RawSource::Unknown,
            content_length: None,
        }
    }

    /// Wraps an in-memory text buffer.
    pub fn from_text(text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        SourceRef {
            raw: RawSource::Text(text),
            content_length: Some(len),
        }
    }

    /// Wraps an in-memory character array.
    pub fn from_chars(chars: impl Into<Arc<[char]>>) -> Self {
        let chars = chars.into();
        let len = chars.len();
        SourceRef {
            raw: RawSource::Chars(chars),
            content_length: Some(len),
        }
    }

    /// Wraps an in-memory byte buffer.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        let len = bytes.len();
        SourceRef {
            raw: RawSource::Bytes(bytes),
            content_length: Some(len),
        }
    }

    /// References a live reader by type only. The reader is not retained.
    pub fn from_stream<T: ?Sized>(_stream: &T) -> Self {
        SourceRef {
            raw: RawSource::Stream {
                type_name: any::type_name::<T>(),
            },
            content_length: None,
        }
    }

    /// References a source by its expected type, without an instance.
    pub fn for_type<T: ?Sized>() -> Self {
        SourceRef {
            raw: RawSource::TypeMarker {
                type_name: any::type_name::<T>(),
            },
            content_length: None,
        }
    }

    /// Wraps any other value by capturing its type name.
    pub fn from_opaque<T: ?Sized>(_value: &T) -> Self {
        SourceRef {
            raw: RawSource::Opaque {
                type_name: any::type_name::<T>(),
            },
            content_length: None,
        }
    }

    /// The wrapped handle.
    pub fn raw(&self) -> &RawSource {
        &self.raw
    }

    /// Total content length in the natural unit of the handle (chars for
    /// text/char sources, bytes for byte sources), if known. `None` for
    /// readers, markers and opaque values.
    pub fn content_length(&self) -> Option<usize> {
        self.content_length
    }

    /// True when no source is attached.
    pub fn is_unknown(&self) -> bool {
        matches!(self.raw, RawSource::Unknown)
    }

    /// Renders a bounded description of the source.
    ///
    /// Content-bearing kinds show at most [`MAX_CONTENT_SNIPPET`] units of
    /// content; readers and opaque values show a type name only. Never fails
    /// and never touches a live reader.
    pub fn description(&self) -> String {
        match &self.raw {
            RawSource::Unknown => "UNKNOWN".to_string(),
            RawSource::Text(text) => {
                // content_length holds the char count captured at construction
                let total = self
                    .content_length
                    .unwrap_or_else(|| text.chars().count());
                content_description("String", text.chars(), total, "chars")
            }
            RawSource::Chars(chars) => {
                content_description("char[]", chars.iter().copied(), chars.len(), "chars")
            }
            RawSource::Bytes(bytes) => {
                // Display decode only: bytes pass through as Latin-1 chars.
                content_description("byte[]", bytes.iter().map(|&b| b as char), bytes.len(), "bytes")
            }
            RawSource::Stream { type_name } | RawSource::TypeMarker { type_name } => {
                format!("({})", simple_type_name(type_name))
            }
            RawSource::Opaque { type_name } => format!("({})", type_name),
        }
    }
}

fn content_description(
    tag: &str,
    content: impl Iterator<Item = char>,
    total: usize,
    unit: &str,
) -> String {
    let mut out = String::with_capacity(tag.len() + total.min(MAX_CONTENT_SNIPPET) + 8);
    out.push('(');
    out.push_str(tag);
    out.push_str(")\"");
    for ch in content.take(MAX_CONTENT_SNIPPET) {
        out.push(ch);
    }
    out.push('"');
    if total > MAX_CONTENT_SNIPPET {
        out.push_str(&format!("[truncated {} {}]", total - MAX_CONTENT_SNIPPET, unit));
    }
    out
}

/// Strips module paths from a fully-qualified type name, including inside
/// generic arguments: `std::io::Cursor<alloc::vec::Vec<u8>>` becomes
/// `Cursor<Vec<u8>>`.
fn simple_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut path = String::new();
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            path.push(ch);
        } else {
            flush_path(&mut out, &mut path);
            out.push(ch);
        }
    }
    flush_path(&mut out, &mut path);
    out
}

fn flush_path(out: &mut String, path: &mut String) {
    if !path.is_empty() {
        out.push_str(path.rsplit("::").next().unwrap_or(path));
        path.clear();
    }
}
