//! Splits input into tokens while tracking precise source locations.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::sync::Arc;

use crate::errors::{ScanError, ScanResult};
use crate::location::Location;
use crate::source::SourceRef;
use crate::util::LocationTracker;

mod token_grammar;

use self::token_grammar::RawToken;
use self::token_grammar::grammar;

/// Configuration checked once when a scanner attaches to input.
#[derive(Debug, Clone, Copy)]
pub struct ScanConfig {
    /// Include the raw input content in locations (on by default).
    ///
    /// When disabled, every source reference the scanner captures carries an
    /// absent handle, so descriptions render as `UNKNOWN` while line, column
    /// and offsets stay fully populated. The loss of content is intentional
    /// and silent.
    pub include_source_in_location: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            include_source_in_location: true,
        }
    }
}

/// The kind of a scanned token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `[`
    StartArray,
    /// `]`
    EndArray,
    /// `{`
    StartObject,
    /// `}`
    EndObject,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// A double-quoted string, unescaped.
    String(String),
    /// A numeric literal.
    Number(f64),
    /// `true` or `false`.
    Bool(bool),
    /// `null`
    Null,
}

/// A scanned token together with where it started.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was scanned.
    pub kind: TokenKind,
    /// Position of the token's first character.
    pub location: Location,
}

/// Reads tokens from in-memory text/bytes or anything providing `Read`.
///
/// Every token and every error carries a [`Location`] whose source
/// description is bounded and, when
/// [`ScanConfig::include_source_in_location`] is off, reduced to `UNKNOWN`.
///
/// # Examples
///
/// The most common case is to scan a complete in-memory input:
///
/// ```rust
/// use tokscan::Scanner;
///
/// let scanner = Scanner::new();
/// let tokens = scanner.scan_str("[ 1, 2, 3 ]").unwrap();
/// assert_eq!(tokens.len(), 7);
/// assert_eq!(tokens[0].location.line(), 1);
/// assert_eq!(tokens[0].location.column(), 1);
/// ```
///
/// If you need finer control, attach a stream and pull tokens one at a time:
///
/// ```rust
/// use tokscan::{Scanner, TokenKind};
///
/// let scanner = Scanner::new();
/// let mut stream = scanner.stream_str("{ \"a\": true }");
/// let first = stream.next_token().unwrap().unwrap();
/// assert_eq!(first.kind, TokenKind::StartObject);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    /// Creates a scanner with the default configuration.
    pub fn new() -> Self {
        Scanner {
            config: ScanConfig::default(),
        }
    }

    /// Creates a scanner with an explicit configuration.
    pub fn with_config(config: ScanConfig) -> Self {
        Scanner { config }
    }

    /// The configuration this scanner was built with.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    // The include-source decision is made exactly once, here.
    fn attach(&self, source: impl FnOnce() -> SourceRef) -> SourceRef {
        if self.config.include_source_in_location {
            source()
        } else {
            SourceRef::unknown()
        }
    }

    /// Attaches to an in-memory text buffer.
    pub fn stream_str<'a>(&self, text: &'a str) -> TokenStream<&'a [u8]> {
        TokenStream::new(text.as_bytes(), self.attach(|| SourceRef::from_text(text)))
    }

    /// Attaches to an in-memory byte buffer. The buffer is shared between
    /// the reader and the captured source reference, never copied twice.
    /// The bytes must be valid UTF-8; invalid sequences surface as I/O
    /// errors during scanning.
    pub fn stream_bytes(&self, bytes: impl Into<Arc<[u8]>>) -> TokenStream<Cursor<Arc<[u8]>>> {
        let bytes = bytes.into();
        let source = self.attach(|| SourceRef::from_bytes(bytes.clone()));
        TokenStream::new(Cursor::new(bytes), source)
    }

    /// Attaches to a live reader. The captured source reference records only
    /// the reader's type; its content is never re-read for descriptions.
    pub fn stream_reader<T: Read>(&self, reader: T) -> TokenStream<BufReader<T>> {
        let source = self.attach(|| SourceRef::from_stream(&reader));
        TokenStream::new(BufReader::new(reader), source)
    }

    /// Scans an in-memory text buffer to the end.
    pub fn scan_str(&self, text: &str) -> ScanResult<Vec<Token>> {
        self.stream_str(text).collect()
    }

    /// Scans an in-memory byte buffer to the end.
    pub fn scan_bytes(&self, bytes: &[u8]) -> ScanResult<Vec<Token>> {
        self.stream_bytes(bytes).collect()
    }

    /// Scans a reader to the end.
    pub fn scan_reader<T: Read>(&self, reader: T) -> ScanResult<Vec<Token>> {
        self.stream_reader(reader).collect()
    }
}

struct Pending {
    byte_offset: u64,
    char_offset: u64,
    column: usize,
    raw: RawToken,
}

/// A scanner attached to one input, yielding tokens in order.
///
/// Tokens are pulled with [`TokenStream::next_token`]; the stream also
/// implements `Iterator` over `ScanResult<Token>`.
pub struct TokenStream<T: BufRead> {
    reader: T,
    source: SourceRef,
    location: LocationTracker,
    line_str: String,
    queue: VecDeque<Pending>,
    finished: bool,
}

impl<T: BufRead> TokenStream<T> {
    fn new(reader: T, source: SourceRef) -> Self {
        TokenStream {
            reader,
            source,
            location: LocationTracker::new(),
            line_str: String::with_capacity(128),
            queue: VecDeque::new(),
            finished: false,
        }
    }

    /// The source reference captured when this stream was attached.
    pub fn source(&self) -> &SourceRef {
        &self.source
    }

    /// Position of the next line to be read, paired with this stream's
    /// source reference.
    pub fn current_location(&self) -> Location {
        Location::new(
            Some(self.source.clone()),
            self.location.line_start_byte(),
            self.location.line_start_char(),
            self.location.line_index.max(1),
            1,
        )
    }

    /// Returns the next token, `Ok(None)` at end of input.
    ///
    /// Any run of characters that is not a valid token fails with
    /// [`ScanError::UnrecognizedToken`] carrying the exact position.
    pub fn next_token(&mut self) -> ScanResult<Option<Token>> {
        loop {
            if let Some(pending) = self.queue.pop_front() {
                return self.emit(pending).map(Some);
            }
            if self.finished {
                return Ok(None);
            }
            self.read_next_line()?;
        }
    }

    fn emit(&self, pending: Pending) -> ScanResult<Token> {
        let location = Location::new(
            Some(self.source.clone()),
            pending.byte_offset,
            pending.char_offset,
            self.location.line_index,
            pending.column,
        );
        let kind = match pending.raw {
            RawToken::StartArray => TokenKind::StartArray,
            RawToken::EndArray => TokenKind::EndArray,
            RawToken::StartObject => TokenKind::StartObject,
            RawToken::EndObject => TokenKind::EndObject,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Str(s) => TokenKind::String(s),
            RawToken::Number(n) => TokenKind::Number(n),
            RawToken::True => TokenKind::Bool(true),
            RawToken::False => TokenKind::Bool(false),
            RawToken::Null => TokenKind::Null,
            RawToken::Word(token) => {
                return Err(ScanError::UnrecognizedToken { token, location });
            }
        };
        Ok(Token { kind, location })
    }

    fn read_next_line(&mut self) -> ScanResult<()> {
        self.line_str.clear();
        if self.reader.read_line(&mut self.line_str)? == 0 {
            self.finished = true;
            return Ok(());
        }
        self.location.next_line();
        let raw_tokens = match grammar::tokens(&self.line_str) {
            Ok(tokens) => tokens,
            Err(e) => {
                // offsets must stay absolute for callers that scan past the error
                let err = self.syntax_error(e);
                let chars = self.line_str.chars().count();
                self.location.consume_line(self.line_str.len(), chars);
                return Err(err);
            }
        };
        for (pos, raw) in raw_tokens {
            let column = self.line_str[..pos].chars().count() + 1;
            self.queue.push_back(Pending {
                byte_offset: self.location.line_start_byte() + pos as u64,
                char_offset: self.location.line_start_char() + column as u64 - 1,
                column,
                raw,
            });
        }
        let chars = self.line_str.chars().count();
        self.location.consume_line(self.line_str.len(), chars);
        Ok(())
    }

    fn syntax_error(&self, e: peg::error::ParseError<peg::str::LineCol>) -> ScanError {
        // the grammar sees one line at a time, so its line number is always 1
        let column = e.location.column;
        ScanError::Syntax {
            message: format!("expected {}", e.expected),
            location: Location::new(
                Some(self.source.clone()),
                self.location.line_start_byte() + e.location.offset as u64,
                self.location.line_start_char() + column as u64 - 1,
                self.location.line_index,
                column,
            ),
        }
    }
}

impl<T: BufRead> Iterator for TokenStream<T> {
    type Item = ScanResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::grammar as g;
    use super::*;

    macro_rules! assert_ok {
        ($e:expr) => (
            match $e {
                Ok(obj) => (obj),
                Err(e) => panic!("{}", e),
            }
        );
        ($e:expr , $o:expr) => (
            let obj = assert_ok!($e);
            assert_eq!(obj, $o);
        );
    }

    #[test]
    fn token_structural_ok() {
        assert_ok!(g::token("["), RawToken::StartArray);
        assert_ok!(g::token("]"), RawToken::EndArray);
        assert_ok!(g::token("{"), RawToken::StartObject);
        assert_ok!(g::token("}"), RawToken::EndObject);
        assert_ok!(g::token(","), RawToken::Comma);
        assert_ok!(g::token(":"), RawToken::Colon);
    }

    #[test]
    fn token_literals_ok() {
        assert_ok!(g::token("true"), RawToken::True);
        assert_ok!(g::token("false"), RawToken::False);
        assert_ok!(g::token("null"), RawToken::Null);
        assert_ok!(g::token("truthy"), RawToken::Word("truthy".to_string()));
    }

    #[test]
    fn token_number_ok() {
        assert_ok!(g::token("42"), RawToken::Number(42.0));
        assert_ok!(g::token("-7"), RawToken::Number(-7.0));
        assert_ok!(g::token("+5.21"), RawToken::Number(5.21));
        assert_ok!(g::token("8e-3"), RawToken::Number(0.008));
    }

    #[test]
    fn token_number_malformed_is_word() {
        assert_ok!(g::token("++3"), RawToken::Word("++3".to_string()));
        assert_ok!(g::token("+-3"), RawToken::Word("+-3".to_string()));
        assert_ok!(g::token("-"), RawToken::Word("-".to_string()));
    }

    #[test]
    fn token_string_ok() {
        assert_ok!(g::token("\"hi\""), RawToken::Str("hi".to_string()));
        assert_ok!(
            g::token("\"a\\\"b\\\\c\\n\""),
            RawToken::Str("a\"b\\c\n".to_string())
        );
        assert_ok!(g::token("\"\""), RawToken::Str(String::new()));
    }

    #[test]
    fn token_unterminated_string_is_word() {
        assert_ok!(g::token("\"abc"), RawToken::Word("\"abc".to_string()));
    }

    #[test]
    fn tokens_line_positions_ok() {
        let ts = assert_ok!(g::tokens("[ foobar ]\n"));
        assert_eq!(
            ts,
            vec![
                (0, RawToken::StartArray),
                (2, RawToken::Word("foobar".to_string())),
                (9, RawToken::EndArray),
            ]
        );
    }

    #[test]
    fn tokens_adjacent_ok() {
        let ts = assert_ok!(g::tokens("[1,2]\r\n"));
        assert_eq!(
            ts,
            vec![
                (0, RawToken::StartArray),
                (1, RawToken::Number(1.0)),
                (2, RawToken::Comma),
                (3, RawToken::Number(2.0)),
                (4, RawToken::EndArray),
            ]
        );
    }

    #[test]
    fn tokens_empty_line_ok() {
        assert_ok!(g::tokens("\n"), Vec::<(usize, RawToken)>::new());
        assert_ok!(g::tokens(""), Vec::<(usize, RawToken)>::new());
        assert_ok!(g::tokens("   \t \n"), Vec::<(usize, RawToken)>::new());
    }

    #[test]
    fn scanner_scan_ok() {
        let scanner = Scanner::new();
        let tokens = assert_ok!(scanner.scan_str("{ \"a\": [ 1, true, null ] }\n"));
        let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::StartObject,
                TokenKind::String("a".to_string()),
                TokenKind::Colon,
                TokenKind::StartArray,
                TokenKind::Number(1.0),
                TokenKind::Comma,
                TokenKind::Bool(true),
                TokenKind::Comma,
                TokenKind::Null,
                TokenKind::EndArray,
                TokenKind::EndObject,
            ]
        );
    }

    #[test]
    fn scanner_multiline_offsets_ok() {
        let scanner = Scanner::new();
        let tokens = assert_ok!(scanner.scan_str("[\n 42 ]\n"));
        assert_eq!(tokens.len(), 3);

        let open = &tokens[0].location;
        assert_eq!((open.line(), open.column(), open.byte_offset()), (1, 1, 0));

        let num = &tokens[1].location;
        assert_eq!((num.line(), num.column(), num.byte_offset()), (2, 2, 3));
        assert_eq!(num.char_offset(), 3);

        let close = &tokens[2].location;
        assert_eq!((close.line(), close.column(), close.byte_offset()), (2, 5, 6));
    }

    #[test]
    fn scanner_char_vs_byte_offsets_ok() {
        // 'é' is two bytes in UTF-8, so byte and char offsets diverge
        let scanner = Scanner::new();
        let err = scanner.scan_str("\"héllo\" x").expect_err("should fail");
        match err {
            ScanError::UnrecognizedToken { token, location } => {
                assert_eq!(token, "x");
                assert_eq!(location.line(), 1);
                assert_eq!(location.column(), 9);
                assert_eq!(location.byte_offset(), 9);
                assert_eq!(location.char_offset(), 8);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn scanner_empty_input_ok() {
        let scanner = Scanner::new();
        assert_ok!(scanner.scan_str(""), Vec::<Token>::new());
    }

    #[test]
    fn stream_next_token_sequencing_ok() {
        let scanner = Scanner::new();
        let mut stream = scanner.stream_str("[ foobar ]");
        // tokens before the bad one still come out in order
        let first = assert_ok!(stream.next_token()).expect("token");
        assert_eq!(first.kind, TokenKind::StartArray);
        let err = stream.next_token().expect_err("should fail");
        match err {
            ScanError::UnrecognizedToken { token, location } => {
                assert_eq!(token, "foobar");
                assert_eq!(location.line(), 1);
                assert_eq!(location.column(), 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
