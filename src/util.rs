
/// Tracks the current position while scanning.
///
/// This is primarily used to pair line/offset coordinates with a source
/// reference when building `Location` snapshots for tokens and errors.
#[derive(Debug, Clone, Copy)]
pub struct LocationTracker {
    /// Current 1-based line index in the input stream.
    pub line_index: usize,
    line_start_byte: u64,
    line_start_char: u64,
}

impl LocationTracker {
    /// Creates a new tracker at the start of a stream.
    pub fn new() -> Self {
        LocationTracker {
            line_index: 0,
            line_start_byte: 0,
            line_start_char: 0,
        }
    }

    /// Advances the tracker to the next line.
    pub fn next_line(&mut self) {
        self.line_index += 1;
    }

    /// Records that the current line occupied `bytes` bytes and `chars`
    /// characters (line terminator included), moving the line-start offsets
    /// past it.
    pub fn consume_line(&mut self, bytes: usize, chars: usize) {
        self.line_start_byte += bytes as u64;
        self.line_start_char += chars as u64;
    }

    /// Byte offset of the start of the current line.
    pub fn line_start_byte(&self) -> u64 {
        self.line_start_byte
    }

    /// Character offset of the start of the current line.
    pub fn line_start_char(&self) -> u64 {
        self.line_start_char
    }
}

impl Default for LocationTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_line_starts() {
        let mut t = LocationTracker::new();
        assert_eq!(t.line_index, 0);
        t.next_line();
        assert_eq!(t.line_index, 1);
        assert_eq!(t.line_start_byte(), 0);
        t.consume_line(10, 8);
        t.next_line();
        assert_eq!(t.line_index, 2);
        assert_eq!(t.line_start_byte(), 10);
        assert_eq!(t.line_start_char(), 8);
    }
}
