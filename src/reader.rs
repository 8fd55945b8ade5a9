use std::io::{self, BufRead};

/// Longest chunk returned by one read, newline included.
///
/// Unlike `fgets` with a buffer of the same size, no byte is reserved for a
/// terminating NUL, so a 1023-byte line plus its newline is one chunk.
pub const MAX_LINE_WIDTH: usize = 1024;

// --------------------------------------------------
/// Reads newline-terminated lines from a `BufRead`, never returning more than
/// `width` bytes at a time.
///
/// A line longer than the width is handed back in successive pieces, the
/// last of which carries the newline. Returned slices borrow an internal
/// buffer that is reused on every call.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    width: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_width(reader, MAX_LINE_WIDTH)
    }

    pub fn with_width(reader: R, width: usize) -> Self {
        // A zero width would never make progress
        let width = width.max(1);
        LineReader {
            reader,
            width,
            buf: Vec::with_capacity(width),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    // --------------------------------------------------
    /// Returns the next line (or piece of an overlong line), or `None` at
    /// end of stream.
    pub fn next_line(&mut self) -> io::Result<Option<&[u8]>> {
        self.buf.clear();

        while self.buf.len() < self.width {
            let available = match self.reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            if available.is_empty() {
                break;
            }

            let room = self.width - self.buf.len();
            let window = &available[..available.len().min(room)];
            let (used, found_newline) =
                match window.iter().position(|&b| b == b'\n') {
                    Some(i) => (i + 1, true),
                    None => (window.len(), false),
                };

            self.buf.extend_from_slice(&window[..used]);
            self.reader.consume(used);

            if found_newline {
                break;
            }
        }

        Ok((!self.buf.is_empty()).then_some(self.buf.as_slice()))
    }
}
