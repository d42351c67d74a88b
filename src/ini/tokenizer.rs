use std::iter::FusedIterator;
use std::mem;

use log::trace;

/// What the next call to [`Tokenizer::next_token()`] is going to parse.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ScanState {
    AwaitingSectionOrEntry,
    AwaitingValue,
    /// terminal, no more tokens
    Exhausted,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    Section, // [...]
    Entry,   // KEY=
    Value,   // =VALUE\r\n
}

/// A view into the buffer the [`Tokenizer`] was bound to.
///
/// The byte right after `text` has been overwritten with `\0` (unless the
/// token ended at the end of the buffer), so `size` counts that terminator
/// just like a C string length would.
#[derive(Debug, PartialEq, Eq)]
pub struct Token<'a> {
    kind: TokenKind,
    offset: usize,
    size: usize,
    text: &'a mut [u8],
}

impl<'a> Token<'a> {
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Position of the first byte of `text` in the bound buffer
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the token including its terminator
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn text(&self) -> &[u8] {
        self.text
    }

    /// Tokens live in the caller's buffer and may be modified in place.
    pub fn text_mut(&mut self) -> &mut [u8] {
        self.text
    }

    /// `None` if the token is not valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.text).ok()
    }

    pub fn into_text(self) -> &'a mut [u8] {
        self.text
    }
}

/// Splits an INI buffer into [`Token`]s without allocating.
///
/// The buffer ends at its first `\0` byte or at the end of the slice,
/// whichever comes first. Tokenizing is destructive: section and entry names
/// are upper-cased in place and every token is `\0`-terminated where its
/// end-marker used to be.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    rest: &'a mut [u8],
    cursor: usize,
    state: ScanState,
}

impl<'a> Tokenizer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            rest: buf,
            cursor: 0,
            state: ScanState::AwaitingSectionOrEntry,
        }
    }

    /// Start over on a new buffer
    pub fn bind(&mut self, buf: &'a mut [u8]) {
        *self = Self::new(buf);
    }

    /// Current scan position in the bound buffer
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Returns the next token or `None` at the end of the buffer.
    ///
    /// Once `None` has been returned all further calls return `None` too.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        if self.state == ScanState::Exhausted {
            return None;
        }

        let whitespace = self.rest.iter().take_while(|c| is_space(**c)).count();
        self.advance(whitespace);

        if at_end(self.rest) {
            self.exhaust();
            return None;
        }

        let (kind, end_marker) = match self.state {
            ScanState::AwaitingSectionOrEntry if self.rest[0] == b'[' => {
                // the '[' is not part of the section name
                self.advance(1);
                (TokenKind::Section, b']')
            }
            ScanState::AwaitingSectionOrEntry => {
                self.state = ScanState::AwaitingValue;
                (TokenKind::Entry, b'=')
            }
            ScanState::AwaitingValue => {
                self.state = ScanState::AwaitingSectionOrEntry;
                // NOTE: only CRLF line endings end a value properly, a bare '\n' cuts it short
                (TokenKind::Value, b'\r')
            }
            ScanState::Exhausted => return None,
        };

        let offset = self.cursor;
        let stop = self
            .rest
            .iter()
            .position(|&c| c == end_marker || c == b'\n' || c == 0)
            .unwrap_or(self.rest.len());

        let text = self.advance(stop);
        if kind != TokenKind::Value {
            text.make_ascii_uppercase();
        }

        let hit_end = at_end(self.rest);
        if !hit_end {
            // replace the end-marker with a terminator
            self.advance(1)[0] = 0;
        }
        if hit_end || at_end(self.rest) {
            self.exhaust();
        }

        Some(Token {
            kind,
            offset,
            size: stop + 1,
            text,
        })
    }

    /// Splits off the next `n` bytes of the unread buffer and moves the cursor past them.
    fn advance(&mut self, n: usize) -> &'a mut [u8] {
        let rest = mem::take(&mut self.rest);
        let (head, tail) = rest.split_at_mut(n);
        self.rest = tail;
        self.cursor += n;
        head
    }

    fn exhaust(&mut self) {
        trace!("buffer exhausted at offset {}", self.cursor);
        self.state = ScanState::Exhausted;
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl FusedIterator for Tokenizer<'_> {}

fn at_end(buf: &[u8]) -> bool {
    matches!(buf.first(), None | Some(0))
}

// same set as C's `isspace()` in the "C" locale
fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}
