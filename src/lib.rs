//! In-place, zero-allocation tokenizer for simple INI files.
//!
//! ```
//! use initok::ini::{TokenKind, Tokenizer};
//!
//! let mut buf = *b"[Sec1]\r\nKey1=Val1\r\n";
//! let tokens: Vec<_> = Tokenizer::new(&mut buf)
//!     .map(|t| (t.kind(), t.text().to_vec()))
//!     .collect();
//!
//! assert_eq!(tokens, vec![
//!     (TokenKind::Section, b"SEC1".to_vec()),
//!     (TokenKind::Entry, b"KEY1".to_vec()),
//!     (TokenKind::Value, b"Val1".to_vec()),
//! ]);
//! ```

pub mod ini;
