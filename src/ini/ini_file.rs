use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::debug;

use super::{IniData, Tokenizer};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("couldn't open file: {0}")]
    Open(#[source] io::Error),
    #[error("failed to read from file: {0}")]
    Read(#[source] io::Error),
}

/// Owns a `\0`-terminated copy of an INI file for [`Tokenizer`]s to work on.
///
/// Tokenizing modifies the buffer, so a second tokenizer over the same file
/// sees upper-cased names and terminators left behind by the first one.
#[derive(Debug, PartialEq)]
pub struct IniFile {
    pub(crate) path: PathBuf,
    buf: Vec<u8>,
}

impl Default for IniFile {
    fn default() -> Self {
        Self {
            path: Default::default(),
            buf: vec![0],
        }
    }
}

impl IniFile {
    pub fn load_from_path(path: &Path) -> Result<Self, IoError> {
        debug!("Loading INI file {path:?}");

        let mut file = File::open(path).map_err(IoError::Open)?;

        let mut buf = Vec::new();
        file.read_to_end(&mut buf).map_err(IoError::Read)?;
        buf.push(0);

        Ok(IniFile {
            path: path.into(),
            buf,
        })
    }

    pub fn from_bytes<B: Into<Vec<u8>>>(data: B) -> Self {
        let mut buf = data.into();
        buf.push(0);

        IniFile {
            path: PathBuf::new(),
            buf,
        }
    }

    /// Contents without the trailing terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.buf.len() - 1]
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tokenizer(&mut self) -> Tokenizer<'_> {
        Tokenizer::new(&mut self.buf)
    }

    pub fn to_data(&mut self) -> IniData {
        IniData::from_tokens(self.tokenizer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ini::TokenKind;
    use std::io::Write;

    mod impl_default {
        use super::*;

        #[test]
        fn values() {
            let mut file = IniFile::default();

            assert_eq!(file.path(), Path::new(""));
            assert!(file.as_bytes().is_empty());
            assert_eq!(file.tokenizer().next_token(), None);
        }
    }

    mod from_bytes {
        use super::*;

        #[test]
        fn keeps_data_and_adds_terminator() {
            let file = IniFile::from_bytes("[A]\r\n");

            assert_eq!(file.as_bytes(), b"[A]\r\n");
            assert_eq!(file.buf.last(), Some(&0));
        }

        #[test]
        fn tokenizing_twice_sees_modified_buffer() {
            let mut file = IniFile::from_bytes("key=Value\r\n");

            assert_eq!(file.tokenizer().count(), 2);
            assert_eq!(file.as_bytes(), b"KEY\0Value\0\n");

            // the first terminator now ends the buffer
            let mut tokenizer = file.tokenizer();
            let t = tokenizer.next_token().unwrap();
            assert_eq!(t.kind(), TokenKind::Entry);
            assert_eq!(t.text(), b"KEY");
            assert_eq!(tokenizer.next_token(), None);
        }
    }

    mod load_from_path {
        use super::*;

        #[test]
        #[serial_test::parallel]
        fn fails_for_missing_file() {
            let temp_dir = tempfile::tempdir().expect("cannot create temp dir");

            let res = IniFile::load_from_path(&temp_dir.path().join("missing.ini"));
            assert!(matches!(res, Err(IoError::Open(e)) if e.kind() == io::ErrorKind::NotFound));
        }

        #[test]
        #[serial_test::parallel]
        fn fails_to_read_directory() {
            let temp_dir = tempfile::tempdir().expect("cannot create temp dir");

            // opening a directory succeeds, reading from it does not
            let res = IniFile::load_from_path(temp_dir.path());
            assert!(matches!(res, Err(IoError::Read(_))));
        }

        #[test]
        #[serial_test::parallel]
        fn reads_whole_file() {
            let temp_dir = tempfile::tempdir().expect("cannot create temp dir");
            let path = temp_dir.path().join("test.ini");
            let mut f = File::create(&path).expect("cannot create test file");
            f.write_all(b"[Sec1]\r\nKey1=Val1\r\n")
                .expect("cannot write test file");

            let mut file = IniFile::load_from_path(&path).unwrap();
            assert_eq!(file.path(), path.as_path());
            assert_eq!(file.as_bytes(), b"[Sec1]\r\nKey1=Val1\r\n");

            let data = file.to_data();
            assert_eq!(data.lookup_last("SEC1", "KEY1"), Some("Val1"));
        }
    }
}
