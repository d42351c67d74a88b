use ordered_multimap::list_ordered_multimap::ListOrderedMultimap;
use std::io;

use super::{Entries, EntryKey, SectionKey, Token, TokenKind, Tokenizer};

/// Section holding the entries found before the first section header
pub const GLOBAL_SECTION: &str = "";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IniData {
    pub(crate) sections: ListOrderedMultimap<SectionKey, Entries>,
}

impl IniData {
    /// Appends `key=value` to `section`
    pub fn add<S, K>(&mut self, section: S, key: K, value: &str)
    where
        S: Into<String>,
        K: Into<String>,
    {
        self.section_mut(section.into())
            .data
            .append(key.into(), value.to_owned());
    }

    /// Collects a stream of tokens into sections.
    ///
    /// Repeated sections are merged, an entry without a value (only possible
    /// at the end of the buffer) gets an empty one.
    pub fn from_tokens<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = Token<'a>>,
    {
        let mut data = IniData::new();
        let mut section: SectionKey = GLOBAL_SECTION.into();
        let mut pending_key: Option<EntryKey> = None;

        for token in tokens {
            let text = String::from_utf8_lossy(token.text()).into_owned();

            match token.kind() {
                TokenKind::Section => {
                    if let Some(key) = pending_key.take() {
                        data.add(section.as_str(), key, "");
                    }
                    // make sure there's a section entry (even if it stays empty)
                    data.section_mut(text.clone());
                    section = text;
                }
                TokenKind::Entry => {
                    if let Some(key) = pending_key.replace(text) {
                        data.add(section.as_str(), key, "");
                    }
                }
                TokenKind::Value => {
                    let key = pending_key.take().unwrap_or_default();
                    data.add(section.as_str(), key, &text);
                }
            }
        }

        if let Some(key) = pending_key {
            data.add(section, key, "");
        }

        data
    }

    pub fn has_key(&self, section: &str, key: &str) -> bool {
        self.sections
            .get(section)
            .map_or(false, |e| e.data.contains_key(key))
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of unique sections (i.e. with different names)
    pub fn len(&self) -> usize {
        self.sections.keys_len()
    }

    /// Tokenizes `buf` (modifying it) and collects the result
    pub fn load_from_buf(buf: &mut [u8]) -> Self {
        Self::from_tokens(Tokenizer::new(buf))
    }

    /// Get all values for `key` in `section`, in order of appearance
    pub fn lookup_all(&self, section: &str, key: &str) -> Vec<&str> {
        match self.sections.get(section) {
            Some(entries) => entries.data.get_all(key).map(|v| v.as_str()).collect(),
            None => Vec::new(),
        }
    }

    /// Get the last value for `key` in `section`
    pub fn lookup_last(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)?
            .data
            .get_all(key)
            .last()
            .map(|v| v.as_str())
    }

    pub fn new() -> Self {
        IniData {
            sections: Default::default(),
        }
    }

    pub fn section_entries(&self, name: &str) -> impl DoubleEndedIterator<Item = (&str, &str)> {
        self.sections
            .get(name)
            .into_iter()
            .flat_map(|entries| entries.iter())
    }

    fn section_mut(&mut self, name: SectionKey) -> &mut Entries {
        self.sections
            .entry(name)
            .or_insert_entry(Entries::default())
            .into_mut()
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(|k| k.as_str())
    }

    pub fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        for (section, entries) in &self.sections {
            if section != GLOBAL_SECTION {
                writeln!(writer, "[{}]", section)?;
            }
            for (k, v) in entries.iter() {
                writeln!(writer, "{}={}", k, v)?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}
