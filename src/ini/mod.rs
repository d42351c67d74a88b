mod ini_data;
mod ini_file;
mod tokenizer;

pub use self::ini_data::*;
pub use self::ini_file::*;
pub use self::tokenizer::*;

use ordered_multimap::list_ordered_multimap::ListOrderedMultimap;

pub type SectionKey = String;

pub type EntryKey = String;

pub type EntryValue = String;

/// Key-value pairs of a section in order of appearance, keys may repeat
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entries {
    pub(crate) data: ListOrderedMultimap<EntryKey, EntryValue>,
}

impl Entries {
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.data.values_len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
