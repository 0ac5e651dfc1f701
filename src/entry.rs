//! Chain nodes stored in the table's arena.

use slotmap::new_key_type;

new_key_type! {
    /// Arena key of one `Entry`. Stale keys never resolve (generational).
    pub(crate) struct EntryKey;
}

/// Key/value node. `next` links to the following node in the same bucket's chain;
/// `None` terminates the chain.
#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) key: String,
    pub(crate) value: String,
    pub(crate) next: Option<EntryKey>,
}

impl Entry {
    pub(crate) fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_owned(),
            value: value.to_owned(),
            next: None,
        }
    }
}
