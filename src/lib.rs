//! chained-table: a string-keyed hash table using separate chaining.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, verifiable chained hash table whose bucket placement is
//!   fully reproducible (fixed djb2 hash), with an explicit doubling resize.
//! - Layers:
//!   - `djb2`: the fixed string hash and `hash % capacity` bucket selection.
//!   - `entry`: chain nodes (owned key, owned value, optional next link).
//!   - `ChainedHashTable`: bucket array of optional chain heads over an
//!     entry arena; create/insert/retrieve/remove/resize/destroy.
//!
//! Storage
//! - Nodes live in a `slotmap::SlotMap` arena owned by the table. A bucket
//!   holds `Option<EntryKey>` (its chain head) and every node holds
//!   `Option<EntryKey>` (its successor). `None` is the only empty marker, so
//!   a fresh bucket array is all-empty by construction.
//! - Removing a node unlinks it, then removes it from the arena, which drops
//!   its key and value. Releasing the table drops the arena in one pass; no
//!   recursive drop through chain links.
//!
//! Chain order
//! - New keys append at the chain tail; updates replace the value in place.
//! - Resize visits old buckets in index order and each chain head to tail,
//!   appending every node at the tail of its new bucket. Nodes sharing a new
//!   bucket therefore keep their relative order.
//!
//! Resize policy
//! - `resize(self) -> Self` and `grow(&mut self)` always double capacity.
//! - Automatic growth is opt-in through `TableConfig::with_max_load_factor`;
//!   the effective capacity is always visible through `capacity()` and every
//!   resize is logged at `info`.
//!
//! Logging
//! - Uses the `log` facade. Removing an absent key logs at `warn`; the
//!   library never installs a logger.
//!
//! Notes and non-goals
//! - Single-threaded; wrap in a mutex for shared use.
//! - Keys and values are `str` only; no custom hashers; no shrinking.

mod config;
mod djb2;
mod entry;
mod error;
mod table;
mod table_proptest;

// Public surface
pub use config::{TableConfig, DEFAULT_CAPACITY, MIN_LOAD_FACTOR};
pub use djb2::{bucket_index, djb2};
pub use error::TableError;
pub use table::{Chain, ChainedHashTable, Iter};
