//! String interning for resource values.
//!
//! Every string and file-path value in a [`crate::table::ResourceTable`] lives in the table's
//! [`StringPool`]. Values hold a [`StringRef`], a cheap shared handle that dereferences to the
//! pooled text. Interning the same text twice under the same [`Context`] returns handles to
//! the same pooled entry.
//!
//! # Examples
//!
//! ```rust
//! use restable::strings::StringPool;
//!
//! let mut pool = StringPool::new();
//! let a = pool.make_ref("hello");
//! let b = pool.make_ref("hello");
//! assert_eq!(&*a, "hello");
//! assert_eq!(a.index(), b.index());
//! assert_eq!(pool.len(), 1);
//! ```

use std::{
    collections::HashMap,
    fmt,
    ops::Deref,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use crate::config::ConfigDescription;

/// Where a pooled string is expected to be used. Entries with different contexts are pooled
/// separately even when their text matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Context {
    /// Sort priority, lower sorts first
    pub priority: u32,
    /// Configuration the string belongs to
    pub config: ConfigDescription,
}

impl Context {
    /// Priority used for strings that are resource values.
    pub const NORMAL_PRIORITY: u32 = 0x7fff_ffff;
    /// Highest priority, used for strings that must come first in the pool.
    pub const HIGH_PRIORITY: u32 = 1;

    /// A context with the given priority and the default configuration.
    pub fn with_priority(priority: u32) -> Self {
        Context {
            priority,
            config: ConfigDescription::default(),
        }
    }
}

#[derive(Debug)]
struct PoolEntry {
    value: String,
    context: Context,
    index: AtomicUsize,
}

/// A shared handle to a pooled string.
///
/// Equality compares the string content, not the pool slot.
#[derive(Clone)]
pub struct StringRef(Arc<PoolEntry>);

impl StringRef {
    /// The pooled text.
    pub fn as_str(&self) -> &str {
        &self.0.value
    }

    /// Current position of the entry in its pool. Changes when the pool is pruned.
    pub fn index(&self) -> usize {
        self.0.index.load(Ordering::Relaxed)
    }

    /// The context the string was interned with.
    pub fn context(&self) -> &Context {
        &self.0.context
    }
}

impl Deref for StringRef {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0.value
    }
}

impl PartialEq for StringRef {
    fn eq(&self, other: &Self) -> bool {
        self.0.value == other.0.value
    }
}

impl Eq for StringRef {}

impl fmt::Debug for StringRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0.value)
    }
}

impl fmt::Display for StringRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.value)
    }
}

/// An interning pool of strings.
#[derive(Debug, Default)]
pub struct StringPool {
    entries: Vec<Arc<PoolEntry>>,
    lookup: HashMap<(String, Context), usize>,
}

impl StringPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `s` with the default context.
    pub fn make_ref(&mut self, s: &str) -> StringRef {
        self.make_ref_with_context(s, Context::default())
    }

    /// Interns `s` with `context`, reusing an existing entry with the same text and context.
    pub fn make_ref_with_context(&mut self, s: &str, context: Context) -> StringRef {
        let key = (s.to_string(), context);
        if let Some(&index) = self.lookup.get(&key) {
            return StringRef(Arc::clone(&self.entries[index]));
        }

        let index = self.entries.len();
        let entry = Arc::new(PoolEntry {
            value: key.0.clone(),
            context,
            index: AtomicUsize::new(index),
        });
        self.entries.push(Arc::clone(&entry));
        self.lookup.insert(key, index);
        StringRef(entry)
    }

    /// Number of pooled entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a handle to the entry at `index`.
    pub fn get(&self, index: usize) -> Option<StringRef> {
        self.entries.get(index).map(|e| StringRef(Arc::clone(e)))
    }

    /// Iterates the pooled strings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.value.as_str())
    }

    /// Drops entries no [`StringRef`] points at any more and renumbers the rest.
    ///
    /// Returns the number of entries removed.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| Arc::strong_count(e) > 1);

        self.lookup.clear();
        for (index, entry) in self.entries.iter().enumerate() {
            entry.index.store(index, Ordering::Relaxed);
            self.lookup
                .insert((entry.value.clone(), entry.context), index);
        }

        before - self.entries.len()
    }
}
