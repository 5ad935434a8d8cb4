//! Input file handles for file-based resources.
//!
//! A [`crate::values::FileReference`] can carry a handle to the file it names. The handle is
//! an [`InputFile`]: something that knows where it came from and can be opened as a block of
//! bytes. Bytes are exposed through the [`Data`] trait, which has a memory-mapped
//! implementation for files on disk and an owned-buffer implementation for files built in
//! memory.
//!
//! # Key Components
//!
//! - [`InputFile`] - A file that can be opened for reading
//! - [`Data`] - Read-only view of opened file contents
//! - [`RegularFile`] / [`MappedData`] - Files on disk, memory mapped when opened
//! - [`InMemoryFile`] / [`MemoryData`] - Files held in memory
//!
//! # Examples
//!
//! ```rust
//! use restable::io::{InMemoryFile, InputFile};
//! use restable::resource::Source;
//!
//! let file = InMemoryFile::new(Source::new("res/raw/hello.txt"), b"hello".to_vec());
//! let data = file.open_as_data()?;
//! assert_eq!(data.data(), b"hello");
//! # Ok::<(), restable::Error>(())
//! ```

mod memory;
mod physical;

use std::fmt::Debug;

pub use memory::{InMemoryFile, MemoryData};
pub use physical::{MappedData, RegularFile};

use crate::{resource::Source, Result};

/// Read-only access to the bytes of an opened file.
pub trait Data: Debug + Send + Sync {
    /// The whole contents.
    fn data(&self) -> &[u8];

    /// Number of bytes.
    fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns true if there are no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if the range is out of bounds.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let data = self.data();
        let Some(end) = offset.checked_add(len) else {
            return Err(malformed_error!("range {}+{} overflows", offset, len));
        };
        if end > data.len() {
            return Err(malformed_error!(
                "range {}..{} is out of bounds for {} bytes",
                offset,
                end,
                data.len()
            ));
        }
        Ok(&data[offset..end])
    }
}

/// A file that can be attached to a [`crate::values::FileReference`].
pub trait InputFile: Debug + Send + Sync {
    /// Where the file came from, for diagnostics.
    fn source(&self) -> Source;

    /// Opens the file and returns its contents.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if the file can not be read.
    fn open_as_data(&self) -> Result<Box<dyn Data>>;

    /// Whether the file was stored compressed in its container.
    fn was_compressed(&self) -> bool {
        false
    }
}
