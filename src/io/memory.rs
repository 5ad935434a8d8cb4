use std::sync::Arc;

use super::{Data, InputFile};
use crate::{resource::Source, Result};

/// File contents held in an owned buffer.
#[derive(Debug, Clone)]
pub struct MemoryData {
    data: Arc<[u8]>,
}

impl MemoryData {
    /// Wraps a buffer.
    pub fn new(data: impl Into<Arc<[u8]>>) -> MemoryData {
        MemoryData { data: data.into() }
    }
}

impl Data for MemoryData {
    fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A file whose contents live in memory. Opening it never fails and never copies.
#[derive(Debug, Clone)]
pub struct InMemoryFile {
    source: Source,
    data: Arc<[u8]>,
}

impl InMemoryFile {
    /// Creates a file with the given contents.
    pub fn new(source: Source, data: impl Into<Arc<[u8]>>) -> InMemoryFile {
        InMemoryFile {
            source,
            data: data.into(),
        }
    }
}

impl InputFile for InMemoryFile {
    fn source(&self) -> Source {
        self.source.clone()
    }

    fn open_as_data(&self) -> Result<Box<dyn Data>> {
        Ok(Box::new(MemoryData {
            data: Arc::clone(&self.data),
        }))
    }
}
