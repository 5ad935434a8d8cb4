use std::{
    fs,
    path::{Path, PathBuf},
};

use memmap2::Mmap;

use super::{Data, InputFile};
use crate::{resource::Source, Error::FileError, Result};

/// File contents mapped from disk.
///
/// Empty files are not mapped at all and read as an empty slice.
#[derive(Debug)]
pub struct MappedData {
    map: Option<Mmap>,
}

impl MappedData {
    /// Maps the file at `path` read-only.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if the file can not be opened or mapped.
    pub fn open(path: impl AsRef<Path>) -> Result<MappedData> {
        let file = fs::File::open(path)?;
        Self::from_std_file(&file)
    }

    /// Maps an already opened file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if the file can not be mapped.
    pub fn from_std_file(file: &fs::File) -> Result<MappedData> {
        if file.metadata()?.len() == 0 {
            return Ok(MappedData { map: None });
        }

        // The mapping is read-only and private to this value.
        let mmap = unsafe { Mmap::map(file) }.map_err(FileError)?;
        Ok(MappedData { map: Some(mmap) })
    }
}

impl Data for MappedData {
    fn data(&self) -> &[u8] {
        match &self.map {
            Some(map) => map.as_ref(),
            None => &[],
        }
    }
}

/// A file on disk. Its contents are mapped each time it is opened.
#[derive(Debug, Clone)]
pub struct RegularFile {
    path: PathBuf,
    source: Source,
}

impl RegularFile {
    /// Creates a handle for `path`. The file is not touched until it is opened.
    pub fn new(path: impl Into<PathBuf>) -> RegularFile {
        let path = path.into();
        let source = Source::new(path.to_string_lossy());
        RegularFile { path, source }
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InputFile for RegularFile {
    fn source(&self) -> Source {
        self.source.clone()
    }

    fn open_as_data(&self) -> Result<Box<dyn Data>> {
        Ok(Box::new(crate::util::files::mmap_path(&self.path)?))
    }
}
