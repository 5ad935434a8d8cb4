//! Filesystem helpers: path manipulation, argument files, ignore filters and directory
//! scanning.
//!
//! Paths are handled as strings with the platform separator, [`DIR_SEP`], since resource
//! paths are compared and stored textually.

use std::{
    collections::HashSet,
    fs,
    path::{Path, MAIN_SEPARATOR},
};

use crate::{
    diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics},
    io::MappedData,
    resource::Source,
    Error, Result,
};

/// The platform directory separator.
pub const DIR_SEP: char = MAIN_SEPARATOR;

/// `/`, accepted as a separator on every platform when splitting off file names.
pub const INVARIANT_DIR_SEP: char = '/';

/// Ignore pattern applied to resource directories unless the caller supplies its own.
pub const DEFAULT_IGNORE_PATTERN: &str =
    "!.svn:!.git:!.ds_store:!*.scc:.*:<dir>_*:!CVS:!thumbs.db:!picasa.ini:!*~";

/// What kind of filesystem object a path names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// Could not be determined
    Unknown,
    /// Nothing exists at the path
    NonExistant,
    /// Regular file
    Regular,
    /// Directory
    Directory,
    /// Character device
    CharDev,
    /// Block device
    BlockDev,
    /// Named pipe
    Fifo,
    /// Symbolic link
    Symlink,
    /// Unix socket
    Socket,
}

/// Returns the type of the object at `path`, following symlinks.
pub fn file_type(path: impl AsRef<Path>) -> FileType {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return FileType::NonExistant,
        Err(_) => return FileType::Unknown,
    };

    let ft = metadata.file_type();
    if ft.is_file() {
        return FileType::Regular;
    }
    if ft.is_dir() {
        return FileType::Directory;
    }
    if ft.is_symlink() {
        return FileType::Symlink;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if ft.is_char_device() {
            return FileType::CharDev;
        }
        if ft.is_block_device() {
            return FileType::BlockDev;
        }
        if ft.is_fifo() {
            return FileType::Fifo;
        }
        if ft.is_socket() {
            return FileType::Socket;
        }
    }

    FileType::Unknown
}

/// Creates `path` and every missing parent. An existing directory is not an error.
///
/// # Errors
///
/// Returns [`Error::FileError`] if a directory can not be created.
pub fn mkdirs(path: impl AsRef<Path>) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Returns everything before the last separator, or `""` if there is none.
///
/// `"res/layout/main.xml"` gives `"res/layout"`.
pub fn get_stem(path: &str) -> &str {
    match path.rfind(DIR_SEP) {
        Some(pos) => &path[..pos],
        None => "",
    }
}

/// Returns everything after the last separator.
pub fn get_filename(path: &str) -> &str {
    match path.rfind([DIR_SEP, INVARIANT_DIR_SEP]) {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Returns the extension of the file name, starting at its first `.`, or `""`.
///
/// `"res/raw/archive.tar.gz"` gives `".tar.gz"`.
pub fn get_extension(path: &str) -> &str {
    let filename = get_filename(path);
    match filename.find('.') {
        Some(pos) => &filename[pos..],
        None => "",
    }
}

/// Returns true if the file name starts with `.`.
pub fn is_hidden(path: &str) -> bool {
    get_filename(path).starts_with('.')
}

/// Appends `part` to `base` so exactly one separator sits between them.
pub fn append_path(base: &mut String, part: &str) {
    let base_has_trailing_sep = base.ends_with(DIR_SEP);
    let part_has_leading_sep = part.starts_with(DIR_SEP);

    if base_has_trailing_sep && part_has_leading_sep {
        base.push_str(&part[DIR_SEP.len_utf8()..]);
        return;
    }
    if !base_has_trailing_sep && !part_has_leading_sep {
        base.push(DIR_SEP);
    }
    base.push_str(part);
}

/// Joins `parts` with [`append_path`].
pub fn build_path<S: AsRef<str>>(parts: &[S]) -> String {
    let Some((first, rest)) = parts.split_first() else {
        return String::new();
    };

    let mut out = first.as_ref().to_string();
    for part in rest {
        append_path(&mut out, part.as_ref());
    }
    out
}

/// Converts a dotted package name to a relative directory path.
///
/// `"com.example.app"` gives `"com/example/app"`. No separator is put in front of the first
/// component, so the result can be joined onto an output directory with [`append_path`].
pub fn package_to_path(package: &str) -> String {
    let mut out = String::new();
    for part in package.split('.') {
        if out.is_empty() {
            out.push_str(part);
        } else {
            append_path(&mut out, part);
        }
    }
    out
}

/// Memory maps the file at `path`. An empty file gives an empty map.
///
/// # Errors
///
/// Returns [`Error::FileError`] if the file can not be opened or mapped.
pub fn mmap_path(path: impl AsRef<Path>) -> Result<MappedData> {
    MappedData::open(path)
}

fn read_args(path: &Path) -> Result<impl Iterator<Item = String>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        Error::Error(format!(
            "failed to read argument-list file '{}': {e}",
            path.display()
        ))
    })?;

    let args: Vec<String> = contents
        .lines()
        .flat_map(|line| line.trim().split(' '))
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(str::to_string)
        .collect();
    Ok(args.into_iter())
}

/// Reads whitespace-separated arguments spread over the lines of a file and appends them in
/// order.
///
/// # Errors
///
/// Returns [`Error::Error`] if the file can not be read. Nothing is appended in that case.
pub fn append_args_from_file(path: impl AsRef<Path>, out: &mut Vec<String>) -> Result<()> {
    out.extend(read_args(path.as_ref())?);
    Ok(())
}

/// Like [`append_args_from_file`], but collects into a set.
///
/// # Errors
///
/// Returns [`Error::Error`] if the file can not be read.
pub fn append_set_args_from_file(path: impl AsRef<Path>, out: &mut HashSet<String>) -> Result<()> {
    out.extend(read_args(path.as_ref())?);
    Ok(())
}

/// Decides which files and directories a scan skips.
///
/// A pattern is a `:`-separated list of tokens, matched case-insensitively against file names:
///
/// - `name` matches exactly
/// - `*suffix` and `prefix*` match by suffix or prefix
/// - a leading `!` silences the warning reported on a match, for that token and every token
///   after it
/// - a `<dir>` or `<file>` prefix restricts the token to directories or regular files
///
/// # Examples
///
/// ```rust
/// use restable::diagnostics::Diagnostics;
/// use restable::util::files::{FileFilter, FileType};
///
/// let diagnostics = Diagnostics::new();
/// let mut filter = FileFilter::new(&diagnostics);
/// filter.set_pattern("!.git:*~:<dir>_*");
///
/// assert!(!filter.accepts(".git", FileType::Directory));
/// assert!(!filter.accepts("values.xml~", FileType::Regular));
/// assert!(!filter.accepts("_build", FileType::Directory));
/// assert!(filter.accepts("_build", FileType::Regular));
/// assert!(filter.accepts("strings.xml", FileType::Regular));
/// ```
#[derive(Debug)]
pub struct FileFilter<'a> {
    diagnostics: &'a Diagnostics,
    pattern_tokens: Vec<String>,
}

impl<'a> FileFilter<'a> {
    /// A filter with no tokens, which accepts everything except `.` and `..`.
    pub fn new(diagnostics: &'a Diagnostics) -> Self {
        FileFilter {
            diagnostics,
            pattern_tokens: Vec::new(),
        }
    }

    /// A filter using [`DEFAULT_IGNORE_PATTERN`].
    pub fn with_default_pattern(diagnostics: &'a Diagnostics) -> Self {
        let mut filter = Self::new(diagnostics);
        filter.set_pattern(DEFAULT_IGNORE_PATTERN);
        filter
    }

    /// Replaces the pattern. Always succeeds.
    pub fn set_pattern(&mut self, pattern: &str) -> bool {
        self.pattern_tokens = pattern
            .split(':')
            .map(str::to_ascii_lowercase)
            .collect();
        true
    }

    /// Returns true if `filename` should be kept.
    pub fn accepts(&self, filename: &str, file_type: FileType) -> bool {
        if filename == "." || filename == ".." {
            return false;
        }

        let lower = filename.to_ascii_lowercase();
        let mut chatty = true;
        for token in &self.pattern_tokens {
            let mut rest = match token.strip_prefix('!') {
                Some(rest) => {
                    chatty = false;
                    rest
                }
                None => token.as_str(),
            };

            if let Some(after) = rest.strip_prefix("<dir>") {
                if file_type != FileType::Directory {
                    continue;
                }
                rest = after;
            } else if let Some(after) = rest.strip_prefix("<file>") {
                if file_type != FileType::Regular {
                    continue;
                }
                rest = after;
            }

            let ignore = if let Some(suffix) = rest.strip_prefix('*') {
                lower.ends_with(suffix)
            } else if rest.len() > 1 && rest.ends_with('*') {
                lower.starts_with(&rest[..rest.len() - 1])
            } else {
                lower == rest
            };

            if ignore {
                if chatty {
                    let kind = if file_type == FileType::Directory {
                        "dir"
                    } else {
                        "file"
                    };
                    self.diagnostics.warning(
                        DiagnosticCategory::File,
                        format!("skipping {kind} '{filename}' due to ignore pattern '{token}'"),
                    );
                }
                return false;
            }
        }
        true
    }
}

/// Lists the files under `path`, recursively, as paths relative to `path`.
///
/// Names starting with `.` are always skipped. Every other entry must pass `filter` when one
/// is given; a rejected directory is not descended into. Files of a directory come before
/// the contents of its subdirectories, each group sorted by name.
///
/// # Errors
///
/// Returns [`Error::FileError`] if a directory can not be read. The failure is also reported
/// to `diagnostics`.
pub fn find_files(
    path: &str,
    diagnostics: &Diagnostics,
    filter: Option<&FileFilter<'_>>,
) -> Result<Vec<String>> {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => {
            diagnostics.push(
                Diagnostic::new(DiagnosticSeverity::Error, DiagnosticCategory::File, e.to_string())
                    .with_source(Source::new(path)),
            );
            return Err(e.into());
        }
    };

    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with('.') {
            names.push(name);
        }
    }
    names.sort();

    let mut files = Vec::new();
    let mut subdirs = Vec::new();
    for name in names {
        let mut full_path = path.to_string();
        append_path(&mut full_path, &name);
        let ft = file_type(&full_path);

        if let Some(filter) = filter {
            if !filter.accepts(&name, ft) {
                continue;
            }
        }

        if ft == FileType::Directory {
            subdirs.push(name);
        } else {
            files.push(name);
        }
    }

    for subdir in subdirs {
        let mut full_subdir = path.to_string();
        append_path(&mut full_subdir, &subdir);
        for subfile in find_files(&full_subdir, diagnostics, filter)? {
            let mut relative = subdir.clone();
            append_path(&mut relative, &subfile);
            files.push(relative);
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected() -> String {
        format!("hello{DIR_SEP}there")
    }

    #[test]
    fn test_append_path() {
        let mut base = "hello".to_string();
        append_path(&mut base, "there");
        assert_eq!(base, expected());
    }

    #[test]
    fn test_append_path_with_leading_or_trailing_separators() {
        let mut base = format!("hello{DIR_SEP}");
        append_path(&mut base, "there");
        assert_eq!(base, expected());

        let mut base = "hello".to_string();
        append_path(&mut base, &format!("{DIR_SEP}there"));
        assert_eq!(base, expected());

        let mut base = format!("hello{DIR_SEP}");
        append_path(&mut base, &format!("{DIR_SEP}there"));
        assert_eq!(base, expected());
    }

    #[test]
    fn test_path_parts() {
        let path = build_path(&["res", "layout", "main.activity.xml"]);
        assert_eq!(get_stem(&path), build_path(&["res", "layout"]));
        assert_eq!(get_filename(&path), "main.activity.xml");
        assert_eq!(get_extension(&path), ".activity.xml");
        assert_eq!(get_extension("Makefile"), "");
        assert_eq!(get_stem("file.txt"), "");
        assert!(is_hidden(&build_path(&["res", ".DS_Store"])));
        assert!(!is_hidden("res"));
        assert_eq!(build_path::<&str>(&[]), "");
    }

    #[test]
    fn test_package_to_path() {
        assert_eq!(
            package_to_path("com.example.app"),
            build_path(&["com", "example", "app"])
        );
        assert_eq!(package_to_path("single"), "single");

        let mut out = String::from("gen");
        append_path(&mut out, &package_to_path("com.example"));
        assert_eq!(out, build_path(&["gen", "com", "example"]));
    }

    #[test]
    fn test_filter_silence_carries_to_later_tokens() {
        let diagnostics = Diagnostics::new();
        let mut filter = FileFilter::new(&diagnostics);
        filter.set_pattern("*.tmp:!*.bak:*.old");

        assert!(!filter.accepts("a.tmp", FileType::Regular));
        assert_eq!(diagnostics.warning_count(), 1);

        assert!(!filter.accepts("b.bak", FileType::Regular));
        assert!(!filter.accepts("c.old", FileType::Regular));
        assert_eq!(diagnostics.warning_count(), 1);
    }

    #[test]
    fn test_filter_default_pattern() {
        let diagnostics = Diagnostics::new();
        let filter = FileFilter::with_default_pattern(&diagnostics);

        assert!(!filter.accepts(".svn", FileType::Directory));
        assert!(!filter.accepts("Thumbs.db", FileType::Regular));
        assert!(!filter.accepts("backup.scc", FileType::Regular));
        assert!(!filter.accepts("strings.xml~", FileType::Regular));
        assert_eq!(diagnostics.count(), 0);

        // The default pattern opens with a silent token, so every later match is quiet too.
        assert!(!filter.accepts(".hidden", FileType::Regular));
        assert_eq!(diagnostics.count(), 0);

        assert!(!filter.accepts("_generated", FileType::Directory));
        assert!(filter.accepts("_generated", FileType::Regular));
        assert!(filter.accepts("strings.xml", FileType::Regular));
        assert!(!filter.accepts(".", FileType::Directory));
        assert!(!filter.accepts("..", FileType::Directory));
    }

    #[test]
    fn test_filter_file_qualifier() {
        let diagnostics = Diagnostics::new();
        let mut filter = FileFilter::new(&diagnostics);
        filter.set_pattern("<file>*.bak");
        assert!(!filter.accepts("old.BAK", FileType::Regular));
        assert!(filter.accepts("dir.bak", FileType::Directory));
        assert!(diagnostics.warnings()[0].message.contains("skipping file 'old.BAK'"));
    }
}
