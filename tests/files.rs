//! Filesystem helpers against real directories.

use std::{collections::HashSet, fs, path::Path, sync::Arc};

use restable::{
    diagnostics::Diagnostics,
    io::{Data, InputFile, RegularFile},
    testing::{get_value, ResourceTableBuilder},
    util::files::{
        append_args_from_file, append_set_args_from_file, build_path, file_type, find_files,
        mkdirs, mmap_path, FileFilter, FileType,
    },
    values::FileReference,
    Error,
};
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn dir_str(dir: &TempDir) -> String {
    dir.path().to_string_lossy().into_owned()
}

#[test]
fn test_file_type_and_mkdirs() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("res").join("values-land");

    assert_eq!(file_type(&nested), FileType::NonExistant);
    mkdirs(&nested).unwrap();
    assert_eq!(file_type(&nested), FileType::Directory);
    // Creating an existing directory again is fine.
    mkdirs(&nested).unwrap();

    write(dir.path(), "res/values-land/strings.xml", "<resources/>");
    assert_eq!(file_type(nested.join("strings.xml")), FileType::Regular);
}

#[test]
fn test_mmap_path() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "empty.bin", "");
    write(dir.path(), "data.bin", "resources");

    assert!(mmap_path(dir.path().join("empty.bin")).unwrap().is_empty());
    assert_eq!(
        mmap_path(dir.path().join("data.bin")).unwrap().data(),
        b"resources"
    );
    assert!(matches!(
        mmap_path(dir.path().join("missing.bin")),
        Err(Error::FileError(_))
    ));
}

#[test]
fn test_append_args_from_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "args.txt", "  --one   --two\n\n--three \n --one\n");

    let mut args = vec!["--zero".to_string()];
    append_args_from_file(dir.path().join("args.txt"), &mut args).unwrap();
    assert_eq!(args, ["--zero", "--one", "--two", "--three", "--one"]);

    let mut set = HashSet::new();
    append_set_args_from_file(dir.path().join("args.txt"), &mut set).unwrap();
    assert_eq!(set.len(), 3);
    assert!(set.contains("--three"));

    let mut untouched = Vec::new();
    assert!(append_args_from_file(dir.path().join("nope.txt"), &mut untouched).is_err());
    assert!(untouched.is_empty());
}

#[test]
fn test_find_files_recurses_and_filters() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "values/strings.xml", "");
    write(dir.path(), "values/strings.xml~", "");
    write(dir.path(), "layout/main.xml", "");
    write(dir.path(), "_build/out.xml", "");
    write(dir.path(), ".git/HEAD", "");
    write(dir.path(), "README", "");

    let diagnostics = Diagnostics::new();
    let filter = FileFilter::with_default_pattern(&diagnostics);
    let files = find_files(&dir_str(&dir), &diagnostics, Some(&filter)).unwrap();

    assert_eq!(
        files,
        vec![
            "README".to_string(),
            build_path(&["layout", "main.xml"]),
            build_path(&["values", "strings.xml"]),
        ]
    );
    // Silent tokens matched everything that was dropped.
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_find_files_without_filter() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a/b/c.txt", "");
    write(dir.path(), "root.txt", "");

    let diagnostics = Diagnostics::new();
    let files = find_files(&dir_str(&dir), &diagnostics, None).unwrap();
    assert_eq!(files, vec!["root.txt".to_string(), build_path(&["a", "b", "c.txt"])]);
}

#[test]
fn test_find_files_missing_directory() {
    let dir = TempDir::new().unwrap();
    let missing = build_path(&[dir_str(&dir), "missing".to_string()]);

    let diagnostics = Diagnostics::new();
    assert!(find_files(&missing, &diagnostics, None).is_err());
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(
        diagnostics.errors()[0].source.as_ref().unwrap().path,
        missing
    );
}

#[test]
fn test_file_reference_reads_attached_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "icon.png", "\u{89}PNG");
    let file: Arc<dyn InputFile> = Arc::new(RegularFile::new(dir.path().join("icon.png")));

    let table = ResourceTableBuilder::new()
        .add_file_reference("app:drawable/icon", "res/drawable/icon.png", Some(file))
        .build();

    let reference = get_value::<FileReference>(&table, "app:drawable/icon").unwrap();
    assert_eq!(reference.path.as_str(), "res/drawable/icon.png");
    let attached = reference.file.as_ref().unwrap();
    assert!(attached.source().path.ends_with("icon.png"));
    assert_eq!(attached.open_as_data().unwrap().data(), "\u{89}PNG".as_bytes());
}
