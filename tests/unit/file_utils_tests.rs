/*!
 * Tests for file utilities
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use subconv::file_utils::FileManager;

use crate::common::{create_temp_dir, create_test_file};

#[test]
fn test_generate_output_path_shouldSwapExtension() {
    let path = FileManager::generate_output_path("/movies/film.en.txt", "/out", ".srt");
    assert_eq!(path, PathBuf::from("/out/film.en.srt"));

    let path = FileManager::generate_output_path("film.srt", "dir", "txt");
    assert_eq!(path, PathBuf::from("dir/film.txt"));
}

#[test]
fn test_read_lines_withBomAndCrlf_shouldReturnCleanLines() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let path = create_test_file(temp_dir.path(), "bom.txt", "\u{feff}first\r\nsecond\r\n")?;

    assert_eq!(FileManager::read_lines(&path)?, vec!["first", "second"]);
    Ok(())
}

#[test]
fn test_read_lines_withInvalidUtf8_shouldReplaceBytes() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let path = temp_dir.path().join("latin1.txt");
    fs::write(&path, b"caf\xe9\nok\n")?;

    let lines = FileManager::read_lines(&path)?;
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "caf\u{fffd}");
    Ok(())
}

#[test]
fn test_read_lines_withMissingFile_shouldFail() {
    assert!(FileManager::read_lines("/definitely/not/here.txt").is_err());
}

#[test]
fn test_write_to_file_shouldCreateParentDirectories() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let path = temp_dir.path().join("a").join("b").join("out.srt");

    FileManager::write_to_file(&path, "content")?;

    assert!(FileManager::file_exists(&path));
    assert!(FileManager::dir_exists(temp_dir.path().join("a")));
    assert_eq!(fs::read_to_string(&path)?, "content");
    Ok(())
}

#[test]
fn test_list_files_shouldRecurseAndSort() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let nested = temp_dir.path().join("nested");
    FileManager::ensure_dir(&nested)?;
    create_test_file(temp_dir.path(), "b.txt", "")?;
    create_test_file(temp_dir.path(), "a.txt", "")?;
    create_test_file(&nested, "c.srt", "")?;

    let files = FileManager::list_files(temp_dir.path())?;
    let names: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(temp_dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, vec!["a.txt", "b.txt", "nested/c.srt"]);
    Ok(())
}

#[test]
fn test_split_lines_shouldMatchReadLines() {
    assert_eq!(FileManager::split_lines("\u{feff}x\ny"), vec!["x", "y"]);
    assert!(FileManager::split_lines("").is_empty());
}
