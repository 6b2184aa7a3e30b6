/*!
 * Common test utilities for the subconv test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Two captions in Adobe Encore (line#/tabs/n) layout, the second one on two lines
pub const ADOBE_SAMPLE: &str = "0001 00:00:07:12 00:00:11:03\tFirst line\n\
0002 00:01:48:22 00:01:52:17\t- I need those samples, fast!\n\
\t\t\t\t- Yes, professor.\n";

/// The same captions as SubRip
pub const SRT_SAMPLE: &str = "1\n\
00:00:07,480 --> 00:00:11,120\n\
First line\n\
\n\
2\n\
00:01:48,880 --> 00:01:52,680\n\
- I need those samples, fast!\n\
- Yes, professor.\n\
\n";

/// Route library logging to the test harness; set RUST_LOG to see it
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Split text into owned lines, as a caller of the library would
pub fn lines(text: &str) -> Vec<String> {
    text.lines().map(String::from).collect()
}
