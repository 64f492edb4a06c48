/*!
 * Common test utilities for the tweeguard test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A small source passage pair used across the workflow tests
pub const SOURCE_TWEE: &str = ":: Bird Hunt Intro
You spot a hawk circling overhead.
<<set $bird.hunts to 1>>

[[Chase the hawk|Bird Hunt Chase]]

:: Bird Hunt Chase
The Hawk dives at you.
<<if $bird.hunts gte 1>>You are ready.<</if>>
";

/// A faithful translation of [`SOURCE_TWEE`]
pub const GOOD_CANDIDATE_TWEE: &str = ":: Bird Hunt Intro
머리 위를 맴도는 매가 보인다.
<<set $bird.hunts to 1>>

[[매를 쫓는다|Bird Hunt Chase]]

:: Bird Hunt Chase
매가 당신을 향해 낙하한다.
<<if $bird.hunts gte 1>>당신은 준비되어 있다.<</if>>
";

/// A glossary matching the sample passages
pub const GLOSSARY: &str = "# creatures
Hawk : 매
Great Hawk : 거대 매
";

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
