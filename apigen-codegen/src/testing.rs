//! Test utilities for code generators.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{path::Path, process::Command};

use eyre::{Result, eyre};

/// Error from syntax checking generated sources.
#[derive(Debug)]
pub struct CheckError {
    pub message: String,
    pub output: String,
}

impl std::fmt::Display for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n\nOutput:\n{}", self.message, self.output)
    }
}

impl std::error::Error for CheckError {}

/// Trait for verifying generated sources are well formed.
pub trait SourceChecker {
    /// Name of the external tool, used to skip checks when it is missing.
    fn tool(&self) -> &'static str;

    /// Check the sources in the given directory.
    fn check(&self, dir: &Path) -> Result<(), CheckError>;

    /// Whether the external tool can be run on this machine.
    fn is_available(&self) -> bool {
        Command::new(self.tool()).arg("-h").output().is_ok()
    }
}

/// Go syntax checker using `gofmt -l -e`.
///
/// `gofmt` parses every file without resolving imports, so the generated
/// package can be checked without the goa runtime on the GOPATH. Only syntax
/// errors fail the check; column alignment is left to `gofmt -w`.
pub struct GoFmtChecker;

impl SourceChecker for GoFmtChecker {
    fn tool(&self) -> &'static str {
        "gofmt"
    }

    fn check(&self, dir: &Path) -> Result<(), CheckError> {
        let output = Command::new("gofmt")
            .args(["-l", "-e", "."])
            .current_dir(dir)
            .output()
            .map_err(|e| CheckError {
                message: format!("Failed to run gofmt: {}", e),
                output: String::new(),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if output.status.success() && stderr.trim().is_empty() {
            Ok(())
        } else {
            Err(CheckError {
                message: "gofmt -l -e reported syntax errors".to_string(),
                output: stderr.into_owned(),
            })
        }
    }
}

/// Assert that two strings are equal, with a line diff on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected != actual {
        let expected_lines: Vec<&str> = expected.lines().collect();
        let actual_lines: Vec<&str> = actual.lines().collect();

        let mut diff = String::new();
        let max_lines = expected_lines.len().max(actual_lines.len());

        for i in 0..max_lines {
            let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
            let act = actual_lines.get(i).copied().unwrap_or("<missing>");

            if exp != act {
                diff.push_str(&format!("Line {}:\n", i + 1));
                diff.push_str(&format!("  expected: {}\n", exp));
                diff.push_str(&format!("  actual:   {}\n", act));
            }
        }

        panic!("Content mismatch:\n{}", diff);
    }
}

/// Generate code into a temporary directory and return it.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn generate_to_temp<F>(generate: F) -> Result<tempfile::TempDir>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let temp_dir = tempfile::TempDir::new()?;
    generate(temp_dir.path())?;
    Ok(temp_dir)
}

/// Run a generator and check its output with the given checker.
///
/// Returns `Ok(false)` without generating anything when the checker's tool
/// is not installed.
pub fn assert_generates_valid_code<C>(
    generate: impl FnOnce(&Path) -> Result<()>,
    checker: &C,
) -> Result<bool>
where
    C: SourceChecker,
{
    if !checker.is_available() {
        eprintln!("skipping: {} is not installed", checker.tool());
        return Ok(false);
    }

    let temp_dir = generate_to_temp(generate)?;

    checker.check(temp_dir.path()).map_err(|e| {
        eprintln!("Generated files in {}:", temp_dir.path().display());
        print_dir(temp_dir.path(), 0);
        eyre!("Source check failed: {}", e)
    })?;

    Ok(true)
}

fn print_dir(dir: &Path, indent: usize) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if path.is_dir() {
            eprintln!("{:indent$}{}/", "", name, indent = indent);
            print_dir(&path, indent + 2);
        } else {
            eprintln!("{:indent$}{}", "", name, indent = indent);
            if let Ok(content) = std::fs::read_to_string(&path) {
                for (i, line) in content.lines().enumerate() {
                    eprintln!("{:indent$}{:4} | {}", "", i + 1, line, indent = indent);
                }
            }
        }
    }
}
