//! Runs fixture files case by case and reports each result.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use parsecase::{Parser, file_tests};

/// Counts gathered over a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub filtered_out: usize,
    /// Files that could not be read or split into cases.
    pub broken_files: usize,
}

impl Summary {
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.broken_files == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_success() { "ok" } else { "FAILED" };
        write!(
            f,
            "test result: {status}. {} passed; {} failed; {} filtered out",
            self.passed, self.failed, self.filtered_out
        )?;
        if self.broken_files > 0 {
            write!(f, "; {} broken file(s)", self.broken_files)?;
        }
        Ok(())
    }
}

pub struct Runner<'p, P> {
    parser: &'p P,
    filter: Option<String>,
}

impl<'p, P: Parser> Runner<'p, P> {
    pub fn new(parser: &'p P) -> Self {
        Self {
            parser,
            filter: None,
        }
    }

    /// Only run cases whose name contains `filter`.
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    pub fn run_files<W: Write>(&self, files: &[PathBuf], out: &mut W) -> io::Result<Summary> {
        let mut summary = Summary::default();
        for path in files {
            let file_name = path.display().to_string();
            match std::fs::read_to_string(path) {
                Ok(text) => self.run_text(&text, &file_name, out, &mut summary)?,
                Err(e) => {
                    summary.broken_files += 1;
                    writeln!(out, "FAILED {file_name}")?;
                    write_indented(out, &format!("Failed to read file: {e}"))?;
                }
            }
        }
        Ok(summary)
    }

    /// Run every case of one fixture file. A malformed file runs no cases.
    pub fn run_text<W: Write>(
        &self,
        text: &str,
        file_name: &str,
        out: &mut W,
        summary: &mut Summary,
    ) -> io::Result<()> {
        let cases = match file_tests(text, file_name) {
            Ok(cases) => cases,
            Err(e) => {
                summary.broken_files += 1;
                writeln!(out, "FAILED {file_name}")?;
                return write_indented(out, &e.to_string());
            }
        };
        log::debug!("{file_name}: {} case(s)", cases.len());

        for case in cases {
            if let Some(filter) = &self.filter
                && !case.name().contains(filter.as_str())
            {
                summary.filtered_out += 1;
                continue;
            }

            match case.run(self.parser) {
                Ok(()) => {
                    summary.passed += 1;
                    writeln!(out, "ok     {file_name}:{} {}", case.line(), case.name())?;
                }
                Err(e) => {
                    summary.failed += 1;
                    writeln!(out, "FAILED {file_name}:{} {}", case.line(), case.name())?;
                    write_indented(out, &e.to_string())?;
                }
            }
        }
        Ok(())
    }
}

fn write_indented<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    for line in message.trim_start_matches('\n').lines() {
        if line.is_empty() {
            writeln!(out)?;
        } else {
            writeln!(out, "    {line}")?;
        }
    }
    Ok(())
}
