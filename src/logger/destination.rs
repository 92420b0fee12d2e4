//! Log destinations.
//!
//! # Responsibilities
//! - Describe where formatted lines go (stdout, stderr, a file, any writer)
//! - Open the destination into a writable sink
//!
//! # Design Decisions
//! - Files are created if missing and always opened for append
//! - A freshly created file starts with a one-line header comment

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::LogResult;

/// Program name written into the header of new log files.
pub const PROGRAM_NAME: &str = "correlation-log";

/// Where log lines are written.
pub enum Destination {
    Stdout,
    Stderr,
    File(PathBuf),
    Writer(Box<dyn Write + Send>),
}

impl Destination {
    /// Wrap an arbitrary writer.
    pub fn writer<W: Write + Send + 'static>(writer: W) -> Self {
        Destination::Writer(Box::new(writer))
    }

    /// Interpret a configuration value: `stdout`, `stderr` or a file path.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "stdout" | "-" => Destination::Stdout,
            "stderr" => Destination::Stderr,
            path => Destination::File(PathBuf::from(path)),
        }
    }

    /// Open the destination.
    ///
    /// `header_timestamp` is used for the header line of newly created files.
    pub(crate) fn open(self, header_timestamp: &str) -> LogResult<Box<dyn Write + Send>> {
        match self {
            Destination::Stdout => Ok(Box::new(io::stdout())),
            Destination::Stderr => Ok(Box::new(io::stderr())),
            Destination::Writer(writer) => Ok(writer),
            Destination::File(path) => open_file(&path, header_timestamp),
        }
    }
}

impl std::fmt::Debug for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Stdout => f.write_str("Stdout"),
            Destination::Stderr => f.write_str("Stderr"),
            Destination::File(path) => f.debug_tuple("File").field(path).finish(),
            Destination::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

impl From<PathBuf> for Destination {
    fn from(path: PathBuf) -> Self {
        Destination::File(path)
    }
}

impl From<&Path> for Destination {
    fn from(path: &Path) -> Self {
        Destination::File(path.to_path_buf())
    }
}

impl From<&str> for Destination {
    fn from(value: &str) -> Self {
        Destination::parse(value)
    }
}

fn open_file(path: &Path, header_timestamp: &str) -> LogResult<Box<dyn Write + Send>> {
    let created = !path.exists();
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    if created {
        writeln!(file, "# Logfile created on {header_timestamp} by {PROGRAM_NAME}")?;
        file.flush()?;
        tracing::debug!(path = %path.display(), "Created log file");
    }

    Ok(Box::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parse_well_known_names() {
        assert!(matches!(Destination::parse("stdout"), Destination::Stdout));
        assert!(matches!(Destination::parse("stderr"), Destination::Stderr));
        assert!(matches!(
            Destination::parse("/var/log/app.log"),
            Destination::File(p) if p == Path::new("/var/log/app.log")
        ));
    }

    #[test]
    fn new_file_gets_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        let mut sink = Destination::from(path.as_path()).open("T1").unwrap();
        sink.write_all(b"first\n").unwrap();
        drop(sink);

        let mut sink = Destination::from(path.clone()).open("T2").unwrap();
        sink.write_all(b"second\n").unwrap();
        drop(sink);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "# Logfile created on T1 by correlation-log\nfirst\nsecond\n"
        );
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("app.log");

        let result = Destination::File(path).open("T");
        assert!(matches!(result, Err(crate::error::LogError::Io(_))));
    }
}
