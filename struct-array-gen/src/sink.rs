//! Where finished documents go.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Error;

/// Default name of the generated document.
pub const OUTPUT_FILE_NAME: &str = "struct_array.g.rs";

/// Accepts a named text artifact and registers it with the build.
pub trait OutputSink {
    fn add_source(&mut self, name: &str, text: &str) -> Result<(), Error>;
}

/// Writes each source into a directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl OutputSink for FileSink {
    fn add_source(&mut self, name: &str, text: &str) -> Result<(), Error> {
        let write_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| Error::Write { path, source }
        };
        if !self.dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.dir).map_err(write_err(&self.dir))?;
        }
        let path = self.dir.join(name);
        fs::write(&path, text).map_err(write_err(&path))?;
        info!(path = %path.display(), bytes = text.len(), "wrote generated source");
        Ok(())
    }
}

/// Keeps every source in memory, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    pub sources: Vec<(String, String)>,
}

impl OutputSink for MemorySink {
    fn add_source(&mut self, name: &str, text: &str) -> Result<(), Error> {
        self.sources.push((name.to_owned(), text.to_owned()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sink_creates_missing_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("generated");
        let mut sink = FileSink::new(&dir);
        sink.add_source(OUTPUT_FILE_NAME, "// hello\n").unwrap();
        let written = fs::read_to_string(dir.join(OUTPUT_FILE_NAME)).unwrap();
        assert_eq!(written, "// hello\n");
    }

    #[test]
    fn file_sink_reports_the_failing_path() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        fs::write(&blocker, "").unwrap();
        // A regular file where the directory should be.
        let mut sink = FileSink::new(&blocker);
        match sink.add_source(OUTPUT_FILE_NAME, "") {
            Err(Error::Write { path, .. }) => assert_eq!(path, blocker),
            other => panic!("expected a write error, got {other:?}"),
        }
    }

    #[test]
    fn memory_sink_records_in_order() {
        let mut sink = MemorySink::default();
        sink.add_source("a.rs", "a").unwrap();
        sink.add_source("b.rs", "b").unwrap();
        assert_eq!(
            sink.sources,
            vec![("a.rs".into(), "a".into()), ("b.rs".into(), "b".into())]
        );
    }
}
