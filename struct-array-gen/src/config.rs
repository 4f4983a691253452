//! Manifest file read by the command-line generator.
//!
//! ```toml
//! [generator]
//! out_dir = "src/generated"
//! workers = 4
//!
//! [[struct_array]]
//! name = "Vec3Storage"
//! namespace = "geometry"
//! size = 3
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;
use crate::merge::MAX_WORKERS;

/// The `[generator]` table. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory the document is written to, relative to the manifest.
    pub out_dir: Option<PathBuf>,
    /// File name of the document. Defaults to
    /// [`OUTPUT_FILE_NAME`](crate::sink::OUTPUT_FILE_NAME).
    pub file_name: Option<String>,
    /// Worker threads used for synthesis, at most
    /// [`MAX_WORKERS`](crate::merge::MAX_WORKERS). Defaults to the number of
    /// CPUs.
    pub workers: Option<usize>,
    /// Extra derive paths added to every generated type.
    pub extra_derives: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Raw `[[struct_array]]` tables. They are decoded by extraction, not by
    /// serde, so that type mismatches surface as schema violations.
    #[serde(default, rename = "struct_array")]
    pub entries: Vec<toml::Table>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Manifest {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut manifest = Self::parse(&text, path)?;
        manifest.path = Some(path.to_path_buf());
        Ok(manifest)
    }

    /// Parse manifest text. `origin` is only used in error messages.
    pub fn parse(text: &str, origin: impl AsRef<Path>) -> Result<Self, Error> {
        let origin = origin.as_ref();
        let manifest: Self = toml::from_str(text).map_err(|source| Error::Manifest {
            path: origin.to_path_buf(),
            source,
        })?;
        if let Some(workers) = manifest.generator.workers {
            if !(1..=MAX_WORKERS).contains(&workers) {
                return Err(Error::WorkerCount {
                    path: origin.to_path_buf(),
                    value: workers,
                    max: MAX_WORKERS,
                });
            }
        }
        Ok(manifest)
    }

    /// Path the manifest was loaded from, if it came from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Output directory: `[generator] out_dir` resolved against the
    /// manifest's directory, or the manifest's directory itself.
    pub fn out_dir(&self) -> PathBuf {
        let base = self
            .path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default();
        match &self.generator.out_dir {
            Some(dir) => base.join(dir),
            None => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generator_table_and_entries() {
        let manifest = Manifest::parse(
            r#"
            [generator]
            out_dir = "generated"
            workers = 2
            extra_derives = ["::serde::Serialize"]

            [[struct_array]]
            name = "Vec3Storage"
            namespace = "geometry"
            size = 3

            [[struct_array]]
            name = "Pair"
            namespace = "geometry"
            size = 2
            "#,
            "inline.toml",
        )
        .unwrap();

        assert_eq!(manifest.generator.workers, Some(2));
        assert_eq!(manifest.generator.extra_derives, vec!["::serde::Serialize"]);
        assert_eq!(manifest.entries.len(), 2);
        assert_eq!(manifest.out_dir(), PathBuf::from("generated"));
    }

    #[test]
    fn everything_is_optional() {
        let manifest = Manifest::parse("", "empty.toml").unwrap();
        assert_eq!(manifest.generator, GeneratorConfig::default());
        assert!(manifest.entries.is_empty());
    }

    #[test]
    fn worker_count_must_be_sane() {
        for workers in [0, MAX_WORKERS + 1, 1_000_000] {
            let text = format!("[generator]\nworkers = {workers}\n");
            match Manifest::parse(&text, "workers.toml") {
                Err(Error::WorkerCount { value, .. }) => assert_eq!(value, workers),
                other => panic!("expected a worker count error, got {other:?}"),
            }
        }
        let ok = Manifest::parse(&format!("[generator]\nworkers = {MAX_WORKERS}\n"), "ok.toml");
        assert_eq!(ok.unwrap().generator.workers, Some(MAX_WORKERS));
    }

    #[test]
    fn unknown_generator_keys_are_rejected() {
        let err = Manifest::parse("[generator]\nthreads = 3\n", "bad.toml").unwrap_err();
        assert!(matches!(err, Error::Manifest { .. }));
    }
}
