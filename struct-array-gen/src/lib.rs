//! Build-time generator for fixed-capacity struct array types.
//!
//! A generation pass runs four stages:
//!
//! 1. [`discover`] asks a [`Scanner`] for every declaration tagged with
//!    `struct_array`,
//! 2. [`extract`] decodes each occurrence into a [`GenerationRequest`],
//! 3. [`merge::synthesize_all`] renders the requests on a worker pool into an
//!    [`OutputDocument`],
//! 4. the rendered document is handed to an [`OutputSink`].
//!
//! ```
//! use struct_array_gen::{Generator, Manifest, MemorySink};
//!
//! let manifest = Manifest::parse(
//!     r#"
//!     [[struct_array]]
//!     name = "Vec3Storage"
//!     namespace = "geometry"
//!     size = 3
//!     "#,
//!     "demo.toml",
//! )?;
//! let mut sink = MemorySink::default();
//! let count = Generator::new().workers(1).run(&manifest, &mut sink)?;
//! assert_eq!(count, 1);
//! assert!(sink.sources[0].1.contains("pub struct Vec3Storage<T>"));
//! # Ok::<(), struct_array_gen::Error>(())
//! ```

pub mod config;
pub mod discover;
pub mod emit;
pub mod error;
pub mod extract;
pub mod ir;
pub mod merge;
pub mod scan;
pub mod sink;

pub use config::{GeneratorConfig, Manifest};
pub use discover::discover;
pub use emit::EmitOptions;
pub use error::{Error, SchemaError, SchemaErrorKind};
pub use extract::extract;
pub use ir::{ArgValue, AttributeOccurrence, AttributeTag, GenerationRequest, Namespace, Shape};
pub use merge::OutputDocument;
pub use scan::Scanner;
pub use sink::{FileSink, MemorySink, OutputSink, OUTPUT_FILE_NAME};

use tracing::{debug, info};

/// Drives one generation pass over the named-type shape.
#[derive(Debug, Clone)]
pub struct Generator {
    options: EmitOptions,
    workers: usize,
    file_name: String,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            options: EmitOptions::default(),
            workers: num_cpus::get(),
            file_name: OUTPUT_FILE_NAME.to_owned(),
        }
    }
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the `[generator]` table of a manifest. Unset keys keep their
    /// defaults.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let mut generator = Self::new();
        if let Some(workers) = config.workers {
            generator.workers = workers;
        }
        if let Some(file_name) = &config.file_name {
            generator.file_name = file_name.clone();
        }
        generator.options.extra_derives = config.extra_derives.clone();
        generator
    }

    /// Worker threads used for synthesis. The pool never starts more threads
    /// than there are requests or [`merge::MAX_WORKERS`]; `0` means `1`.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn extra_derive(mut self, path: impl Into<String>) -> Self {
        self.options.extra_derives.push(path.into());
        self
    }

    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Discover, extract and synthesize. Returns `None` when nothing is
    /// tagged, so callers register no source at all.
    pub fn generate<S: Scanner + ?Sized>(&self, scanner: &S) -> Result<Option<String>, Error> {
        let requests = discover(scanner, Shape::Named)?;
        if requests.is_empty() {
            debug!("no struct arrays requested");
            return Ok(None);
        }
        let document = merge::synthesize_all(requests, &self.options, self.workers)?;
        Ok(Some(document.render()))
    }

    /// Run a full pass and hand the document to `sink`. Returns the number of
    /// generated types.
    pub fn run<S, K>(&self, scanner: &S, sink: &mut K) -> Result<usize, Error>
    where
        S: Scanner + ?Sized,
        K: OutputSink + ?Sized,
    {
        let requests = discover(scanner, Shape::Named)?;
        if requests.is_empty() {
            info!("no struct arrays requested, nothing written");
            return Ok(0);
        }
        let document = merge::synthesize_all(requests, &self.options, self.workers)?;
        sink.add_source(&self.file_name, &document.render())?;
        info!(
            types = document.len(),
            file = %self.file_name,
            "generated struct arrays"
        );
        Ok(document.len())
    }
}
