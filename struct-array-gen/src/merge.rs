//! Concurrent synthesis and the shared output document.
//!
//! Every request is rendered on its own pool job. Rendering happens outside
//! the lock; the lock is only held to append the finished text.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use threadpool::ThreadPool;
use tracing::{debug, trace};

use crate::emit::{self, EmitOptions, SynthesizedDefinition};
use crate::error::Error;
use crate::ir::{GenerationRequest, Namespace};

/// Header written at the top of every document.
pub const PROLOGUE: &str = "// @generated by struct-array-gen. Do not edit by hand.\n";

/// Upper bound on synthesis threads accepted from configuration.
pub const MAX_WORKERS: usize = 256;

/// Aggregated text of one generation pass.
///
/// Rust modules cannot be reopened, so definitions are grouped per
/// namespace. Within a namespace they keep arrival order.
#[derive(Debug, Default)]
pub struct OutputDocument {
    sections: BTreeMap<Namespace, Vec<String>>,
    definitions: usize,
}

impl OutputDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, definition: SynthesizedDefinition) {
        self.sections
            .entry(definition.namespace)
            .or_default()
            .push(definition.text);
        self.definitions += 1;
    }

    pub fn len(&self) -> usize {
        self.definitions
    }

    pub fn is_empty(&self) -> bool {
        self.definitions == 0
    }

    /// Render the prologue followed by every section, nesting namespaces as
    /// `pub mod` blocks.
    pub fn render(&self) -> String {
        let mut out = String::from(PROLOGUE);
        let mut open: Vec<&str> = Vec::new();

        for (namespace, definitions) in &self.sections {
            let segments = namespace.segments();
            let common = open
                .iter()
                .zip(segments)
                .take_while(|(open, segment)| **open == segment.as_str())
                .count();

            while open.len() > common {
                open.pop();
                push_indented(&mut out, open.len(), "}\n");
            }
            for segment in &segments[common..] {
                out.push('\n');
                push_indented(&mut out, open.len(), &format!("pub mod {segment} {{\n"));
                open.push(segment);
            }
            for definition in definitions {
                out.push('\n');
                push_indented(&mut out, open.len(), definition);
                if !definition.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
        while !open.is_empty() {
            open.pop();
            push_indented(&mut out, open.len(), "}\n");
        }
        out
    }
}

fn push_indented(out: &mut String, depth: usize, text: &str) {
    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            out.push_str(line.trim_start_matches([' ', '\t']));
        } else {
            for _ in 0..depth {
                out.push_str("    ");
            }
            out.push_str(line);
        }
    }
}

/// Threads actually started for `requests` jobs: never more than there are
/// jobs, never more than [`MAX_WORKERS`], and at least one.
pub fn pool_size(workers: usize, requests: usize) -> usize {
    workers.clamp(1, requests.clamp(1, MAX_WORKERS))
}

/// Render every request on a pool of up to `workers` threads and merge the
/// results.
///
/// With a single worker requests are appended in the order given, which makes
/// the document byte-for-byte reproducible.
pub fn synthesize_all(
    requests: Vec<GenerationRequest>,
    options: &EmitOptions,
    workers: usize,
) -> Result<OutputDocument, Error> {
    let document = Arc::new(Mutex::new(OutputDocument::new()));
    let options = Arc::new(options.clone());
    let threads = pool_size(workers, requests.len());
    debug!(requested = workers, threads, jobs = requests.len(), "starting synthesis pool");
    let pool = ThreadPool::with_name("struct-array-gen".into(), threads);

    for request in requests {
        let document = Arc::clone(&document);
        let options = Arc::clone(&options);
        pool.execute(move || {
            let definition = emit::synthesize(&request, &options);
            trace!(
                ty = %request.qualified_name(),
                bytes = definition.text.len(),
                "synthesized struct array"
            );
            // A poisoned lock means another job panicked mid-append; the
            // pool's panic count reports that below.
            if let Ok(mut document) = document.lock() {
                document.append(definition);
            }
        });
    }
    pool.join();

    if pool.panic_count() > 0 {
        return Err(Error::WorkerPanicked);
    }
    let mut document = document.lock().map_err(|_| Error::WorkerPanicked)?;
    Ok(std::mem::take(&mut *document))
}
