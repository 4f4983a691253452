//! Collecting validated requests from a scanner.

use std::collections::HashSet;

use tracing::debug;

use crate::error::Error;
use crate::extract::{extract, FULL_ATTRIBUTE_NAME};
use crate::ir::{GenerationRequest, Shape};
use crate::scan::Scanner;

/// Run extraction over every occurrence `scanner` reports and collect the
/// resulting requests in discovery order.
///
/// Disabled and untagged occurrences are skipped. A schema violation, or two
/// requests for the same `namespace::Name`, aborts discovery.
pub fn discover<S: Scanner + ?Sized>(
    scanner: &S,
    shape: Shape,
) -> Result<Vec<GenerationRequest>, Error> {
    let occurrences = scanner.occurrences(FULL_ATTRIBUTE_NAME)?;
    let mut seen = HashSet::with_capacity(occurrences.len());
    let mut requests = Vec::with_capacity(occurrences.len());

    for occurrence in &occurrences {
        let Some(request) = extract(occurrence, shape)? else {
            debug!(declaration = %occurrence.declaration, "skipped");
            continue;
        };
        if !seen.insert((request.namespace.clone(), request.name.clone())) {
            return Err(Error::DuplicateType(request.qualified_name()));
        }
        requests.push(request);
    }

    debug!(
        found = occurrences.len(),
        requests = requests.len(),
        "discovery finished"
    );
    Ok(requests)
}
