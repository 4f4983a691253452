//! `[[struct_array]]` manifest tables as attribute occurrences.

use tracing::warn;

use super::Scanner;
use crate::config::Manifest;
use crate::error::Error;
use crate::ir::{ArgValue, AttributeOccurrence, AttributeTag};

/// Keys mapped, in this order, onto the named-type positional arguments.
const POSITIONAL_KEYS: [&str; 3] = ["name", "namespace", "size"];

impl Scanner for Manifest {
    fn occurrences(&self, attribute: &str) -> Result<Vec<AttributeOccurrence>, Error> {
        let origin = self
            .path()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "manifest".to_owned());

        Ok(self
            .entries
            .iter()
            .enumerate()
            .map(|(index, table)| {
                let declaration = format!("{origin}: [[struct_array]] #{}", index + 1);
                for key in table.keys() {
                    if !POSITIONAL_KEYS.contains(&key.as_str()) {
                        warn!(%declaration, key = %key, "ignoring unknown key");
                    }
                }
                // Arguments stop at the first missing key so that extraction
                // reports the arity mismatch.
                let args = POSITIONAL_KEYS
                    .iter()
                    .map_while(|key| table.get(*key).map(arg_from_toml))
                    .collect();
                AttributeOccurrence::new(declaration, vec![AttributeTag::new(attribute, args)])
            })
            .collect())
    }
}

fn arg_from_toml(value: &toml::Value) -> ArgValue {
    match value {
        toml::Value::String(s) => ArgValue::Str(s.clone()),
        toml::Value::Integer(i) => ArgValue::Int(i128::from(*i)),
        toml::Value::Boolean(b) => ArgValue::Bool(*b),
        toml::Value::Float(f) => ArgValue::Float(*f),
        other => ArgValue::Other(other.to_string()),
    }
}
