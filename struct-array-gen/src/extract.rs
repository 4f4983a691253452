//! Decoding of a single attribute occurrence into a [`GenerationRequest`].

use std::num::NonZeroU8;

use tracing::debug;

use crate::emit::DEFAULT_ELEMENT;
use crate::error::{SchemaError, SchemaErrorKind};
use crate::ir::{
    is_identifier, ArgKind, ArgValue, AttributeOccurrence, GenerationRequest, Namespace, Shape,
};

/// Tag name matched against the last segment of every attribute path.
pub const ATTRIBUTE_NAME: &str = "struct_array";

/// Fully-qualified tag name scanners are asked for.
pub const FULL_ATTRIBUTE_NAME: &str = "struct_array::struct_array";

/// Decode `occurrence` according to `shape`.
///
/// Returns `Ok(None)` when the declaration does not carry the tag or when the
/// size argument is `0` (generation disabled). Any argument that does not
/// match the positional schema is a [`SchemaError`].
pub fn extract(
    occurrence: &AttributeOccurrence,
    shape: Shape,
) -> Result<Option<GenerationRequest>, SchemaError> {
    let Some(tag) = occurrence
        .attributes
        .iter()
        .find(|tag| tag.name() == ATTRIBUTE_NAME)
    else {
        debug!(declaration = %occurrence.declaration, "no struct_array attribute");
        return Ok(None);
    };

    let err = |kind| SchemaError {
        declaration: occurrence.declaration.clone(),
        attribute: tag.path.clone(),
        kind,
    };

    if tag.args.len() != shape.arity() {
        return Err(err(SchemaErrorKind::ArgumentCount {
            expected: shape.arity(),
            found: tag.args.len(),
        }));
    }

    let size = decode_size(&tag.args, shape.size_index()).map_err(err)?;
    let Some(size) = NonZeroU8::new(size) else {
        debug!(declaration = %occurrence.declaration, "size is 0, generation disabled");
        return Ok(None);
    };

    let request = match shape {
        Shape::Named => {
            let name = decode_str(&tag.args, 0).map_err(err)?;
            let namespace = decode_str(&tag.args, 1).map_err(err)?;
            let name = validate_name(name).map_err(err)?;
            // Named containers are generic over `T`, which would shadow the type.
            if name == DEFAULT_ELEMENT {
                return Err(err(SchemaErrorKind::InvalidName { value: name }));
            }
            GenerationRequest::new(name, Namespace::parse(namespace).map_err(err)?, size)
        }
        Shape::Inline => GenerationRequest::new(
            validate_name(&occurrence.declaration).map_err(err)?,
            Namespace::root(),
            size,
        ),
    };
    Ok(Some(request))
}

fn argument(args: &[ArgValue], index: usize) -> Result<&ArgValue, SchemaErrorKind> {
    args.get(index).ok_or(SchemaErrorKind::ArgumentCount {
        expected: index + 1,
        found: args.len(),
    })
}

fn decode_str(args: &[ArgValue], index: usize) -> Result<&str, SchemaErrorKind> {
    match argument(args, index)? {
        ArgValue::Str(value) => Ok(value),
        other => Err(SchemaErrorKind::TypeMismatch {
            index,
            expected: ArgKind::Str,
            found: other.kind(),
        }),
    }
}

fn decode_size(args: &[ArgValue], index: usize) -> Result<u8, SchemaErrorKind> {
    match argument(args, index)? {
        ArgValue::Int(value) => {
            u8::try_from(*value).map_err(|_| SchemaErrorKind::SizeOutOfRange { value: *value })
        }
        other => Err(SchemaErrorKind::TypeMismatch {
            index,
            expected: ArgKind::Int,
            found: other.kind(),
        }),
    }
}

fn validate_name(name: &str) -> Result<String, SchemaErrorKind> {
    let name = name.trim();
    if is_identifier(name) {
        Ok(name.to_owned())
    } else {
        Err(SchemaErrorKind::InvalidName {
            value: name.to_owned(),
        })
    }
}
