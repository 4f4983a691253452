//! Textual synthesis of one fixed-capacity container type.
//!
//! The output is plain Rust source assembled from string templates. Every
//! container has `size` named slots (`_value0`, `_value1`, ..), a `LENGTH`
//! constant and strict bounds checking:
//!
//! * `get` / `get_mut` return `None` for an index outside `0..LENGTH`,
//! * `set` returns `Err(IndexOutOfRange)`,
//! * `Index` / `IndexMut` panic with the `IndexOutOfRange` message.
//!
//! Generated code refers to the `struct_array` runtime crate by absolute
//! path, so it can be dropped into any module.

mod template;

use std::fmt::{self, Write};

use crate::ir::{GenerationRequest, Namespace};

/// Derives every generated container carries.
pub const DEFAULT_DERIVES: &[&str] = &["Clone", "Copy", "Default", "PartialEq", "Eq", "Hash"];

/// Element type parameter used when the declaration does not name one.
pub const DEFAULT_ELEMENT: &str = "T";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// Additional derive paths appended after [`DEFAULT_DERIVES`], e.g.
    /// `::serde::Serialize`.
    pub extra_derives: Vec<String>,
}

/// Everything the template needs besides the request itself.
#[derive(Debug, Clone, Copy)]
pub struct Declaration<'a> {
    pub request: &'a GenerationRequest,
    /// Visibility tokens, e.g. `pub` or `pub(crate)`. Empty means private.
    pub visibility: &'a str,
    /// Name of the element type parameter.
    pub element: &'a str,
    /// Outer attributes forwarded verbatim (doc comments, `cfg`, ..).
    pub attributes: &'a [String],
}

impl<'a> Declaration<'a> {
    /// A `pub` container generic over `T`, as used by the named-type shape.
    pub fn public(request: &'a GenerationRequest) -> Self {
        Self {
            request,
            visibility: "pub",
            element: DEFAULT_ELEMENT,
            attributes: &[],
        }
    }
}

/// Generated text of one container plus the namespace it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedDefinition {
    pub namespace: Namespace,
    pub text: String,
}

/// Synthesize the public container described by `request`.
pub fn synthesize(request: &GenerationRequest, options: &EmitOptions) -> SynthesizedDefinition {
    SynthesizedDefinition {
        namespace: request.namespace.clone(),
        text: render(&Declaration::public(request), options),
    }
}

/// Render the full source text for `decl`. Pure: equal inputs give
/// byte-identical output.
pub fn render(decl: &Declaration<'_>, options: &EmitOptions) -> String {
    let mut out = String::with_capacity(2048 + decl.request.len() * 512);
    // Formatting into a `String` cannot fail.
    let _ = write_definition(&mut out, decl, options);
    out
}

fn write_definition(
    out: &mut String,
    decl: &Declaration<'_>,
    options: &EmitOptions,
) -> fmt::Result {
    let name = decl.request.name.as_str();
    let size = decl.request.len();
    let t = decl.element;
    let ty = format!("{name}<{t}>");

    // Type declaration.
    for attr in decl.attributes {
        writeln!(out, "{attr}")?;
    }
    if !decl.attributes.is_empty() {
        out.push_str("///\n");
    }
    writeln!(
        out,
        "/// Fixed-capacity container with {size} inline slot{plural} of `{t}`.",
        plural = if size == 1 { "" } else { "s" },
    )?;
    out.push_str("///\n");
    writeln!(
        out,
        "/// Access is strict: an index outside `0..{size}` makes `get`, `get_mut` and\n\
         /// `set` fail, and makes `Index`/`IndexMut` panic."
    )?;
    let derives = DEFAULT_DERIVES
        .iter()
        .copied()
        .chain(options.extra_derives.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(out, "#[derive({derives})]")?;
    if decl.visibility.is_empty() {
        writeln!(out, "struct {ty} {{")?;
    } else {
        writeln!(out, "{} struct {ty} {{", decl.visibility)?;
    }
    template::fields(out, size, t)?;
    out.push_str("}\n\n");

    // Inherent accessors.
    writeln!(out, "impl<{t}> {ty} {{")?;
    out.push_str("    /// Number of slots.\n");
    writeln!(out, "    pub const LENGTH: usize = {size};\n")?;

    out.push_str("    /// Builds the container by calling `f` once per slot, in index order.\n");
    writeln!(
        out,
        "    pub fn from_fn(mut f: impl ::core::ops::FnMut(usize) -> {t}) -> Self {{"
    )?;
    out.push_str("        Self {\n");
    template::from_fn_slots(out, size)?;
    out.push_str("        }\n    }\n\n");

    out.push_str("    #[inline]\n");
    writeln!(
        out,
        "    pub fn get(&self, index: usize) -> ::core::option::Option<&{t}> {{"
    )?;
    out.push_str("        match index {\n");
    template::get_arms(out, size)?;
    out.push_str("        }\n    }\n\n");

    out.push_str("    #[inline]\n");
    writeln!(
        out,
        "    pub fn get_mut(&mut self, index: usize) -> ::core::option::Option<&mut {t}> {{"
    )?;
    out.push_str("        match index {\n");
    template::get_mut_arms(out, size)?;
    out.push_str("        }\n    }\n\n");

    out.push_str("    /// Stores `value` at `index` and returns the value it replaced.\n");
    out.push_str("    #[inline]\n");
    writeln!(
        out,
        "    pub fn set(&mut self, index: usize, value: {t}) -> ::core::result::Result<{t}, ::struct_array::IndexOutOfRange> {{"
    )?;
    out.push_str("        match index {\n");
    template::set_arms(out, size)?;
    out.push_str("        }\n    }\n\n");

    out.push_str("    /// Moves the slots, in index order, into a `Vec`.\n");
    writeln!(out, "    pub fn into_vec(self) -> ::std::vec::Vec<{t}> {{")?;
    out.push_str("        ::std::vec![");
    template::slot_list(out, size, "")?;
    out.push_str("]\n    }\n\n");

    out.push_str("    /// Clones the slots, in index order, into a `Vec`.\n");
    writeln!(
        out,
        "    pub fn to_vec(&self) -> ::std::vec::Vec<{t}>\n    where\n        {t}: ::core::clone::Clone,\n    {{"
    )?;
    out.push_str("        ::std::vec![");
    template::slot_list(out, size, ".clone()")?;
    out.push_str("]\n    }\n}\n\n");

    // Operator and trait impls.
    writeln!(out, "impl<{t}> ::core::ops::Index<usize> for {ty} {{")?;
    writeln!(out, "    type Output = {t};\n")?;
    out.push_str("    #[inline]\n");
    writeln!(out, "    fn index(&self, index: usize) -> &{t} {{")?;
    writeln!(
        out,
        "        match {name}::get(self, index) {{\n\
         \x20           ::core::option::Option::Some(value) => value,\n\
         \x20           ::core::option::Option::None => ::struct_array::out_of_range(index, {size}),\n\
         \x20       }}\n    }}\n}}\n"
    )?;

    writeln!(out, "impl<{t}> ::core::ops::IndexMut<usize> for {ty} {{")?;
    out.push_str("    #[inline]\n");
    writeln!(out, "    fn index_mut(&mut self, index: usize) -> &mut {t} {{")?;
    writeln!(
        out,
        "        match {name}::get_mut(self, index) {{\n\
         \x20           ::core::option::Option::Some(value) => value,\n\
         \x20           ::core::option::Option::None => ::struct_array::out_of_range(index, {size}),\n\
         \x20       }}\n    }}\n}}\n"
    )?;

    writeln!(
        out,
        "impl<{t}: ::core::fmt::Debug> ::core::fmt::Debug for {ty} {{"
    )?;
    out.push_str(
        "    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {\n        f.debug_list()\n",
    );
    template::debug_entries(out, size)?;
    out.push_str("            .finish()\n    }\n}\n\n");

    writeln!(out, "impl<{t}> ::struct_array::StructArray for {ty} {{")?;
    writeln!(out, "    type Item = {t};\n")?;
    writeln!(out, "    const LENGTH: usize = {size};\n")?;
    out.push_str("    #[inline]\n");
    writeln!(
        out,
        "    fn get(&self, index: usize) -> ::core::option::Option<&{t}> {{\n        {name}::get(self, index)\n    }}\n"
    )?;
    out.push_str("    #[inline]\n");
    writeln!(
        out,
        "    fn get_mut(&mut self, index: usize) -> ::core::option::Option<&mut {t}> {{\n        {name}::get_mut(self, index)\n    }}\n"
    )?;
    writeln!(
        out,
        "    fn into_vec(self) -> ::std::vec::Vec<{t}> {{\n        {name}::into_vec(self)\n    }}\n}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU8;

    fn request(name: &str, namespace: &str, size: u8) -> GenerationRequest {
        GenerationRequest::new(
            name,
            Namespace::parse(namespace).unwrap(),
            NonZeroU8::new(size).unwrap(),
        )
    }

    fn field_lines(text: &str, element: &str) -> usize {
        let suffix = format!(": {element},");
        text.lines()
            .filter(|line| line.starts_with("    _value") && line.ends_with(&suffix))
            .count()
    }

    #[test]
    fn renders_concrete_scenario() {
        let req = request("Vec3Storage", "Geometry", 3);
        let def = synthesize(&req, &EmitOptions::default());
        assert_eq!(def.namespace.to_string(), "geometry");
        let text = def.text;
        assert!(text.contains("pub struct Vec3Storage<T> {"));
        assert!(text.contains("pub const LENGTH: usize = 3;"));
        assert!(text.contains("const LENGTH: usize = 3;"));
        assert_eq!(field_lines(&text, "T"), 3);
        assert!(text.contains("2 => ::core::option::Option::Some(&self._value2),"));
        assert!(!text.contains("_value3"));
        assert!(text.contains("::std::vec![self._value0, self._value1, self._value2]"));
        assert!(text.contains("#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let req = request("Pair", "a.b", 2);
        let options = EmitOptions::default();
        assert_eq!(synthesize(&req, &options), synthesize(&req, &options));
    }

    #[test]
    fn extra_derives_are_appended() {
        let req = request("Pair", "", 2);
        let options = EmitOptions {
            extra_derives: vec!["::serde::Serialize".into()],
        };
        let text = synthesize(&req, &options).text;
        assert!(text.contains("#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, ::serde::Serialize)]"));
    }

    #[test]
    fn inline_declaration_keeps_visibility_element_and_attributes() {
        let req = request("Rgb", "", 3);
        let attributes = vec!["#[doc = \" A colour.\"]".to_string()];
        let decl = Declaration {
            request: &req,
            visibility: "pub(crate)",
            element: "C",
            attributes: &attributes,
        };
        let text = render(&decl, &EmitOptions::default());
        assert!(text.starts_with("#[doc = \" A colour.\"]\n///\n"));
        assert!(text.contains("pub(crate) struct Rgb<C> {"));
        assert!(text.contains("impl<C> ::struct_array::StructArray for Rgb<C> {"));
        assert_eq!(field_lines(&text, "C"), 3);
    }

    #[test]
    fn private_declaration_has_no_visibility_prefix() {
        let req = request("Single", "", 1);
        let decl = Declaration {
            visibility: "",
            ..Declaration::public(&req)
        };
        let text = render(&decl, &EmitOptions::default());
        assert!(text.contains("\nstruct Single<T> {"));
        assert!(text.contains("inline slot of `T`"));
    }
}
