//! Token-level glue between the macro entry points and `struct-array-gen`.

use proc_macro2::{Span, TokenStream};
use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Fields, GenericParam, ItemStruct, Path, Token};

use struct_array_gen::emit::{self, Declaration, EmitOptions, DEFAULT_DERIVES, DEFAULT_ELEMENT};
use struct_array_gen::scan::tokens;
use struct_array_gen::{extract, Error, Generator, Shape};

/// Expand `#[struct_array(size)] struct Name<T>;` in place.
pub fn inline(args: TokenStream, item: ItemStruct) -> syn::Result<TokenStream> {
    let element = check_declaration(&item)?;
    let args_span = args.span();

    let occurrence = tokens::parse_inline(args, &item.ident.to_string())?;
    let request = match extract(&occurrence, Shape::Inline) {
        Ok(Some(request)) => request,
        // Size 0: generation disabled, keep the declaration as written.
        Ok(None) => return Ok(item.into_token_stream()),
        Err(err) => return Err(syn::Error::new(args_span, err)),
    };

    let visibility = item.vis.to_token_stream().to_string();
    let (attributes, options) = split_derives(&item.attrs)?;
    let text = emit::render(
        &Declaration {
            request: &request,
            visibility: &visibility,
            element: &element,
            attributes: &attributes,
        },
        &options,
    );
    reparse(&text, item.ident.span())
}

/// Expand `struct_arrays! { ("Name", "namespace", size), .. }`.
pub fn named(input: TokenStream) -> syn::Result<TokenStream> {
    let entries = tokens::parse_named(input)?;
    let occurrences: Vec<_> = entries
        .iter()
        .map(|entry| entry.occurrence.clone())
        .collect();

    // One worker keeps the expansion identical across builds.
    match Generator::new().workers(1).generate(occurrences.as_slice()) {
        Ok(Some(text)) => reparse(&text, Span::call_site()),
        Ok(None) => Ok(TokenStream::new()),
        Err(Error::Schema(err)) => {
            let span = entries
                .iter()
                .find(|entry| entry.occurrence.declaration == err.declaration)
                .map_or_else(Span::call_site, |entry| entry.span);
            Err(syn::Error::new(span, err))
        }
        Err(err) => Err(syn::Error::new(Span::call_site(), err)),
    }
}

/// The annotated struct only names the type: no fields, at most one type
/// parameter and nothing the template cannot carry over. Returns the element
/// parameter name.
fn check_declaration(item: &ItemStruct) -> syn::Result<String> {
    let empty = match &item.fields {
        Fields::Unit => true,
        Fields::Named(fields) => fields.named.is_empty(),
        Fields::Unnamed(fields) => fields.unnamed.is_empty(),
    };
    if !empty {
        return Err(syn::Error::new(
            item.fields.span(),
            "#[struct_array] generates the fields; declare the struct without any",
        ));
    }
    if let Some(where_clause) = &item.generics.where_clause {
        return Err(syn::Error::new(
            where_clause.span(),
            "#[struct_array] does not support where clauses",
        ));
    }

    let mut params = item.generics.params.iter();
    let element = match (params.next(), params.next()) {
        (None, _) => DEFAULT_ELEMENT.to_owned(),
        (Some(GenericParam::Type(param)), None)
            if param.bounds.is_empty() && param.default.is_none() && param.attrs.is_empty() =>
        {
            param.ident.to_string()
        }
        (Some(param), None) => {
            return Err(syn::Error::new(
                param.span(),
                "expected a single plain type parameter for the element type",
            ))
        }
        (Some(_), Some(extra)) => {
            return Err(syn::Error::new(
                extra.span(),
                "#[struct_array] takes at most one type parameter",
            ))
        }
    };
    if item.ident == element {
        return Err(syn::Error::new(
            item.ident.span(),
            format!(
                "`{element}` is also the element type parameter; \
                 name the parameter differently, e.g. `struct {element}<E>;`"
            ),
        ));
    }
    Ok(element)
}

/// Separate `#[derive(..)]` from the attributes forwarded verbatim. Derives
/// the container already has (including `Debug`) are dropped, the rest are
/// appended to the generated derive list.
fn split_derives(attrs: &[Attribute]) -> syn::Result<(Vec<String>, EmitOptions)> {
    let mut forwarded = Vec::new();
    let mut options = EmitOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("derive") {
            forwarded.push(attr.to_token_stream().to_string());
            continue;
        }
        let paths = attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;
        for path in paths {
            let builtin = path.segments.last().is_some_and(|segment| {
                segment.ident == "Debug" || DEFAULT_DERIVES.iter().any(|d| segment.ident == *d)
            });
            let path = path.to_token_stream().to_string();
            if !builtin && !options.extra_derives.contains(&path) {
                options.extra_derives.push(path);
            }
        }
    }
    Ok((forwarded, options))
}

fn reparse(text: &str, span: Span) -> syn::Result<TokenStream> {
    text.parse::<TokenStream>().map_err(|err| {
        syn::Error::new(span, format!("struct array expansion is not valid Rust: {err}"))
    })
}
