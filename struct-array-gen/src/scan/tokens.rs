//! Attribute occurrences written as Rust tokens, as received by the
//! procedural macros.

use proc_macro2::{Span, TokenStream};
use quote::ToTokens;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Expr, Lit, Token, UnOp};

use crate::extract::ATTRIBUTE_NAME;
use crate::ir::{ArgValue, AttributeOccurrence, AttributeTag};

/// An occurrence plus the span diagnostics about it should point at.
#[derive(Debug, Clone)]
pub struct SpannedOccurrence {
    pub occurrence: AttributeOccurrence,
    pub span: Span,
}

/// Parse `("Name", "namespace", size), ...`. Each tuple is one named-type
/// occurrence, labelled `struct_arrays! entry #N`.
pub fn parse_named(input: TokenStream) -> syn::Result<Vec<SpannedOccurrence>> {
    let entries = Punctuated::<Expr, Token![,]>::parse_terminated.parse2(input)?;
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let args = match entry {
                Expr::Tuple(tuple) => tuple.elems.iter().map(arg_from_expr).collect(),
                Expr::Paren(paren) => vec![arg_from_expr(&paren.expr)],
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "expected a `(name, namespace, size)` tuple",
                    ))
                }
            };
            Ok(SpannedOccurrence {
                occurrence: AttributeOccurrence::new(
                    format!("struct_arrays! entry #{}", index + 1),
                    vec![AttributeTag::new(ATTRIBUTE_NAME, args)],
                ),
                span: entry.span(),
            })
        })
        .collect()
}

/// Parse the arguments of `#[struct_array(..)]` attached to `declaration`.
pub fn parse_inline(args: TokenStream, declaration: &str) -> syn::Result<AttributeOccurrence> {
    let args = Punctuated::<Expr, Token![,]>::parse_terminated.parse2(args)?;
    Ok(AttributeOccurrence::new(
        declaration,
        vec![AttributeTag::new(
            ATTRIBUTE_NAME,
            args.iter().map(arg_from_expr).collect(),
        )],
    ))
}

/// Resolve a literal expression to a typed argument. Non-literals are kept
/// as source text and rejected later by extraction if they are used.
pub fn arg_from_expr(expr: &Expr) -> ArgValue {
    match expr {
        Expr::Lit(lit) => arg_from_lit(&lit.lit, false).unwrap_or_else(|| other(expr)),
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => match &*unary.expr {
            Expr::Lit(lit) => arg_from_lit(&lit.lit, true).unwrap_or_else(|| other(expr)),
            _ => other(expr),
        },
        Expr::Group(group) => arg_from_expr(&group.expr),
        _ => other(expr),
    }
}

fn arg_from_lit(lit: &Lit, negative: bool) -> Option<ArgValue> {
    match lit {
        Lit::Str(s) if !negative => Some(ArgValue::Str(s.value())),
        Lit::Bool(b) if !negative => Some(ArgValue::Bool(b.value)),
        Lit::Int(i) => {
            let value = i.base10_parse::<i128>().ok()?;
            Some(ArgValue::Int(if negative { -value } else { value }))
        }
        Lit::Float(f) => {
            let value = f.base10_parse::<f64>().ok()?;
            Some(ArgValue::Float(if negative { -value } else { value }))
        }
        _ => None,
    }
}

fn other(expr: &Expr) -> ArgValue {
    ArgValue::Other(expr.to_token_stream().to_string())
}
