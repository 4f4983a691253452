//! Per-slot line templates.
//!
//! Each helper appends one line per slot to `out`.

use std::fmt::{self, Write};

pub(crate) fn fields(out: &mut String, size: usize, element: &str) -> fmt::Result {
    for i in 0..size {
        writeln!(out, "    _value{i}: {element},")?;
    }
    Ok(())
}

pub(crate) fn from_fn_slots(out: &mut String, size: usize) -> fmt::Result {
    for i in 0..size {
        writeln!(out, "            _value{i}: f({i}),")?;
    }
    Ok(())
}

pub(crate) fn get_arms(out: &mut String, size: usize) -> fmt::Result {
    for i in 0..size {
        writeln!(
            out,
            "            {i} => ::core::option::Option::Some(&self._value{i}),"
        )?;
    }
    out.push_str("            _ => ::core::option::Option::None,\n");
    Ok(())
}

pub(crate) fn get_mut_arms(out: &mut String, size: usize) -> fmt::Result {
    for i in 0..size {
        writeln!(
            out,
            "            {i} => ::core::option::Option::Some(&mut self._value{i}),"
        )?;
    }
    out.push_str("            _ => ::core::option::Option::None,\n");
    Ok(())
}

pub(crate) fn set_arms(out: &mut String, size: usize) -> fmt::Result {
    for i in 0..size {
        writeln!(
            out,
            "            {i} => ::core::result::Result::Ok(::core::mem::replace(&mut self._value{i}, value)),"
        )?;
    }
    writeln!(
        out,
        "            _ => ::core::result::Result::Err(::struct_array::IndexOutOfRange::new(index, {size})),"
    )
}

pub(crate) fn debug_entries(out: &mut String, size: usize) -> fmt::Result {
    for i in 0..size {
        writeln!(out, "            .entry(&self._value{i})")?;
    }
    Ok(())
}

/// `self._value0, self._value1, ..` with an optional per-item suffix such as
/// `.clone()`.
pub(crate) fn slot_list(out: &mut String, size: usize, suffix: &str) -> fmt::Result {
    for i in 0..size {
        if i > 0 {
            out.push_str(", ");
        }
        write!(out, "self._value{i}{suffix}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_field_line_per_slot() {
        let mut out = String::new();
        fields(&mut out, 2, "T").unwrap();
        assert_eq!(out, "    _value0: T,\n    _value1: T,\n");
    }

    #[test]
    fn get_arms_end_with_fallback() {
        let mut out = String::new();
        get_arms(&mut out, 1).unwrap();
        assert_eq!(
            out,
            "            0 => ::core::option::Option::Some(&self._value0),\n            _ => ::core::option::Option::None,\n"
        );
    }

    #[test]
    fn set_fallback_reports_length() {
        let mut out = String::new();
        set_arms(&mut out, 3).unwrap();
        assert!(out.ends_with(
            "_ => ::core::result::Result::Err(::struct_array::IndexOutOfRange::new(index, 3)),\n"
        ));
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn slot_list_is_comma_separated() {
        let mut out = String::new();
        slot_list(&mut out, 3, ".clone()").unwrap();
        assert_eq!(
            out,
            "self._value0.clone(), self._value1.clone(), self._value2.clone()"
        );
    }
}
