//! Element id construction.
//!
//! Ids look like `<scope>.<name>[.<part>]`. Names are escaped to
//! `[A-Za-z0-9_-]` with every other byte written as `_XX`, so `.` only
//! ever separates segments and two different names never share an id.

use std::fmt::Write;

pub const SEPARATOR: char = '.';

/// Injective escape of a free-form name into id-safe characters.
pub fn escape(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for b in name.bytes() {
        if b.is_ascii_alphanumeric() || b == b'-' {
            out.push(b as char);
        } else {
            let _ = write!(out, "_{:02X}", b);
        }
    }
    out
}

/// Id for `name` inside a family of elements, e.g. `alert.low-battery`.
pub fn scoped(scope: &str, name: &str) -> String {
    format!("{}{}{}", scope, SEPARATOR, escape(name))
}

/// Id of a fixed sub-element of `base`, e.g. `alert.low-battery.close`.
pub fn part(base: &str, part: &str) -> String {
    format!("{}{}{}", base, SEPARATOR, part)
}
