//! Canonical textual representation of values.
//!
//! The same representation names mapping keys inside paths and renders
//! values in reports, so it must be deterministic: strings are quoted with
//! Rust escaping, composites list their contents in enumeration order, and
//! module paths are stripped from type names.

use std::collections::HashSet;
use std::fmt;

use crate::view::{absent, Diffable, View};

/// Render `value` in canonical form.
pub fn repr(value: &dyn Diffable) -> String {
    ReprFormatter::new(value).to_string()
}

/// [`fmt::Display`] adapter producing the canonical form of a value.
pub struct ReprFormatter<'a> {
    value: &'a dyn Diffable,
}

impl<'a> ReprFormatter<'a> {
    pub fn new(value: &'a dyn Diffable) -> Self {
        Self { value }
    }
}

impl fmt::Display for ReprFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = ReprWriter {
            out: f,
            in_progress: HashSet::new(),
        };
        writer.write(self.value)
    }
}

struct ReprWriter<'w, 'f> {
    out: &'w mut fmt::Formatter<'f>,
    in_progress: HashSet<(usize, &'static str)>,
}

impl ReprWriter<'_, '_> {
    fn write(&mut self, value: &dyn Diffable) -> fmt::Result {
        match value.view() {
            View::Invalid | View::Reference(None) => self.out.write_str("None"),
            View::Scalar(scalar) => write!(self.out, "{scalar}"),
            View::Callable => write!(self.out, "<{}>", short_type_name(value.type_name())),
            View::Reference(Some(target)) if ends_in_null(target) => {
                self.out.write_str("Some(")?;
                self.guarded(value, |w| w.write(target))?;
                self.out.write_str(")")
            }
            View::Reference(Some(target)) => self.guarded(value, |w| w.write(target)),
            View::Sequence(seq) => {
                self.out.write_str("[")?;
                for index in 0..seq.len() {
                    if index > 0 {
                        self.out.write_str(", ")?;
                    }
                    self.write(seq.at(index).unwrap_or(absent()))?;
                }
                self.out.write_str("]")
            }
            View::Mapping(map) => {
                self.out.write_str("{")?;
                for (position, (key, item)) in map.entries().into_iter().enumerate() {
                    if position > 0 {
                        self.out.write_str(", ")?;
                    }
                    self.write(key)?;
                    self.out.write_str(": ")?;
                    self.write(item)?;
                }
                self.out.write_str("}")
            }
            View::Record(record) => self.guarded(value, |w| {
                let name = short_type_name(value.type_name());
                let fields = record.field_names();
                let positional = fields.iter().all(|f| f.parse::<usize>().is_ok());

                if fields.is_empty() {
                    return w.out.write_str(&name);
                }
                if positional {
                    if !name.starts_with('(') {
                        w.out.write_str(&name)?;
                    }
                    w.out.write_str("(")?;
                    for (position, field) in fields.iter().enumerate() {
                        if position > 0 {
                            w.out.write_str(", ")?;
                        }
                        w.write(record.field(field).unwrap_or(absent()))?;
                    }
                    if fields.len() == 1 && name.starts_with('(') {
                        w.out.write_str(",")?;
                    }
                    return w.out.write_str(")");
                }

                write!(w.out, "{name} {{ ")?;
                for (position, field) in fields.iter().enumerate() {
                    if position > 0 {
                        w.out.write_str(", ")?;
                    }
                    write!(w.out, "{field}: ")?;
                    w.write(record.field(field).unwrap_or(absent()))?;
                }
                w.out.write_str(" }")
            }),
        }
    }

    /// Run `body` unless `value` is already being written further up, in
    /// which case the structure is cyclic and `<cycle>` is written instead.
    fn guarded(
        &mut self,
        value: &dyn Diffable,
        body: impl FnOnce(&mut Self) -> fmt::Result,
    ) -> fmt::Result {
        let key = (value.identity(), value.type_name());
        if !self.in_progress.insert(key) {
            return self.out.write_str("<cycle>");
        }
        let outcome = body(self);
        self.in_progress.remove(&key);
        outcome
    }
}

/// Whether following `value` through references reaches a null. A present
/// reference to such a value is written as `Some(..)` so that `None` and
/// `Some(None)` stay distinct.
fn ends_in_null(mut value: &dyn Diffable) -> bool {
    loop {
        match value.view() {
            View::Invalid | View::Reference(None) => return true,
            View::Reference(Some(target)) => value = target,
            _ => return false,
        }
    }
}

/// Strip module paths from a Rust type name.
///
/// `alloc::collections::btree::map::BTreeMap<alloc::string::String, i32>`
/// becomes `BTreeMap<String, i32>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut rest = full;

    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("::") {
            out.truncate(segment_start);
            rest = after;
            continue;
        }
        out.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment_start = out.len();
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}
