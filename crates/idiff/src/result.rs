//! The diff result: every divergence found by one comparison.

use std::fmt;

use crate::repr::{short_type_name, ReprFormatter};
use crate::view::Diffable;

/// A value present in B but absent in A.
#[derive(Clone)]
pub struct Added<'a> {
    pub path: String,
    pub value: &'a dyn Diffable,
    /// The container holding `path` on side A.
    pub context_a: &'a dyn Diffable,
    /// The container holding `path` on side B.
    pub context_b: &'a dyn Diffable,
}

/// A value present in A but absent in B.
#[derive(Clone)]
pub struct Removed<'a> {
    pub path: String,
    pub value: &'a dyn Diffable,
    pub context_a: &'a dyn Diffable,
    pub context_b: &'a dyn Diffable,
}

/// Both sides present at `path` but unequal.
#[derive(Clone)]
pub struct Modified<'a> {
    pub path: String,
    pub a: &'a dyn Diffable,
    pub b: &'a dyn Diffable,
}

/// The complete, ordered collection of divergences between two values.
///
/// Built once per [`diff`](crate::diff) call and borrowed from the compared
/// values. Entries of each kind appear in traversal order. The result is
/// empty exactly when the values are equal.
#[derive(Clone)]
pub struct DiffResult<'a> {
    pub added: Vec<Added<'a>>,
    pub removed: Vec<Removed<'a>>,
    pub modified: Vec<Modified<'a>>,
    /// The top-level value on side A.
    pub a: &'a dyn Diffable,
    /// The top-level value on side B.
    pub b: &'a dyn Diffable,
}

impl<'a> DiffResult<'a> {
    /// An empty result for comparing `a` against `b`.
    pub fn new(a: &'a dyn Diffable, b: &'a dyn Diffable) -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
            modified: Vec::new(),
            a,
            b,
        }
    }

    /// Returns `true` if no divergence was found.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    pub fn additions(&self) -> usize {
        self.added.len()
    }

    pub fn removals(&self) -> usize {
        self.removed.len()
    }

    pub fn modifications(&self) -> usize {
        self.modified.len()
    }

    /// Returns `true` if the top-level values have different types.
    pub fn types_differ(&self) -> bool {
        self.a.type_name() != self.b.type_name()
    }

    pub(crate) fn push_added(
        &mut self,
        path: String,
        value: &'a dyn Diffable,
        context_a: &'a dyn Diffable,
        context_b: &'a dyn Diffable,
    ) {
        self.added.push(Added {
            path,
            value,
            context_a,
            context_b,
        });
    }

    pub(crate) fn push_removed(
        &mut self,
        path: String,
        value: &'a dyn Diffable,
        context_a: &'a dyn Diffable,
        context_b: &'a dyn Diffable,
    ) {
        self.removed.push(Removed {
            path,
            value,
            context_a,
            context_b,
        });
    }

    pub(crate) fn push_modified(&mut self, path: &str, a: &'a dyn Diffable, b: &'a dyn Diffable) {
        self.modified.push(Modified {
            path: path.to_string(),
            a,
            b,
        });
    }
}

impl fmt::Debug for Added<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Added")
            .field("path", &self.path)
            .field("value", &format_args!("{}", ReprFormatter::new(self.value)))
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Removed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Removed")
            .field("path", &self.path)
            .field("value", &format_args!("{}", ReprFormatter::new(self.value)))
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Modified<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modified")
            .field("path", &self.path)
            .field("a", &format_args!("{}", ReprFormatter::new(self.a)))
            .field("b", &format_args!("{}", ReprFormatter::new(self.b)))
            .finish()
    }
}

impl fmt::Debug for DiffResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffResult")
            .field("added", &self.added)
            .field("removed", &self.removed)
            .field("modified", &self.modified)
            .field("a", &short_type_name(self.a.type_name()))
            .field("b", &short_type_name(self.b.type_name()))
            .finish()
    }
}
