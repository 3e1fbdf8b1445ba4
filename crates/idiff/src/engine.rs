//! The recursive comparison.
//!
//! [`diff`] walks both values depth-first, dispatching on [`Kind`] and
//! extending the path at every descent. Each divergence becomes one entry in
//! the [`DiffResult`]; no shape mismatch is ever an error.
//!
//! # Rules, in priority order
//!
//! 1. Both sides invalid: equal.
//! 2. One side invalid: `Modified`.
//! 3. Type names differ: `Modified` for the whole value, no descent.
//! 4. Otherwise by kind:
//!    - sequences compare the common prefix; the longer side's tail is
//!      `Removed` (A longer) or `Added` (B longer)
//!    - references are transparent: both null is equal, one null is
//!      `Modified`, otherwise the targets are compared at the same path
//!    - records compare every field in declaration order
//!    - mappings compare shared keys in A's order, report A-only keys as
//!      `Removed`, then B-only keys as `Added` in B's order
//!    - scalars compare structurally
//!    - callables compare by presence only, so two present callables are
//!      equal
//!
//! Cycles are detected with an in-progress set keyed by the identity pair
//! and type of each record and reference; see [`CyclePolicy`].

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, trace};

use crate::config::{CyclePolicy, DiffConfig};
use crate::path::{self, Segment};
use crate::repr::repr;
use crate::result::DiffResult;
use crate::view::{absent, Diffable, Kind, MappingView, RecordView, SequenceView, View};

/// Compare `a` against `b` with the default configuration.
///
/// Returns the complete result and whether the two values are equal.
pub fn diff<'a>(a: &'a dyn Diffable, b: &'a dyn Diffable) -> (DiffResult<'a>, bool) {
    diff_with(&DiffConfig::default(), a, b)
}

/// Compare `a` against `b`.
pub fn diff_with<'a>(
    config: &DiffConfig,
    a: &'a dyn Diffable,
    b: &'a dyn Diffable,
) -> (DiffResult<'a>, bool) {
    let mut engine = DiffEngine {
        config,
        result: DiffResult::new(a, b),
        in_progress: HashSet::new(),
    };
    let equal = engine.compare(a, b, "");
    let result = engine.result;

    debug!(
        equal,
        added = result.additions(),
        removed = result.removals(),
        modified = result.modifications(),
        "diff complete"
    );
    (result, equal)
}

/// (identity of A, identity of B, type name)
type VisitKey = (usize, usize, &'static str);

struct DiffEngine<'a, 'c> {
    config: &'c DiffConfig,
    result: DiffResult<'a>,
    in_progress: HashSet<VisitKey>,
}

impl<'a> DiffEngine<'a, '_> {
    fn compare(&mut self, v1: &'a dyn Diffable, v2: &'a dyn Diffable, path: &str) -> bool {
        let (view1, view2) = (v1.view(), v2.view());
        trace!(path, kind = ?view1.kind(), "compare");

        match (view1.kind() == Kind::Invalid, view2.kind() == Kind::Invalid) {
            (true, true) => return true,
            (true, false) | (false, true) => {
                self.result.push_modified(path, v1, v2);
                return false;
            }
            (false, false) => {}
        }

        if v1.type_name() != v2.type_name() {
            self.result.push_modified(path, v1, v2);
            return false;
        }

        match (view1, view2) {
            (View::Sequence(s1), View::Sequence(s2)) => self.compare_sequences(v1, v2, s1, s2, path),
            (View::Reference(r1), View::Reference(r2)) => {
                self.compare_references(v1, v2, r1, r2, path)
            }
            (View::Record(r1), View::Record(r2)) => {
                self.guarded(v1, v2, path, |engine| engine.compare_records(r1, r2, path))
            }
            (View::Mapping(m1), View::Mapping(m2)) => self.compare_mappings(v1, v2, m1, m2, path),
            (View::Callable, View::Callable) => true,
            (View::Scalar(x), View::Scalar(y)) if x.same(&y) => true,
            _ => {
                self.result.push_modified(path, v1, v2);
                false
            }
        }
    }

    fn compare_sequences(
        &mut self,
        v1: &'a dyn Diffable,
        v2: &'a dyn Diffable,
        s1: &'a dyn SequenceView,
        s2: &'a dyn SequenceView,
        path: &str,
    ) -> bool {
        let (len1, len2) = (s1.len(), s2.len());
        let common = len1.min(len2);
        let mut equal = true;

        for index in 0..common {
            let local = path::extend(path, Segment::Index(index));
            let e1 = s1.at(index).unwrap_or(absent());
            let e2 = s2.at(index).unwrap_or(absent());
            if !self.compare(e1, e2, &local) {
                equal = false;
            }
        }

        for index in common..len1 {
            let local = path::extend(path, Segment::Index(index));
            let value = s1.at(index).unwrap_or(absent());
            self.result.push_removed(local, value, v1, v2);
            equal = false;
        }

        for index in common..len2 {
            let local = path::extend(path, Segment::Index(index));
            let value = s2.at(index).unwrap_or(absent());
            self.result.push_added(local, value, v1, v2);
            equal = false;
        }

        equal
    }

    fn compare_references(
        &mut self,
        v1: &'a dyn Diffable,
        v2: &'a dyn Diffable,
        r1: Option<&'a dyn Diffable>,
        r2: Option<&'a dyn Diffable>,
        path: &str,
    ) -> bool {
        match (r1, r2) {
            (None, None) => true,
            (Some(t1), Some(t2)) => self.guarded(v1, v2, path, |engine| engine.compare(t1, t2, path)),
            (t1, t2) => {
                self.result
                    .push_modified(path, t1.unwrap_or(absent()), t2.unwrap_or(absent()));
                false
            }
        }
    }

    fn compare_records(
        &mut self,
        r1: &'a dyn RecordView,
        r2: &'a dyn RecordView,
        path: &str,
    ) -> bool {
        let mut equal = true;
        for name in r1.field_names() {
            let local = path::extend(path, Segment::Field(name));
            let f1 = r1.field(name).unwrap_or(absent());
            let f2 = r2.field(name).unwrap_or(absent());
            if !self.compare(f1, f2, &local) {
                equal = false;
            }
        }
        equal
    }

    fn compare_mappings(
        &mut self,
        v1: &'a dyn Diffable,
        v2: &'a dyn Diffable,
        m1: &'a dyn MappingView,
        m2: &'a dyn MappingView,
        path: &str,
    ) -> bool {
        let entries2: Vec<(String, &'a dyn Diffable)> = m2
            .entries()
            .into_iter()
            .map(|(key, value)| (repr(key), value))
            .collect();

        // Keys sharing a representation pair up in enumeration order.
        let mut slots: HashMap<&str, VecDeque<usize>> = HashMap::new();
        for (position, (rendered, _)) in entries2.iter().enumerate() {
            slots.entry(rendered.as_str()).or_default().push_back(position);
        }
        let mut matched = vec![false; entries2.len()];
        let mut equal = true;

        for (key, value) in m1.entries() {
            let rendered = repr(key);
            let local = path::extend(path, Segment::Key(&rendered));
            match slots
                .get_mut(rendered.as_str())
                .and_then(VecDeque::pop_front)
            {
                Some(position) => {
                    matched[position] = true;
                    if !self.compare(value, entries2[position].1, &local) {
                        equal = false;
                    }
                }
                None => {
                    self.result.push_removed(local, value, v1, v2);
                    equal = false;
                }
            }
        }

        for ((rendered, value), paired) in entries2.iter().zip(&matched) {
            if !paired {
                let local = path::extend(path, Segment::Key(rendered));
                self.result.push_added(local, *value, v1, v2);
                equal = false;
            }
        }

        equal
    }

    /// Run `body` unless the pair (`v1`, `v2`) is already being compared
    /// further up, which means the structure is cyclic.
    fn guarded(
        &mut self,
        v1: &'a dyn Diffable,
        v2: &'a dyn Diffable,
        path: &str,
        body: impl FnOnce(&mut Self) -> bool,
    ) -> bool {
        let key = (v1.identity(), v2.identity(), v1.type_name());
        if !self.in_progress.insert(key) {
            debug!(path, "cycle detected");
            return match self.config.cycle_policy {
                CyclePolicy::AssumeEqual => true,
                CyclePolicy::Report => {
                    self.result.push_modified(path, v1, v2);
                    false
                }
            };
        }
        let equal = body(self);
        self.in_progress.remove(&key);
        equal
    }
}
