//! Owned, serializable snapshots of a diff, and their textual rendering.
//!
//! A [`DiffReport`] renders as one line per change: additions first, then
//! removals, then modifications, each prefixed by the type of value A and
//! the path:
//!
//! ```text
//! Person.last: got: "Betterton", expected: "Snow"
//! ```
//!
//! Value A is the expectation and value B what was actually got. When the
//! two top-level values have different types the whole report is a single
//! `types differ` line.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::repr::{repr, short_type_name};
use crate::result::DiffResult;
use crate::view::{Diffable, Kind, View};

/// A rendered diff, detached from the compared values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Short type name of value A.
    pub type_a: String,
    /// Short type name of value B.
    pub type_b: String,
    /// The full type names differ. Short names may still coincide.
    pub types_differ: bool,
    pub equal: bool,
    /// Additions, then removals, then modifications.
    pub changes: Vec<ReportChange>,
}

/// A single rendered change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum ReportChange {
    Added { path: String, value: String },
    Removed { path: String, value: String },
    Modified {
        path: String,
        got: String,
        expected: String,
    },
}

impl DiffReport {
    pub fn additions(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, ReportChange::Added { .. }))
            .count()
    }

    pub fn removals(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, ReportChange::Removed { .. }))
            .count()
    }

    pub fn modifications(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, ReportChange::Modified { .. }))
            .count()
    }
}

impl DiffResult<'_> {
    /// Render every entry into an owned report.
    pub fn to_report(&self) -> DiffReport {
        let added = self.added.iter().map(|e| ReportChange::Added {
            path: e.path.clone(),
            value: repr(e.value),
        });
        let removed = self.removed.iter().map(|e| ReportChange::Removed {
            path: e.path.clone(),
            value: repr(e.value),
        });
        let modified = self.modified.iter().map(|e| {
            let (got, expected) = render_pair(e.b, e.a);
            ReportChange::Modified {
                path: e.path.clone(),
                got,
                expected,
            }
        });

        DiffReport {
            type_a: short_type_name(self.a.type_name()),
            type_b: short_type_name(self.b.type_name()),
            types_differ: self.types_differ(),
            equal: self.is_empty(),
            changes: added.chain(removed).chain(modified).collect(),
        }
    }
}

/// Render a modified pair. A callable facing an absent value is shown by
/// presence only.
fn render_pair(got: &dyn Diffable, expected: &dyn Diffable) -> (String, String) {
    if is_absent(got) && is_callable(expected) {
        return ("nil".to_string(), "not nil".to_string());
    }
    if is_absent(expected) && is_callable(got) {
        return ("not nil".to_string(), "nil".to_string());
    }
    (repr(got), repr(expected))
}

fn is_absent(value: &dyn Diffable) -> bool {
    matches!(value.view(), View::Invalid | View::Reference(None))
}

fn is_callable(mut value: &dyn Diffable) -> bool {
    loop {
        match value.view() {
            View::Reference(Some(target)) => value = target,
            view => return view.kind() == Kind::Callable,
        }
    }
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.types_differ {
            return write!(
                f,
                "types differ. got: {}, expected: {}",
                self.type_b, self.type_a
            );
        }

        for (position, change) in self.changes.iter().enumerate() {
            if position > 0 {
                f.write_str("\n")?;
            }
            match change {
                ReportChange::Added { path, value } => {
                    write!(f, "{}{path}: added: {value}", self.type_a)?
                }
                ReportChange::Removed { path, value } => {
                    write!(f, "{}{path}: removed: {value}", self.type_a)?
                }
                ReportChange::Modified {
                    path,
                    got,
                    expected,
                } => write!(f, "{}{path}: got: {got}, expected: {expected}", self.type_a)?,
            }
        }
        Ok(())
    }
}

/// Format a diff for test failure messages.
pub fn format_test(result: &DiffResult<'_>) -> String {
    result.to_report().to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::engine::diff;

    #[derive(Default)]
    struct MenuItem {
        value: String,
        onclick: String,
    }
    crate::impl_record!(MenuItem { value, onclick });

    #[derive(Default)]
    struct Popup {
        menu_item: Vec<MenuItem>,
    }
    crate::impl_record!(Popup { menu_item });

    #[derive(Default)]
    struct Data {
        id: String,
        value: String,
        list1: Vec<String>,
        list2: Vec<String>,
        list3: Vec<String>,
        popup: Popup,
        func: Option<fn()>,
        recursive: Option<Box<Data>>,
        map: BTreeMap<String, String>,
    }
    crate::impl_record!(Data {
        id,
        value,
        list1,
        list2,
        list3,
        popup,
        func,
        recursive,
        map,
    });

    struct Person {
        name: String,
        last: String,
    }
    crate::impl_record!(Person { name, last });

    fn noop() {}

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn menu(items: &[(&str, &str)]) -> Popup {
        Popup {
            menu_item: items
                .iter()
                .map(|(value, onclick)| MenuItem {
                    value: value.to_string(),
                    onclick: onclick.to_string(),
                })
                .collect(),
        }
    }

    fn first() -> Data {
        Data {
            id: "file1".into(),
            value: "value1".into(),
            list1: strings(&["hey", "there"]),
            list2: Vec::new(),
            list3: strings(&["removed"]),
            popup: menu(&[
                ("New", "CreateNewDoc()"),
                ("Open", "OpenDoc()"),
                ("Close", "CloseDoc()"),
            ]),
            func: Some(noop),
            recursive: Some(Box::new(Data {
                id: "rec1".into(),
                ..Default::default()
            })),
            map: BTreeMap::from([("key1".to_string(), "value2".to_string())]),
        }
    }

    fn second() -> Data {
        Data {
            id: "file2".into(),
            value: "value2".into(),
            list1: strings(&["changed1", "changed2"]),
            list2: strings(&["added"]),
            list3: Vec::new(),
            popup: menu(&[
                ("Newier", "CreateNewDoc()"),
                ("Open it", "OpenDoc()"),
                ("Close it", "CloseDoc()"),
            ]),
            func: None,
            recursive: Some(Box::new(Data {
                id: "rec2".into(),
                ..Default::default()
            })),
            map: BTreeMap::from([("key2".to_string(), "value2".to_string())]),
        }
    }

    #[test]
    fn nested_record_first_to_second() {
        let (a, b) = (first(), second());
        let (result, equal) = diff(&a, &b);
        assert!(!equal);
        assert_eq!(
            format_test(&result),
            r#"Data.list2[0]: added: "added"
Data.map["key2"]: added: "value2"
Data.list3[0]: removed: "removed"
Data.map["key1"]: removed: "value2"
Data.id: got: "file2", expected: "file1"
Data.value: got: "value2", expected: "value1"
Data.list1[0]: got: "changed1", expected: "hey"
Data.list1[1]: got: "changed2", expected: "there"
Data.popup.menu_item[0].value: got: "Newier", expected: "New"
Data.popup.menu_item[1].value: got: "Open it", expected: "Open"
Data.popup.menu_item[2].value: got: "Close it", expected: "Close"
Data.func: got: nil, expected: not nil
Data.recursive.id: got: "rec2", expected: "rec1""#
        );
    }

    #[test]
    fn nested_record_second_to_first() {
        let (a, b) = (second(), first());
        let (result, equal) = diff(&a, &b);
        assert!(!equal);
        assert_eq!(
            format_test(&result),
            r#"Data.list3[0]: added: "removed"
Data.map["key1"]: added: "value2"
Data.list2[0]: removed: "added"
Data.map["key2"]: removed: "value2"
Data.id: got: "file1", expected: "file2"
Data.value: got: "value1", expected: "value2"
Data.list1[0]: got: "hey", expected: "changed1"
Data.list1[1]: got: "there", expected: "changed2"
Data.popup.menu_item[0].value: got: "New", expected: "Newier"
Data.popup.menu_item[1].value: got: "Open", expected: "Open it"
Data.popup.menu_item[2].value: got: "Close", expected: "Close it"
Data.func: got: not nil, expected: nil
Data.recursive.id: got: "rec1", expected: "rec2""#
        );
    }

    #[test]
    fn simple_strings() {
        let (hey, there) = ("hey", "there");
        let (result, equal) = diff(&hey, &there);
        assert!(!equal);
        assert_eq!(format_test(&result), r#"&str: got: "there", expected: "hey""#);

        let (result, equal) = diff(&hey, &hey);
        assert!(equal);
        assert_eq!(format_test(&result), "");
    }

    #[test]
    fn record_path_concatenation() {
        let a = Person {
            name: "John".into(),
            last: "Snow".into(),
        };
        let b = Person {
            name: "John".into(),
            last: "Betterton".into(),
        };
        let (result, _) = diff(&a, &b);
        assert_eq!(
            format_test(&result),
            r#"Person.last: got: "Betterton", expected: "Snow""#
        );
    }

    #[test]
    fn type_mismatch_renders_one_line() {
        let (result, equal) = diff(&5, &"5");
        assert!(!equal);
        assert_eq!(format_test(&result), "types differ. got: &str, expected: i32");
    }

    mod left {
        pub struct Marker(pub i32);
        crate::impl_record!(Marker { 0 });
    }

    mod right {
        pub struct Marker(pub i32);
        crate::impl_record!(Marker { 0 });
    }

    #[test]
    fn same_short_name_in_different_modules_differs() {
        let (a, b) = (left::Marker(1), right::Marker(1));
        let (result, equal) = diff(&a, &b);
        assert!(!equal);
        let report = result.to_report();
        assert!(report.types_differ);
        assert_eq!(report.type_a, report.type_b);
        assert_eq!(
            report.to_string(),
            "types differ. got: Marker, expected: Marker"
        );
    }

    #[test]
    fn report_counts_and_equality() {
        let (a, b) = (first(), second());
        let (result, _) = diff(&a, &b);
        let report = result.to_report();
        assert!(!report.equal);
        assert_eq!(report.additions(), 2);
        assert_eq!(report.removals(), 2);
        assert_eq!(report.modifications(), 9);
        assert_eq!(report.type_a, "Data");
    }

    #[test]
    fn report_serializes_with_change_tags() {
        let (a, b) = (vec![1], vec![1, 2]);
        let (result, _) = diff(&a, &b);
        let json = serde_json::to_value(result.to_report()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type_a": "Vec<i32>",
                "type_b": "Vec<i32>",
                "types_differ": false,
                "equal": false,
                "changes": [{"change": "added", "path": "[1]", "value": "2"}],
            })
        );
    }
}
