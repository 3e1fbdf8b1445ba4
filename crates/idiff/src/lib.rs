//! Structural diff of arbitrary nested values.
//!
//! Compares two values and reports every path at which they diverge, as an
//! addition, a removal or a modification, so that a failing assertion can
//! explain *why* two values are unequal.
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! let expected = BTreeMap::from([("name", "John"), ("last", "Snow")]);
//! let got = BTreeMap::from([("name", "John"), ("last", "Betterton")]);
//!
//! let (result, equal) = idiff::diff(&expected, &got);
//! assert!(!equal);
//! assert_eq!(
//!     idiff::format_test(&result),
//!     r#"BTreeMap<&str, &str>["last"]: got: "Betterton", expected: "Snow""#
//! );
//! ```
//!
//! # Key Types
//!
//! - [`Diffable`] / [`View`] / [`Kind`] -- Read-only view over a value, by kind
//! - [`DiffResult`] -- Added, removed and modified entries of one comparison
//! - [`DiffReport`] -- Owned, serializable rendering of a result
//! - [`DiffConfig`] -- Cycle handling

pub mod config;
pub mod engine;
pub mod error;
pub mod impls;
pub mod json;
pub mod path;
pub mod report;
pub mod repr;
pub mod result;
pub mod scalar;
pub mod view;

pub use config::{CyclePolicy, DiffConfig};
pub use engine::{diff, diff_with};
pub use error::DiffError;
pub use json::diff_serialized;
pub use path::Segment;
pub use report::{format_test, DiffReport, ReportChange};
pub use repr::{repr, short_type_name, ReprFormatter};
pub use result::{Added, DiffResult, Modified, Removed};
pub use scalar::ScalarValue;
pub use view::{absent, Absent, Diffable, Kind, MappingView, RecordView, SequenceView, View, ABSENT};
