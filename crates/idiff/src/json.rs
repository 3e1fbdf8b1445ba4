//! JSON values and anything `serde` can serialize.
//!
//! `serde_json::Value` is diffed directly: `null` is invalid, arrays are
//! sequences, objects are mappings keyed by string. Each JSON variant has its
//! own type identity, so a number facing a string is one modification.

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::engine::diff;
use crate::error::DiffError;
use crate::report::DiffReport;
use crate::scalar::ScalarValue;
use crate::view::{Diffable, MappingView, View};

impl Diffable for Value {
    fn view(&self) -> View<'_> {
        match self {
            Value::Null => View::Invalid,
            Value::Bool(b) => View::Scalar(ScalarValue::Bool(*b)),
            Value::Number(n) => View::Scalar(number(n)),
            Value::String(s) => View::Scalar(ScalarValue::Str(s)),
            Value::Array(items) => View::Sequence(items),
            Value::Object(map) => View::Mapping(map),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl Diffable for Map<String, Value> {
    fn view(&self) -> View<'_> {
        View::Mapping(self)
    }
}

impl MappingView for Map<String, Value> {
    fn entries(&self) -> Vec<(&dyn Diffable, &dyn Diffable)> {
        self.iter()
            .map(|(key, value)| (key as &dyn Diffable, value as &dyn Diffable))
            .collect()
    }
}

fn number(n: &Number) -> ScalarValue<'static> {
    if let Some(i) = n.as_i64() {
        ScalarValue::Int(i as i128)
    } else if let Some(u) = n.as_u64() {
        ScalarValue::UInt(u as u128)
    } else {
        ScalarValue::F64(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Diff two serializable values through their JSON form.
///
/// The report is detached from the intermediate JSON, so it owns every
/// rendered path and value.
pub fn diff_serialized<A, B>(a: &A, b: &B) -> Result<(DiffReport, bool), DiffError>
where
    A: Serialize + ?Sized,
    B: Serialize + ?Sized,
{
    let left = serde_json::to_value(a)?;
    let right = serde_json::to_value(b)?;
    let (result, equal) = diff(&left, &right);
    Ok((result.to_report(), equal))
}
