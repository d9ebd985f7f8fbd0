//! Comparator-driven ordering.
//!
//! The ordering rule is a tagged variant resolved once at configuration
//! time: a two-argument ordering function, a single store path, or an
//! ordered list of store paths (ties on earlier keys broken by later ones).
//! Key comparisons use a total order over JSON values with missing values
//! ordering first, so a malformed path degrades to a stable order instead
//! of failing mid-sort.

use cellstack_model::Cell;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Ordering rule for a collection.
#[derive(Clone)]
pub enum Comparator {
    /// Arbitrary total order over pairs of cells.
    ByFn(Rc<dyn Fn(&Cell, &Cell) -> Ordering>),
    /// Stable ascending sort on one store path.
    ByKey(String),
    /// Multi-key stable ascending sort; earlier keys dominate.
    ByKeys(Vec<String>),
}

impl Comparator {
    /// Comparator from an ordering function.
    #[must_use]
    pub fn by_fn(f: impl Fn(&Cell, &Cell) -> Ordering + 'static) -> Self {
        Self::ByFn(Rc::new(f))
    }

    /// Comparator over a single store path (e.g. `"zIndex"`).
    #[must_use]
    pub fn by_key(path: impl Into<String>) -> Self {
        Self::ByKey(path.into())
    }

    /// Comparator over an ordered list of store paths.
    #[must_use]
    pub fn by_keys(paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::ByKeys(paths.into_iter().map(Into::into).collect())
    }

    /// Compares two cells under this rule.
    #[must_use]
    pub fn compare(&self, a: &Cell, b: &Cell) -> Ordering {
        match self {
            Self::ByFn(f) => f(a, b),
            Self::ByKey(path) => compare_at(a, b, path),
            Self::ByKeys(paths) => paths
                .iter()
                .map(|path| compare_at(a, b, path))
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal),
        }
    }

    /// True iff the last store mutation of `cell` touched a key this
    /// comparator looks at. Function comparators are opaque, so merges
    /// never schedule a re-sort for them.
    #[must_use]
    pub fn key_changed(&self, cell: &Cell) -> bool {
        match self {
            Self::ByFn(_) => false,
            Self::ByKey(path) => cell.has_changed(path),
            Self::ByKeys(paths) => paths.iter().any(|path| cell.has_changed(path)),
        }
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByFn(_) => f.write_str("Comparator::ByFn(..)"),
            Self::ByKey(path) => f.debug_tuple("Comparator::ByKey").field(path).finish(),
            Self::ByKeys(paths) => f.debug_tuple("Comparator::ByKeys").field(paths).finish(),
        }
    }
}

fn compare_at(a: &Cell, b: &Cell, path: &str) -> Ordering {
    value_cmp(a.prop(path).as_ref(), b.prop(path).as_ref())
}

/// Total order over optional JSON values: absent < null < bool < number <
/// string < array < object; composite values of the same kind tie.
fn value_cmp(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::Number(x), Value::Number(y)) => {
                let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
            (Value::String(x), Value::String(y)) => x.cmp(y),
            _ => rank(a).cmp(&rank(b)),
        },
    }
}

fn rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
