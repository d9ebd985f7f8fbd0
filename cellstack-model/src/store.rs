//! Mutable property bag backed by a JSON document.
//!
//! Properties are addressed by path: either a JSON pointer (`/attrs/fill`)
//! or the shorthand without the leading slash (`attrs/fill`). Every mutating
//! operation snapshots the document it replaced, which is what backs
//! [`Store::has_changed`] — "did the last mutation touch this path".

use serde_json::{Map, Value};

/// A cell's mutable property store.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    data: Value,
    previous: Value,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Value::Object(Map::new()))
    }
}

impl Store {
    /// Creates a store over the given JSON document.
    ///
    /// Non-object documents are replaced with an empty object; the store's
    /// root is always an object so pointer paths can be created on demand.
    #[must_use]
    pub fn new(data: Value) -> Self {
        let data = match data {
            Value::Object(map) => Value::Object(map),
            _ => Value::Object(Map::new()),
        };
        Self {
            previous: data.clone(),
            data,
        }
    }

    /// Returns the whole document.
    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Looks up the value at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.data.pointer(&normalize(path))
    }

    /// Looks up the value at `path`, falling back to `default`.
    #[must_use]
    pub fn get_or<'a>(&'a self, path: &str, default: &'a Value) -> &'a Value {
        self.get(path).unwrap_or(default)
    }

    /// Writes `value` at `path`, creating intermediate objects along the
    /// way. An empty path replaces the whole document.
    pub fn set(&mut self, path: &str, value: Value) {
        self.previous = self.data.clone();
        let pointer = normalize(path);
        if pointer.is_empty() {
            self.data = match value {
                Value::Object(map) => Value::Object(map),
                other => other,
            };
            return;
        }
        let segments: Vec<String> = pointer[1..].split('/').map(unescape).collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };
        let mut cursor = &mut self.data;
        for segment in parents {
            if !cursor.is_object() {
                *cursor = Value::Object(Map::new());
            }
            let Some(map) = cursor.as_object_mut() else {
                return;
            };
            cursor = map
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        if !cursor.is_object() {
            *cursor = Value::Object(Map::new());
        }
        if let Some(map) = cursor.as_object_mut() {
            map.insert(last.clone(), value);
        }
    }

    /// Removes the value at `path`. Returns the removed value, if any.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let pointer = normalize(path);
        if pointer.is_empty() {
            return None;
        }
        let (parent, key) = match pointer.rfind('/') {
            Some(idx) => (&pointer[..idx], unescape(&pointer[idx + 1..])),
            None => return None,
        };
        let snapshot = self.data.clone();
        let removed = self
            .data
            .pointer_mut(parent)
            .and_then(Value::as_object_mut)
            .and_then(|map| map.remove(&key));
        if removed.is_some() {
            self.previous = snapshot;
        }
        removed
    }

    /// Overwrites the whole document (the merge-on-add path).
    pub fn replace(&mut self, data: Value) {
        self.previous = std::mem::replace(
            &mut self.data,
            match data {
                Value::Object(map) => Value::Object(map),
                _ => Value::Object(Map::new()),
            },
        );
    }

    /// True iff the last mutating operation changed the value at `path`.
    #[must_use]
    pub fn has_changed(&self, path: &str) -> bool {
        let pointer = normalize(path);
        self.previous.pointer(&pointer) != self.data.pointer(&pointer)
    }
}

/// Accepts both JSON-pointer paths and the leading-slash-free shorthand.
pub(crate) fn normalize(path: &str) -> String {
    if path.is_empty() || path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

fn unescape(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
