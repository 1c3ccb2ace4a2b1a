//! JSON document builder — accumulate typed fields and render them as JSON.
//!
//! A [`JsonDocument`] owns an arena of objects. Slot 0 is the root; every
//! call to [`JsonDocument::create_nested`] appends a new slot and links it
//! from the root. Callers get a [`NestedHandle`] back, which is just the slot
//! index plus the epoch it was issued in. Every document draws a fresh,
//! process-unique epoch on creation and on [`JsonDocument::clear`], so a
//! handle from before a clear (or from another document) never matches and
//! is rejected with [`JsonError::StaleHandle`].
//!
//! Keys are unique per object: setting an existing key replaces the value
//! in place and keeps the key's original position.
//!
//! # Example
//! ```
//! use subcalc_core::JsonDocument;
//!
//! let mut doc = JsonDocument::new().unwrap();
//! doc.set("count", 42);
//! doc.set("name", "Product");
//! let user = doc.create_nested("user");
//! doc.set_nested(user, "age", 30).unwrap();
//! assert_eq!(
//!     doc.serialize(false),
//!     r#"{"count":42,"name":"Product","user":{"age":30}}"#
//! );
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

use crate::error::{JsonError, Result};
use crate::types::{IntoJsonValue, JsonValue, ObjectId, ScalarValue};

const ROOT: usize = 0;

const EMPTY_OBJECT: &str = "{}";

/// Initial number of root fields reserved by [`JsonDocument::new`].
const ROOT_CAPACITY: usize = 8;

static NEXT_EPOCH: AtomicU64 = AtomicU64::new(1);

fn next_epoch() -> u64 {
    NEXT_EPOCH.fetch_add(1, Ordering::Relaxed)
}

type Fields = Vec<(String, JsonValue)>;

/// Write access to one nested object of a [`JsonDocument`].
///
/// Handles are `Copy` and own nothing. They stay valid until the document is
/// cleared or the key holding the object is overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NestedHandle {
    slot: usize,
    epoch: u64,
}

/// An in-memory JSON document whose root is always an object.
#[derive(Debug)]
pub struct JsonDocument {
    /// `None` marks a nested object detached by an overwrite.
    slots: Vec<Option<Fields>>,
    epoch: u64,
}

impl JsonDocument {
    /// Create an empty document (`{}`).
    ///
    /// Returns [`JsonError::Allocation`] if storage for the root object
    /// cannot be reserved.
    pub fn new() -> Result<Self> {
        let mut root = Fields::new();
        root.try_reserve(ROOT_CAPACITY)
            .map_err(|e| JsonError::Allocation(e.to_string()))?;
        let mut slots = Vec::new();
        slots
            .try_reserve(1)
            .map_err(|e| JsonError::Allocation(e.to_string()))?;
        slots.push(Some(root));
        Ok(Self {
            slots,
            epoch: next_epoch(),
        })
    }

    /// Insert `value` under `key` at the root, replacing any existing value.
    pub fn set<V: IntoJsonValue>(&mut self, key: impl Into<String>, value: V) {
        self.insert(ROOT, key.into(), value.into_json_value());
    }

    /// Insert an empty object under `key` at the root and return a handle
    /// for writing into it.
    pub fn create_nested(&mut self, key: impl Into<String>) -> NestedHandle {
        let slot = self.slots.len();
        self.slots.push(Some(Fields::new()));
        self.insert(ROOT, key.into(), JsonValue::Object(ObjectId(slot)));
        NestedHandle {
            slot,
            epoch: self.epoch,
        }
    }

    /// Insert a scalar `value` under `key` in the nested object behind
    /// `handle`. Array types do not implement [`ScalarValue`] and are
    /// rejected at compile time.
    ///
    /// Returns [`JsonError::StaleHandle`] without touching the document if
    /// the handle is no longer valid.
    pub fn set_nested<V: ScalarValue>(
        &mut self,
        handle: NestedHandle,
        key: impl Into<String>,
        value: V,
    ) -> Result<()> {
        let slot = self.resolve(handle)?;
        self.insert(slot, key.into(), value.into_json_value());
        Ok(())
    }

    /// Number of fields in the object behind `handle`.
    pub fn nested_len(&self, handle: NestedHandle) -> Result<usize> {
        let slot = self.resolve(handle)?;
        Ok(self.fields(slot).len())
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.fields(ROOT).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the root object has a field named `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields(ROOT).iter().any(|(k, _)| k == key)
    }

    /// Drop all content and invalidate every handle issued so far.
    pub fn clear(&mut self) {
        self.slots.truncate(1);
        self.slots[ROOT] = Some(Fields::new());
        self.epoch = next_epoch();
        debug!(epoch = self.epoch, "json document cleared");
    }

    /// Render the document as JSON text.
    ///
    /// `pretty = false` gives the compact form with no insignificant
    /// whitespace; `pretty = true` indents with two spaces. If the tree
    /// cannot be represented as JSON the result is `"{}"`.
    pub fn serialize(&self, pretty: bool) -> String {
        let value = match self.to_value() {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "json document not serializable, emitting empty object");
                return EMPTY_OBJECT.to_string();
            }
        };
        let text = if pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        text.unwrap_or_else(|err| {
            warn!(error = %err, "json document not serializable, emitting empty object");
            EMPTY_OBJECT.to_string()
        })
    }

    /// Convert the document into a `serde_json::Value` tree.
    ///
    /// Fails with [`JsonError::NonFiniteFloat`] if any float is NaN or
    /// infinite.
    pub fn to_value(&self) -> Result<Value> {
        self.object_value(ROOT)
    }

    fn object_value(&self, slot: usize) -> Result<Value> {
        let fields = self.fields(slot);
        let mut map = Map::with_capacity(fields.len());
        for (key, value) in fields {
            map.insert(key.clone(), self.node_value(key, value)?);
        }
        Ok(Value::Object(map))
    }

    fn node_value(&self, key: &str, value: &JsonValue) -> Result<Value> {
        Ok(match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Integer(i) => Value::Number(Number::from(*i)),
            JsonValue::Float(f) => Number::from_f64(*f).map(Value::Number).ok_or_else(|| {
                JsonError::NonFiniteFloat {
                    key: key.to_string(),
                    value: *f,
                }
            })?,
            JsonValue::String(s) => Value::String(s.clone()),
            JsonValue::IntegerArray(items) => {
                Value::Array(items.iter().map(|i| Value::Number(Number::from(*i))).collect())
            }
            JsonValue::StringArray(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            JsonValue::Object(ObjectId(slot)) => self.object_value(*slot)?,
        })
    }

    fn resolve(&self, handle: NestedHandle) -> Result<usize> {
        if handle.epoch != self.epoch || handle.slot == ROOT {
            return Err(JsonError::StaleHandle);
        }
        match self.slots.get(handle.slot) {
            Some(Some(_)) => Ok(handle.slot),
            _ => Err(JsonError::StaleHandle),
        }
    }

    /// Fields of a live slot. Detached slots read as empty.
    fn fields(&self, slot: usize) -> &[(String, JsonValue)] {
        match self.slots.get(slot) {
            Some(Some(fields)) => fields,
            _ => &[],
        }
    }

    fn insert(&mut self, slot: usize, key: String, value: JsonValue) {
        let Some(Some(fields)) = self.slots.get_mut(slot) else {
            return;
        };
        let replaced = match fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                fields.push((key, value));
                None
            }
        };
        if let Some(old) = replaced {
            self.detach(&old);
        }
    }

    /// Release a nested object that is no longer reachable, recursively.
    fn detach(&mut self, value: &JsonValue) {
        if let JsonValue::Object(ObjectId(slot)) = value {
            if let Some(entry) = self.slots.get_mut(*slot) {
                if let Some(children) = entry.take() {
                    debug!(slot, "nested object detached by overwrite");
                    for (_, child) in &children {
                        self.detach(child);
                    }
                }
            }
        }
    }
}

impl fmt::Display for JsonDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize(false))
    }
}
