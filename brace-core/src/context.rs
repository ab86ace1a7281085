//! Data context: the read-only field source a renderer substitutes from.
//!
//! Values are turned into text through [`Displayable`], never through an
//! implicit `Display`: strings are verbatim, numbers use standard decimal
//! formatting, booleans are `true`/`false`, JSON `null` is empty, and JSON
//! arrays/objects render as compact JSON.

use std::borrow::{Borrow, Cow};
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Displayable
// ---------------------------------------------------------------------------

/// Canonical display-string conversion for context values.
pub trait Displayable {
    fn display(&self) -> Cow<'_, str>;
}

impl Displayable for str {
    fn display(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Displayable for String {
    fn display(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Displayable for Cow<'_, str> {
    fn display(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl<T: Displayable + ?Sized> Displayable for &T {
    fn display(&self) -> Cow<'_, str> {
        (**self).display()
    }
}

macro_rules! displayable_via_to_string {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Displayable for $ty {
                fn display(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

displayable_via_to_string!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl Displayable for Value {
    fn display(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::String(s) => Cow::Borrowed(s),
            Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Array(_) | Value::Object(_) => Cow::Owned(self.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// DataContext
// ---------------------------------------------------------------------------

/// A mapping from field name to display string, read but never mutated.
pub trait DataContext {
    /// Display string for `name`, or `None` when the field is absent.
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl<T: DataContext + ?Sized> DataContext for &T {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        (**self).lookup(name)
    }
}

impl<K, V, S> DataContext for HashMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: Displayable,
    S: BuildHasher,
{
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(Displayable::display)
    }
}

impl<K, V> DataContext for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: Displayable,
{
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(Displayable::display)
    }
}

impl DataContext for serde_json::Map<String, Value> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(Displayable::display)
    }
}

/// Only JSON objects carry fields; every other value looks up as empty.
impl DataContext for Value {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.as_object().and_then(|map| map.lookup(name))
    }
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Errors from building a [`Context`] out of serializable data.
#[derive(Debug, Error)]
pub enum ContextError {
    /// JSON serialization error while flattening the payload.
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The payload did not serialize to a JSON object.
    #[error("context must be an object, found {found}")]
    NotAnObject { found: &'static str },
}

/// Owned context whose values are already converted to display strings.
///
/// Later inserts overwrite earlier ones, which is how callers layer
/// defaults beneath explicit data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    fields: BTreeMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `name`, returning the previous display string.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Displayable) -> Option<String> {
        self.fields.insert(name.into(), value.display().into_owned())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Overlay every field of `other` on top of `self`.
    pub fn merge(&mut self, other: Context) {
        self.fields.extend(other.fields);
    }

    /// Flatten the top-level fields of any serializable object.
    pub fn from_serialize<T: Serialize + ?Sized>(data: &T) -> Result<Self, ContextError> {
        match serde_json::to_value(data)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(ContextError::NotAnObject { found: json_kind(&other) }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl DataContext for Context {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(Cow::Borrowed)
    }
}

impl<K: Into<String>, V: Displayable> Extend<(K, V)> for Context {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<K: Into<String>, V: Displayable> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = Context::new();
        ctx.extend(iter);
        ctx
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_use_decimal_formatting() {
        assert_eq!(24_i32.display(), "24");
        assert_eq!(2.5_f64.display(), "2.5");
        assert_eq!(json!(24).display(), "24");
        assert_eq!(json!(-0.125).display(), "-0.125");
    }

    #[test]
    fn json_strings_are_not_quoted() {
        assert_eq!(json!("graef").display(), "graef");
        assert_eq!(json!(null).display(), "");
        assert_eq!(json!(true).display(), "true");
        assert_eq!(json!([1, "a"]).display(), r#"[1,"a"]"#);
    }

    #[test]
    fn maps_look_up_by_str() {
        let mut map = HashMap::new();
        map.insert("years".to_string(), 24_u32);
        assert_eq!(map.lookup("years").as_deref(), Some("24"));
        assert_eq!(map.lookup("name"), None);

        let tree: BTreeMap<&str, &str> = [("name", "graef")].into_iter().collect();
        assert_eq!(tree.lookup("name").as_deref(), Some("graef"));
    }

    #[test]
    fn json_value_only_resolves_objects() {
        let obj = json!({ "name": "graef", "years": 24 });
        assert_eq!(obj.lookup("years").as_deref(), Some("24"));
        assert_eq!(json!([1, 2]).lookup("0"), None);
    }

    #[test]
    fn from_serialize_flattens_struct() {
        #[derive(Serialize)]
        struct Person {
            name: &'static str,
            years: u8,
        }
        let ctx = Context::from_serialize(&Person { name: "graef", years: 24 }).unwrap();
        assert_eq!(ctx.get("name"), Some("graef"));
        assert_eq!(ctx.get("years"), Some("24"));
    }

    #[test]
    fn from_serialize_rejects_non_objects() {
        let err = Context::from_serialize(&vec![1, 2]).unwrap_err();
        assert!(matches!(err, ContextError::NotAnObject { found: "an array" }));
    }

    #[test]
    fn merge_overwrites() {
        let mut base: Context = [("site", "a"), ("name", "x")].into_iter().collect();
        base.merge([("name", "y")].into_iter().collect());
        assert_eq!(base.get("site"), Some("a"));
        assert_eq!(base.get("name"), Some("y"));
    }
}
