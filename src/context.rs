use std::borrow::Cow;

use serde::ser::Serialize;
use serde_json::value::{to_value, Map, Value};

use crate::errors::{Error, Result};

/// The data binding a template is rendered against.
///
/// The root is usually an object built with [`Context::insert`], but any JSON value is accepted
/// through [`Context::from_value`] since paths are resolved relative to whatever the root is.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    data: Value,
}

impl Context {
    /// Initializes an empty context
    pub fn new() -> Self {
        Context { data: Value::Object(Map::new()) }
    }

    /// Converts the `val` parameter to `Value` and insert it into the context.
    ///
    /// If the root isn't an object it is replaced by one.
    ///
    /// ```rust
    /// # use htmpl::Context;
    /// let mut context = htmpl::Context::new();
    /// context.insert("number_users", &42);
    /// ```
    pub fn insert<T: Serialize + ?Sized, S: Into<String>>(&mut self, key: S, val: &T) {
        let value = to_value(val).unwrap_or(Value::Null);
        self.root_object().insert(key.into(), value);
    }

    /// Converts the `val` parameter to `Value` and insert it into the context.
    ///
    /// Returns an error if the serialization fails.
    pub fn try_insert<T: Serialize + ?Sized, S: Into<String>>(
        &mut self,
        key: S,
        val: &T,
    ) -> Result<()> {
        let value = to_value(val)?;
        self.root_object().insert(key.into(), value);
        Ok(())
    }

    /// Takes a serde-json `Value` and uses it as the root of the binding.
    pub fn from_value(obj: Value) -> Self {
        Context { data: obj }
    }

    /// Takes something that impl Serialize and create a context with it.
    /// Meant to be used if you have a hashmap or a struct and don't want to insert values
    /// one by one in the context.
    pub fn from_serialize(value: impl Serialize) -> Result<Self> {
        let data = to_value(value).map_err(|e| Error::chain("Failed to serialize context", e))?;
        Ok(Context { data })
    }

    /// Returns the value at a given key index.
    pub fn get(&self, index: &str) -> Option<&Value> {
        self.data.get(index)
    }

    /// Checks if a value exists at a specific index.
    pub fn contains_key(&self, index: &str) -> bool {
        self.get(index).is_some()
    }

    /// The root of the binding
    pub fn as_json(&self) -> &Value {
        &self.data
    }

    /// Consumes the context and returns its root value
    pub fn into_json(self) -> Value {
        self.data
    }

    fn root_object(&mut self) -> &mut Map<String, Value> {
        if !self.data.is_object() {
            self.data = Value::Object(Map::new());
        }
        match self.data {
            Value::Object(ref mut map) => map,
            _ => unreachable!("root was just replaced by an object"),
        }
    }
}

impl Default for Context {
    fn default() -> Context {
        Context::new()
    }
}

/// Looks up a single path segment: objects by key, arrays by numeric index.
#[inline]
pub fn get_segment<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(arr) => key.parse::<usize>().ok().and_then(|i| arr.get(i)),
        _ => None,
    }
}

/// Truthiness of a value as used by `<tmpl_unless>` and, for non arrays, by `<tmpl_if>`.
///
/// Empty strings, `0`, `false`, `null` and missing values are falsy. Everything else,
/// including empty arrays and objects, is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) => f != 0.0 && !f.is_nan(),
            None => true,
        },
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// `<tmpl_if>` guard: a non-empty array, or a truthy value that isn't an array.
pub fn passes_if(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Array(arr)) => !arr.is_empty(),
        other => is_truthy(other),
    }
}

/// Converts a value into the text a `<tmpl_var>` writes out.
/// Missing values and `null` render as nothing.
pub fn render_value(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(Value::Bool(b)) => Cow::Owned(b.to_string()),
        Some(Value::Number(n)) => Cow::Owned(n.to_string()),
        Some(Value::Array(arr)) => Cow::Owned(
            arr.iter().map(|v| render_value(Some(v)).into_owned()).collect::<Vec<_>>().join(","),
        ),
        Some(obj @ Value::Object(_)) => Cow::Owned(obj.to_string()),
    }
}
