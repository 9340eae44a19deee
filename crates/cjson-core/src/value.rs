//! The `Json` value tree.
//!
//! A [`Json`] holds exactly one of seven variants and exclusively owns its
//! children: arrays are a `Vec<Json>`, objects a `BTreeMap<String, Json>`.
//! Replacing a value (`set`, plain assignment, `parse`) drops the previous
//! payload and its whole subtree before the new one is adopted.
//!
//! # Key design decisions
//!
//! - **Sorted objects**: object entries iterate and serialize in key order, so
//!   output is stable regardless of insertion order.
//! - **Find-or-create vs. must-exist**: [`Json::get_or_insert`] (and `IndexMut<&str>`)
//!   switches the value to an object and creates missing keys as `Null`;
//!   [`Json::get_existing`] (and `Index<&str>`) requires both the object variant
//!   and the key.
//! - **Fail fast on misuse**: accessors return [`JsonError::TypeMismatch`] instead
//!   of coercing. The only leniency is [`Json::as_bool`], which accepts integers.
//!   The `Index`/`IndexMut` operators panic with the same error message.

use crate::error::{JsonError, Result};
use crate::iter::{Iter, IterMut};
use crate::parser;
use crate::serializer::Serializer;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Object storage: unique keys, iterated in sorted order.
pub type Map = BTreeMap<String, Json>;

/// A JSON node.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Json {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Array(Vec<Json>),
    Object(Map),
}

/// The active variant of a [`Json`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Boolean,
    Integer,
    Real,
    Text,
    Array,
    Object,
}

impl Kind {
    /// Lowercase name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Real => "real",
            Kind::Text => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Json {
    /// A `Null` value.
    pub fn new() -> Self {
        Json::Null
    }

    /// An empty array.
    pub fn new_array() -> Self {
        Json::Array(Vec::new())
    }

    /// An empty object.
    pub fn new_object() -> Self {
        Json::Object(Map::new())
    }

    /// The active variant.
    pub fn kind(&self) -> Kind {
        match self {
            Json::Null => Kind::Null,
            Json::Boolean(_) => Kind::Boolean,
            Json::Integer(_) => Kind::Integer,
            Json::Real(_) => Kind::Real,
            Json::Text(_) => Kind::Text,
            Json::Array(_) => Kind::Array,
            Json::Object(_) => Kind::Object,
        }
    }

    /// Lowercase name of the active variant, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    // ------------------------------------------------------------------
    // Parsing and serialization
    // ------------------------------------------------------------------

    /// Replace this value with the tree parsed from `text`.
    ///
    /// On failure the value is reset to `Null` and the parse error is returned;
    /// no partially built tree is ever left behind.
    ///
    /// ```
    /// use cjson_core::Json;
    ///
    /// let mut json = Json::new();
    /// json.parse("[1, 2, 3]").unwrap();
    /// assert_eq!(json.len().unwrap(), 3);
    ///
    /// assert!(json.parse("").is_err());
    /// assert!(json.is_null());
    /// ```
    pub fn parse(&mut self, text: &str) -> Result<()> {
        match parser::parse(text) {
            Ok(value) => {
                *self = value;
                Ok(())
            }
            Err(err) => {
                log::debug!("discarding value after failed parse: {err}");
                self.set_null();
                Err(err)
            }
        }
    }

    /// Render this value in the default indented layout.
    ///
    /// Returns an empty string if the value cannot be represented as JSON
    /// (a NaN or infinite real somewhere in the tree). Use
    /// [`Json::try_serialize`] to get the reason.
    pub fn serialize(&self) -> String {
        match self.try_serialize() {
            Ok(text) => text,
            Err(err) => {
                log::warn!("serialization failed, returning empty text: {err}");
                String::new()
            }
        }
    }

    /// Render this value in the default indented layout, reporting failures.
    pub fn try_serialize(&self) -> Result<String> {
        Serializer::default().serialize(self)
    }

    /// Render this value into a caller-provided sink.
    pub fn serialize_into<W: fmt::Write>(&self, out: &mut W) -> Result<()> {
        Serializer::default().serialize_into(self, out)
    }

    // ------------------------------------------------------------------
    // Assignment and reset
    // ------------------------------------------------------------------

    /// Replace this value, dropping the previous payload first.
    pub fn set<T: Into<Json>>(&mut self, value: T) {
        *self = value.into();
    }

    /// Drop all owned children and become `Null`.
    pub fn set_null(&mut self) {
        *self = Json::Null;
    }

    /// Move the value out, leaving `Null` in its place.
    pub fn take(&mut self) -> Json {
        std::mem::take(self)
    }

    // ------------------------------------------------------------------
    // Type predicates
    // ------------------------------------------------------------------

    /// True for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Json::Null)
    }

    /// True for `Boolean`.
    pub fn is_bool(&self) -> bool {
        matches!(self, Json::Boolean(_))
    }

    /// True for both integers and reals.
    pub fn is_number(&self) -> bool {
        matches!(self, Json::Integer(_) | Json::Real(_))
    }

    /// True for `Integer` only.
    pub fn is_integer(&self) -> bool {
        matches!(self, Json::Integer(_))
    }

    /// True for `Real` only.
    pub fn is_real(&self) -> bool {
        matches!(self, Json::Real(_))
    }

    /// True for `Text`.
    pub fn is_string(&self) -> bool {
        matches!(self, Json::Text(_))
    }

    /// True for `Array`.
    pub fn is_array(&self) -> bool {
        matches!(self, Json::Array(_))
    }

    /// True for `Object`.
    pub fn is_object(&self) -> bool {
        matches!(self, Json::Object(_))
    }

    // ------------------------------------------------------------------
    // Scalar extraction
    // ------------------------------------------------------------------

    /// Boolean value. Integers are accepted as truthiness: zero is `false`.
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Json::Boolean(b) => Ok(*b),
            Json::Integer(i) => Ok(*i != 0),
            _ => Err(self.mismatch("boolean")),
        }
    }

    /// Integer value. Reals are not truncated; they are a type mismatch.
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Json::Integer(i) => Ok(*i),
            _ => Err(self.mismatch("integer")),
        }
    }

    /// Real value. Integers are not widened.
    pub fn as_real(&self) -> Result<f64> {
        match self {
            Json::Real(f) => Ok(*f),
            _ => Err(self.mismatch("real")),
        }
    }

    /// Borrowed string contents.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Json::Text(s) => Ok(s),
            _ => Err(self.mismatch("string")),
        }
    }

    /// Borrowed array elements.
    pub fn as_array(&self) -> Result<&Vec<Json>> {
        match self {
            Json::Array(items) => Ok(items),
            _ => Err(self.mismatch("array")),
        }
    }

    /// Mutable array elements.
    pub fn as_array_mut(&mut self) -> Result<&mut Vec<Json>> {
        match self {
            Json::Array(items) => Ok(items),
            _ => Err(self.mismatch("array")),
        }
    }

    /// Borrowed object entries.
    pub fn as_object(&self) -> Result<&Map> {
        match self {
            Json::Object(map) => Ok(map),
            _ => Err(self.mismatch("object")),
        }
    }

    /// Mutable object entries.
    pub fn as_object_mut(&mut self) -> Result<&mut Map> {
        match self {
            Json::Object(map) => Ok(map),
            _ => Err(self.mismatch("object")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> JsonError {
        JsonError::TypeMismatch {
            expected,
            found: self.type_name(),
        }
    }

    // ------------------------------------------------------------------
    // Array access
    // ------------------------------------------------------------------

    /// Element at `index`. Never grows the array.
    pub fn get(&self, index: usize) -> Result<&Json> {
        let items = self.as_array()?;
        items.get(index).ok_or(JsonError::IndexOutOfBounds {
            index,
            len: items.len(),
        })
    }

    /// Mutable element at `index`. Never grows the array.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Json> {
        let items = self.as_array_mut()?;
        let len = items.len();
        items
            .get_mut(index)
            .ok_or(JsonError::IndexOutOfBounds { index, len })
    }

    /// Append to an array. Any other variant is a type mismatch; `push` never
    /// switches the variant.
    pub fn push<T: Into<Json>>(&mut self, value: T) -> Result<()> {
        self.as_array_mut()?.push(value.into());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Object access
    // ------------------------------------------------------------------

    /// Child under `key`, creating it as `Null` if absent.
    ///
    /// If this value is not an object it is first reset to an empty object,
    /// discarding its previous content.
    ///
    /// ```
    /// use cjson_core::Json;
    ///
    /// let mut json = Json::from(42);
    /// json.get_or_insert("on").set(true);
    /// assert!(json.is_object());
    /// assert_eq!(json.serialize(), "{\n\t\"on\": true\n}");
    /// ```
    pub fn get_or_insert(&mut self, key: &str) -> &mut Json {
        if !self.is_object() {
            *self = Json::new_object();
        }
        match self {
            Json::Object(map) => map.entry(key.to_owned()).or_default(),
            _ => unreachable!("value was just switched to an object"),
        }
    }

    /// Child under an existing `key`.
    pub fn get_existing(&self, key: &str) -> Result<&Json> {
        self.as_object()?
            .get(key)
            .ok_or_else(|| JsonError::MissingKey(key.to_owned()))
    }

    /// Mutable child under an existing `key`.
    pub fn get_existing_mut(&mut self, key: &str) -> Result<&mut Json> {
        self.as_object_mut()?
            .get_mut(key)
            .ok_or_else(|| JsonError::MissingKey(key.to_owned()))
    }

    /// Insert or overwrite `key` on an object, returning the replaced child.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Result<Option<Json>>
    where
        K: Into<String>,
        V: Into<Json>,
    {
        Ok(self.as_object_mut()?.insert(key.into(), value.into()))
    }

    /// Remove `key` from an object, returning its child if it was present.
    pub fn remove(&mut self, key: &str) -> Result<Option<Json>> {
        Ok(self.as_object_mut()?.remove(key))
    }

    /// Whether an object holds `key`.
    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.as_object()?.contains_key(key))
    }

    // ------------------------------------------------------------------
    // Size and iteration
    // ------------------------------------------------------------------

    /// Character count of a string, element count of an array, entry count
    /// of an object.
    pub fn len(&self) -> Result<usize> {
        match self {
            Json::Text(s) => Ok(s.chars().count()),
            Json::Array(items) => Ok(items.len()),
            Json::Object(map) => Ok(map.len()),
            _ => Err(self.mismatch("string, array or object")),
        }
    }

    /// True when [`Json::len`] is zero.
    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }

    /// Iterate over the direct children: array elements in index order,
    /// object values in key order. Scalars yield nothing.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// The exhausted iterator of this container. A fully advanced [`Json::iter`]
    /// compares equal to it.
    pub fn end(&self) -> Iter<'_> {
        Iter::end(self)
    }

    /// Iterate mutably over the direct children, in the same order as [`Json::iter`].
    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut::new(self)
    }
}

// ============================================================================
// Text conversions
// ============================================================================

impl FromStr for Json {
    type Err = JsonError;

    fn from_str(text: &str) -> Result<Self> {
        parser::parse(text)
    }
}

/// Renders the same text as [`Json::serialize`]: nothing at all for a tree
/// that cannot be represented as JSON.
impl fmt::Display for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

// ============================================================================
// Operators
// ============================================================================

impl Index<usize> for Json {
    type Output = Json;

    fn index(&self, index: usize) -> &Json {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl IndexMut<usize> for Json {
    fn index_mut(&mut self, index: usize) -> &mut Json {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl Index<&str> for Json {
    type Output = Json;

    fn index(&self, key: &str) -> &Json {
        match self.get_existing(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl IndexMut<&str> for Json {
    fn index_mut(&mut self, key: &str) -> &mut Json {
        self.get_or_insert(key)
    }
}

// ============================================================================
// Construction
// ============================================================================

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Json {
                fn from(n: $ty) -> Self {
                    Json::Integer(i64::from(n))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Json {
    fn from(b: bool) -> Self {
        Json::Boolean(b)
    }
}

impl From<f32> for Json {
    fn from(f: f32) -> Self {
        Json::Real(f64::from(f))
    }
}

impl From<f64> for Json {
    fn from(f: f64) -> Self {
        Json::Real(f)
    }
}

impl From<&str> for Json {
    fn from(s: &str) -> Self {
        Json::Text(s.to_owned())
    }
}

impl From<&String> for Json {
    fn from(s: &String) -> Self {
        Json::Text(s.clone())
    }
}

impl From<String> for Json {
    fn from(s: String) -> Self {
        Json::Text(s)
    }
}

impl From<char> for Json {
    fn from(c: char) -> Self {
        Json::Text(c.to_string())
    }
}

impl From<()> for Json {
    fn from(_: ()) -> Self {
        Json::Null
    }
}

impl<T: Into<Json>> From<Option<T>> for Json {
    fn from(value: Option<T>) -> Self {
        value.map_or(Json::Null, Into::into)
    }
}

impl<T: Into<Json>> From<Vec<T>> for Json {
    fn from(items: Vec<T>) -> Self {
        Json::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Json>, const N: usize> From<[T; N]> for Json {
    fn from(items: [T; N]) -> Self {
        Json::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Json>> From<&[T]> for Json {
    fn from(items: &[T]) -> Self {
        Json::Array(items.iter().cloned().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Json>> From<BTreeMap<K, V>> for Json {
    fn from(entries: BTreeMap<K, V>) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Json>, S> From<HashMap<K, V, S>> for Json {
    fn from(entries: HashMap<K, V, S>) -> Self {
        entries.into_iter().collect()
    }
}

/// Collects into an array.
impl<T: Into<Json>> FromIterator<T> for Json {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Json::Array(iter.into_iter().map(Into::into).collect())
    }
}

/// Collects key/value pairs into an object; later duplicates win.
impl<K: Into<String>, V: Into<Json>> FromIterator<(K, V)> for Json {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Json::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ============================================================================
// Extraction
// ============================================================================

impl TryFrom<&Json> for bool {
    type Error = JsonError;

    fn try_from(value: &Json) -> Result<Self> {
        value.as_bool()
    }
}

impl TryFrom<&Json> for i64 {
    type Error = JsonError;

    fn try_from(value: &Json) -> Result<Self> {
        value.as_int()
    }
}

impl TryFrom<&Json> for i32 {
    type Error = JsonError;

    fn try_from(value: &Json) -> Result<Self> {
        let wide = value.as_int()?;
        i32::try_from(wide).map_err(|_| JsonError::TypeMismatch {
            expected: "integer within i32 range",
            found: "integer",
        })
    }
}

impl TryFrom<&Json> for f64 {
    type Error = JsonError;

    fn try_from(value: &Json) -> Result<Self> {
        value.as_real()
    }
}

/// Narrowing conversion; precision beyond `f32` is rounded away.
impl TryFrom<&Json> for f32 {
    type Error = JsonError;

    fn try_from(value: &Json) -> Result<Self> {
        value.as_real().map(|f| f as f32)
    }
}

impl TryFrom<&Json> for String {
    type Error = JsonError;

    fn try_from(value: &Json) -> Result<Self> {
        value.as_str().map(str::to_owned)
    }
}

// ============================================================================
// Comparison with scalars
// ============================================================================

macro_rules! eq_integer {
    ($($ty:ty),*) => {
        $(
            impl PartialEq<$ty> for Json {
                fn eq(&self, other: &$ty) -> bool {
                    matches!(self, Json::Integer(i) if *i == i64::from(*other))
                }
            }
        )*
    };
}

eq_integer!(i32, i64, u32);

impl PartialEq<bool> for Json {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Json::Boolean(b) if b == other)
    }
}

impl PartialEq<f64> for Json {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Json::Real(f) if f == other)
    }
}

impl PartialEq<str> for Json {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Json::Text(s) if s == other)
    }
}

impl PartialEq<&str> for Json {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Json::Text(s) if s == other)
    }
}
