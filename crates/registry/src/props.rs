//! Property bags attached to enum members at definition time.
//!
//! A bag maps property names to [`Prop`]s. Plain values are stored as-is; getters and
//! sibling references are kept unevaluated and resolved every time the property is read,
//! so a bag may point at members that don't exist yet when the bag is written.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::EnumValue;

/// Property key that carries an explicit ordinal.
pub const ORDINAL_KEY: &str = "ordinal";
/// Property key that always resolves to the member's own name.
pub const NAME_KEY: &str = "name";
/// Property key for a flag value kept apart from the ordinal.
pub const BITS_KEY: &str = "bits";

/// Above 2^53 a float can't hold every integer exactly.
const MAX_EXACT_FLOAT: f64 = (1u64 << 53) as f64;

/// Deferred property evaluated against the member that owns it.
pub type Getter = Arc<dyn Fn(&'static EnumValue) -> PropValue + Send + Sync>;

/// A resolved property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
	Null,
	Bool(bool),
	Int(i64),
	/// Unsigned integer above `i64::MAX`.
	UInt(u64),
	Float(f64),
	Str(Arc<str>),
	List(Arc<[PropValue]>),
	/// Another enum member, usually a sibling of the owner.
	Member(&'static EnumValue),
}

impl PropValue {
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Int(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Int(i) => Some(*i as f64),
			Self::UInt(u) => Some(*u as f64),
			Self::Float(f) => Some(*f),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[PropValue]> {
		match self {
			Self::List(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_member(&self) -> Option<&'static EnumValue> {
		match self {
			Self::Member(m) => Some(m),
			_ => None,
		}
	}

	/// Interprets the value as an ordinal.
	///
	/// Integral floats are accepted so that documents which only know "numbers" still work, as
	/// long as they are exact (at most 2^53).
	pub fn as_ordinal(&self) -> Result<u64, &'static str> {
		match self {
			Self::Int(i) => u64::try_from(*i).map_err(|_| "ordinal must not be negative"),
			Self::UInt(u) => Ok(*u),
			Self::Float(f) if !f.is_finite() || f.fract() != 0.0 => Err("ordinal must be an integer"),
			Self::Float(f) if *f < 0.0 => Err("ordinal must not be negative"),
			Self::Float(f) if *f > MAX_EXACT_FLOAT => Err("ordinal out of range"),
			Self::Float(f) => Ok(*f as u64),
			_ => Err("ordinal must be a number"),
		}
	}
}

impl Serialize for PropValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(b) => serializer.serialize_bool(*b),
			Self::Int(i) => serializer.serialize_i64(*i),
			Self::UInt(u) => serializer.serialize_u64(*u),
			Self::Float(f) => serializer.serialize_f64(*f),
			Self::Str(s) => serializer.serialize_str(s),
			Self::List(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items.iter() {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::Member(m) => m.serialize(serializer),
		}
	}
}

impl From<bool> for PropValue {
	fn from(b: bool) -> Self {
		Self::Bool(b)
	}
}

impl From<i32> for PropValue {
	fn from(i: i32) -> Self {
		Self::Int(i.into())
	}
}

impl From<u32> for PropValue {
	fn from(i: u32) -> Self {
		Self::Int(i.into())
	}
}

impl From<i64> for PropValue {
	fn from(i: i64) -> Self {
		Self::Int(i)
	}
}

impl From<u64> for PropValue {
	fn from(i: u64) -> Self {
		i64::try_from(i).map_or(Self::UInt(i), Self::Int)
	}
}

impl From<f64> for PropValue {
	fn from(f: f64) -> Self {
		Self::Float(f)
	}
}

impl From<&str> for PropValue {
	fn from(s: &str) -> Self {
		Self::Str(Arc::from(s))
	}
}

impl From<String> for PropValue {
	fn from(s: String) -> Self {
		Self::Str(Arc::from(s))
	}
}

impl From<&'static EnumValue> for PropValue {
	fn from(m: &'static EnumValue) -> Self {
		Self::Member(m)
	}
}

impl From<Vec<PropValue>> for PropValue {
	fn from(items: Vec<PropValue>) -> Self {
		Self::List(items.into())
	}
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
	fn from(v: Option<T>) -> Self {
		v.map_or(Self::Null, Into::into)
	}
}

/// One entry of a property bag.
#[derive(Clone)]
pub enum Prop {
	/// Stored value, cloned out on read.
	Value(PropValue),
	/// Getter evaluated on every read.
	Computed(Getter),
	/// Name of a member of the same type, resolved on every read.
	Sibling(Box<str>),
}

impl Prop {
	pub fn computed<F>(f: F) -> Self
	where
		F: Fn(&'static EnumValue) -> PropValue + Send + Sync + 'static,
	{
		Self::Computed(Arc::new(f))
	}

	pub fn sibling(name: impl Into<Box<str>>) -> Self {
		Self::Sibling(name.into())
	}

	/// Returns the stored value, or `None` for deferred entries.
	pub fn as_value(&self) -> Option<&PropValue> {
		match self {
			Self::Value(v) => Some(v),
			_ => None,
		}
	}
}

impl fmt::Debug for Prop {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Value(v) => v.fmt(f),
			Self::Computed(_) => f.write_str("<getter>"),
			Self::Sibling(name) => write!(f, "<sibling {name}>"),
		}
	}
}

impl<T: Into<PropValue>> From<T> for Prop {
	fn from(v: T) -> Self {
		Self::Value(v.into())
	}
}

/// Ordered property bag for one member.
#[derive(Debug, Clone, Default)]
pub struct Props {
	entries: IndexMap<Box<str>, Prop>,
}

impl Props {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces a property.
	pub fn with(mut self, key: impl Into<Box<str>>, prop: impl Into<Prop>) -> Self {
		self.insert(key, prop);
		self
	}

	/// Sets an explicit ordinal.
	pub fn ordinal(self, ordinal: u64) -> Self {
		self.with(ORDINAL_KEY, ordinal)
	}

	/// Sets a flag value independent of the ordinal.
	pub fn bits(self, bits: u64) -> Self {
		self.with(BITS_KEY, bits)
	}

	pub fn getter<F>(self, key: impl Into<Box<str>>, f: F) -> Self
	where
		F: Fn(&'static EnumValue) -> PropValue + Send + Sync + 'static,
	{
		self.with(key, Prop::computed(f))
	}

	pub fn sibling(self, key: impl Into<Box<str>>, name: impl Into<Box<str>>) -> Self {
		self.with(key, Prop::sibling(name))
	}

	pub fn insert(&mut self, key: impl Into<Box<str>>, prop: impl Into<Prop>) -> Option<Prop> {
		self.entries.insert(key.into(), prop.into())
	}

	pub fn get(&self, key: &str) -> Option<&Prop> {
		self.entries.get(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
		self.entries.keys().map(|k| &**k)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Prop)> + '_ {
		self.entries.iter().map(|(k, v)| (&**k, v))
	}

	pub(crate) fn take(&mut self, key: &str) -> Option<Prop> {
		self.entries.shift_remove(key)
	}
}

impl<K: Into<Box<str>>, P: Into<Prop>> FromIterator<(K, P)> for Props {
	fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().map(|(k, p)| (k.into(), p.into())).collect(),
		}
	}
}
