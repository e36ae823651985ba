//! Enum members and their coercions.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr};

use serde::{Serialize, Serializer};

use crate::props::{BITS_KEY, NAME_KEY, ORDINAL_KEY};
use crate::{EnumType, Prop, PropValue, Props};

/// One member of a closed [`EnumType`].
///
/// Members are only ever handed out as `&'static EnumValue`, so equality is identity.
pub struct EnumValue {
	owner: &'static EnumType,
	name: Box<str>,
	ordinal: u64,
	props: Props,
}

impl EnumValue {
	pub(crate) fn new(owner: &'static EnumType, name: Box<str>, ordinal: u64, props: Props) -> Self {
		Self {
			owner,
			name,
			ordinal,
			props,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn ordinal(&self) -> u64 {
		self.ordinal
	}

	/// Returns the type this member belongs to.
	pub fn enum_type(&self) -> &'static EnumType {
		self.owner
	}

	/// Returns the member's property bag, without `name` and `ordinal`.
	pub fn props(&self) -> &Props {
		&self.props
	}

	/// Reads a property.
	///
	/// `name` and `ordinal` always resolve to the member's own fields. Getters run and sibling
	/// references resolve on every call.
	pub fn get(&'static self, key: &str) -> Option<PropValue> {
		match key {
			NAME_KEY => return Some(PropValue::from(self.name())),
			ORDINAL_KEY => return Some(PropValue::from(self.ordinal)),
			_ => {}
		}
		match self.props.get(key)? {
			Prop::Value(v) => Some(v.clone()),
			Prop::Computed(getter) => Some(getter(self)),
			Prop::Sibling(name) => self.owner.get(name).map(PropValue::Member),
		}
	}

	/// Reads a property that refers to another member.
	pub fn member(&'static self, key: &str) -> Option<&'static EnumValue> {
		self.get(key)?.as_member()
	}

	/// Numeric value of the member: its ordinal.
	pub fn to_numeric(&self) -> u64 {
		self.ordinal
	}

	/// Interchange value of the member: its ordinal.
	pub fn to_serializable(&self) -> u64 {
		self.ordinal
	}

	/// Flag value: the `bits` property when it holds a valid ordinal, otherwise the ordinal.
	pub fn bits(&'static self) -> u64 {
		self.get(BITS_KEY)
			.and_then(|v| v.as_ordinal().ok())
			.unwrap_or(self.ordinal)
	}
}

impl fmt::Display for EnumValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.owner.name(), self.name)
	}
}

impl fmt::Debug for EnumValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}({})", self.owner.name(), self.name, self.ordinal)
	}
}

impl PartialEq for EnumValue {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self, other)
	}
}

impl Eq for EnumValue {}

impl Hash for EnumValue {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::ptr::hash(self, state);
	}
}

/// Members of the same type compare by ordinal; members of different types are unordered.
impl PartialOrd for EnumValue {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		std::ptr::eq(self.owner, other.owner).then(|| self.ordinal.cmp(&other.ordinal))
	}
}

impl Serialize for EnumValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_u64(self.ordinal)
	}
}

impl From<&EnumValue> for u64 {
	fn from(value: &EnumValue) -> Self {
		value.ordinal
	}
}

impl BitOr for &EnumValue {
	type Output = u64;

	fn bitor(self, rhs: Self) -> u64 {
		self.ordinal | rhs.ordinal
	}
}

impl BitOr<&EnumValue> for u64 {
	type Output = u64;

	fn bitor(self, rhs: &EnumValue) -> u64 {
		self | rhs.ordinal
	}
}

impl BitAnd for &EnumValue {
	type Output = u64;

	fn bitand(self, rhs: Self) -> u64 {
		self.ordinal & rhs.ordinal
	}
}

impl BitAnd<&EnumValue> for u64 {
	type Output = u64;

	fn bitand(self, rhs: &EnumValue) -> u64 {
		self & rhs.ordinal
	}
}
