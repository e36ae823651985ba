//! Bit-flag combinations of enum members.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{EnumError, EnumType, EnumValue};

/// A set of members of one type, combined by their [`bits`](EnumValue::bits).
///
/// Flag values default to the ordinal, but a member may carry a separate `bits` property so
/// that ordinal uniqueness and flag layout stay independent.
#[derive(Clone, Copy)]
pub struct FlagSet {
	owner: &'static EnumType,
	bits: u64,
}

impl FlagSet {
	pub fn empty(owner: &'static EnumType) -> Self {
		Self { owner, bits: 0 }
	}

	pub fn from_bits(owner: &'static EnumType, bits: u64) -> Self {
		Self { owner, bits }
	}

	/// Combines members of `owner`.
	pub fn of<I>(owner: &'static EnumType, values: I) -> Result<Self, EnumError>
	where
		I: IntoIterator<Item = &'static EnumValue>,
	{
		let mut set = Self::empty(owner);
		for value in values {
			set.insert(value)?;
		}
		Ok(set)
	}

	pub fn bits(&self) -> u64 {
		self.bits
	}

	pub fn enum_type(&self) -> &'static EnumType {
		self.owner
	}

	pub fn is_empty(&self) -> bool {
		self.bits == 0
	}

	pub fn insert(&mut self, value: &'static EnumValue) -> Result<(), EnumError> {
		self.check(value)?;
		self.bits |= value.bits();
		Ok(())
	}

	pub fn remove(&mut self, value: &'static EnumValue) -> Result<(), EnumError> {
		self.check(value)?;
		self.bits &= !value.bits();
		Ok(())
	}

	/// Returns true if every bit of `value` is set. Zero-valued members are never contained.
	pub fn contains(&self, value: &'static EnumValue) -> bool {
		let bits = value.bits();
		self.owner.contains(value) && bits != 0 && self.bits & bits == bits
	}

	/// Members whose bits are all set, in ascending ordinal order.
	pub fn members(&self) -> impl Iterator<Item = &'static EnumValue> + '_ {
		self.owner.iter().filter(|&v| self.contains(v))
	}

	fn check(&self, value: &EnumValue) -> Result<(), EnumError> {
		if self.owner.contains(value) {
			Ok(())
		} else {
			Err(EnumError::ForeignMember {
				expected: self.owner.name(),
				found: value.to_string(),
			})
		}
	}
}

impl PartialEq for FlagSet {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.owner, other.owner) && self.bits == other.bits
	}
}

impl Eq for FlagSet {}

impl Hash for FlagSet {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::ptr::hash(self.owner, state);
		self.bits.hash(state);
	}
}

impl fmt::Display for FlagSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut first = true;
		for value in self.members() {
			if !first {
				f.write_str(" | ")?;
			}
			first = false;
			fmt::Display::fmt(value, f)?;
		}
		if first {
			write!(f, "{}()", self.owner.name())?;
		}
		Ok(())
	}
}

impl fmt::Debug for FlagSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "FlagSet({self}, {:#b})", self.bits)
	}
}
