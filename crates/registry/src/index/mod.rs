#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Enum type declaration, finalization and lookup.
//!
//! # Mental Model
//!
//! 1. **Open:** an [`EnumType`] is declared (usually as a `static`) with a display name and,
//!    optionally, a deferred initializer. No members exist yet.
//! 2. **Assembly:** [`EnumType::assemble`] hands out the only constructor, an [`Assembler`],
//!    which validates names and ordinals member by member.
//! 3. **Publication:** [`Assembler::finish`] sorts the members, builds the lookup maps and
//!    publishes the table in one step. The type is closed from then on.
//! 4. **Consumption:** reads ([`EnumType::get`], [`EnumType::from_ordinal`],
//!    [`EnumType::iter`]) are lock-free loads of the published table.
//!
//! # Invariants
//!
//! - Must publish all members at once or none.
//!   - Enforced in: [`Assembler::finish`] (single `OnceLock::set`).
//!   - Tested by: `index::tests::failed_finalize_publishes_nothing`
//! - Must reject construction once closed.
//!   - Enforced in: [`EnumType::assemble`].
//!   - Tested by: `index::tests::closed_type_rejects_assembly`
//! - Must keep names and ordinals unique.
//!   - Enforced in: [`Assembler::construct`].
//!   - Tested by: `index::tests::duplicate_ordinal_is_rejected`, `index::tests::duplicate_name_is_rejected`
//!
//! # Concurrency
//!
//! Assembly holds the type's mutex, so competing initializers serialize and the loser sees a
//! closed type. The table is published through a `OnceLock`, which readers observe with
//! acquire semantics. Assemblers are not re-entrant, and a lazy initializer that reads its own
//! type panics instead of waiting on itself.

mod assemble;

use std::cell::RefCell;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::de::{Deserialize, Deserializer, Error as _};

pub use assemble::Assembler;

use crate::{EnumError, EnumValue, Members};

/// Initializer run on the first read of a lazily declared type.
pub type Init = fn() -> Members;

/// Closed table of members, built once by an [`Assembler`].
pub(crate) struct Table {
	/// Members in ascending ordinal order.
	values: Box<[EnumValue]>,
	/// Positions into `values`, in definition order.
	declared: Box<[u32]>,
	by_name: FxHashMap<Box<str>, u32>,
	by_ordinal: FxHashMap<u64, u32>,
}

/// A closed set of named singleton values.
///
/// Declare one per enumeration, typically as a `static`, then finalize it exactly once:
///
/// ```
/// use enumify_registry::EnumType;
///
/// static COLOR: EnumType = EnumType::new("Color");
///
/// COLOR.finalize(["RED", "GREEN", "BLUE"]).unwrap();
/// assert_eq!(COLOR.get("GREEN").unwrap().ordinal(), 1);
/// assert_eq!(COLOR.get("BLUE").unwrap().to_string(), "Color.BLUE");
/// assert!(COLOR.finalize(["AGAIN"]).is_err());
/// ```
pub struct EnumType {
	name: &'static str,
	init: Option<Init>,
	table: OnceLock<Table>,
	lock: Mutex<()>,
}

impl EnumType {
	/// Declares an open type that must be finalized explicitly.
	pub const fn new(name: &'static str) -> Self {
		Self {
			name,
			init: None,
			table: OnceLock::new(),
			lock: parking_lot::const_mutex(()),
		}
	}

	/// Declares a type that finalizes itself from `init` on first read.
	///
	/// # Panics
	///
	/// The first read panics if `init` yields an invalid member list.
	pub const fn lazy(name: &'static str, init: Init) -> Self {
		Self {
			name,
			init: Some(init),
			table: OnceLock::new(),
			lock: parking_lot::const_mutex(()),
		}
	}

	/// Declares an open type that lives for the rest of the process.
	///
	/// Used for enumerations whose shape is only known at runtime.
	pub fn leak(name: impl Into<String>) -> &'static Self {
		let name: &'static str = Box::leak(name.into().into_boxed_str());
		Box::leak(Box::new(Self::new(name)))
	}

	/// Returns the display name used in `Type.MEMBER` strings.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Returns true once the type has been finalized.
	///
	/// Doesn't trigger a deferred initializer.
	pub fn is_closed(&self) -> bool {
		self.table.get().is_some()
	}

	/// Opens the constructor for this type.
	///
	/// Fails with [`EnumError::Instantiation`] if the type is already closed. A lazy type is
	/// finalized by its initializer first, so it always fails. Blocks while another thread is
	/// assembling the same type.
	pub fn assemble(&'static self) -> Result<Assembler, EnumError> {
		self.force_init();
		self.open()
	}

	/// Creates every member and closes the type.
	///
	/// Nothing is published if any member is rejected.
	pub fn finalize(&'static self, members: impl Into<Members>) -> Result<&'static Self, EnumError> {
		self.force_init();
		self.build(members.into())
	}

	fn open(&'static self) -> Result<Assembler, EnumError> {
		self.try_open().ok_or_else(|| {
			tracing::warn!(enum_type = self.name, "rejected instantiation of a closed enum");
			EnumError::Instantiation { type_name: self.name }
		})
	}

	/// Takes the assembly lock, or returns `None` once the type is closed.
	fn try_open(&'static self) -> Option<Assembler> {
		let guard = self.lock.lock();
		if self.is_closed() {
			return None;
		}
		Some(Assembler::new(self, guard))
	}

	fn build(&'static self, members: Members) -> Result<&'static Self, EnumError> {
		Self::fill(self.open()?, members)
	}

	fn fill(mut assembler: Assembler, members: Members) -> Result<&'static Self, EnumError> {
		for (name, props) in members.into_entries() {
			assembler.construct(name, props)?;
		}
		assembler.finish()
	}

	/// Looks up a member by name.
	pub fn get(&'static self, name: &str) -> Option<&'static EnumValue> {
		let table = self.table()?;
		let pos = *table.by_name.get(name)?;
		Some(&table.values[pos as usize])
	}

	/// Looks up a member by ordinal.
	pub fn from_ordinal(&'static self, ordinal: u64) -> Option<&'static EnumValue> {
		let table = self.table()?;
		let pos = *table.by_ordinal.get(&ordinal)?;
		Some(&table.values[pos as usize])
	}

	/// Returns true if `value` belongs to this type.
	pub fn contains(&self, value: &EnumValue) -> bool {
		std::ptr::eq(self, value.enum_type())
	}

	/// Returns all members in ascending ordinal order.
	pub fn values(&'static self) -> &'static [EnumValue] {
		self.table().map(|t| &*t.values).unwrap_or(&[])
	}

	/// Iterates all members in ascending ordinal order.
	///
	/// Each call starts a fresh pass.
	pub fn iter(&'static self) -> std::slice::Iter<'static, EnumValue> {
		self.values().iter()
	}

	/// Iterates all members in the order they were defined.
	pub fn iter_declared(&'static self) -> impl ExactSizeIterator<Item = &'static EnumValue> {
		let (values, declared): (&'static [EnumValue], &'static [u32]) = match self.table() {
			Some(t) => (&*t.values, &*t.declared),
			None => (&[] as &[EnumValue], &[] as &[u32]),
		};
		declared.iter().map(move |&pos| &values[pos as usize])
	}

	/// Iterates member names in ascending ordinal order.
	pub fn names(&'static self) -> impl ExactSizeIterator<Item = &'static str> {
		self.iter().map(EnumValue::name)
	}

	pub fn len(&'static self) -> usize {
		self.values().len()
	}

	pub fn is_empty(&'static self) -> bool {
		self.values().is_empty()
	}

	/// Decodes a member from its serialized ordinal.
	pub fn decode<'de, D: Deserializer<'de>>(&'static self, deserializer: D) -> Result<&'static EnumValue, D::Error> {
		let ordinal = u64::deserialize(deserializer)?;
		self.from_ordinal(ordinal)
			.ok_or_else(|| D::Error::custom(format_args!("no member of {} has ordinal {}", self.name, ordinal)))
	}

	/// Returns the published table, running the deferred initializer if there is one.
	///
	/// # Panics
	///
	/// Panics if the initializer fails, or if it reads this type while it runs.
	fn table(&'static self) -> Option<&'static Table> {
		if let Some(table) = self.table.get() {
			return Some(table);
		}
		let init = self.init?;
		// Checked before locking: the assembly lock is not re-entrant.
		let _entered = Initializing::enter(self);
		// Losing a first-read race is not a rejected instantiation.
		let Some(assembler) = self.try_open() else {
			return self.table.get();
		};
		if let Err(e) = Self::fill(assembler, init()) {
			panic!("enum {}: {}", self.name, e);
		}
		self.table.get()
	}

	fn force_init(&'static self) {
		if self.init.is_some() {
			self.table();
		}
	}

	fn publish(&self, table: Table) -> Result<(), EnumError> {
		self.table
			.set(table)
			.map_err(|_| EnumError::Instantiation { type_name: self.name })
	}
}

thread_local! {
	static INITIALIZING: RefCell<Vec<*const EnumType>> = const { RefCell::new(Vec::new()) };
}

/// Marks a lazy type as running its initializer on the current thread.
struct Initializing(*const EnumType);

impl Initializing {
	fn enter(ty: &'static EnumType) -> Self {
		let ptr: *const EnumType = ty;
		let reentered = INITIALIZING.with_borrow_mut(|stack| {
			if stack.contains(&ptr) {
				return true;
			}
			stack.push(ptr);
			false
		});
		if reentered {
			panic!(
				"enum {}: member read while its definition is being built; use Prop::sibling or Prop::computed",
				ty.name
			);
		}
		Self(ptr)
	}
}

impl Drop for Initializing {
	fn drop(&mut self) {
		INITIALIZING.with_borrow_mut(|stack| stack.retain(|&p| p != self.0));
	}
}

impl fmt::Debug for EnumType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut s = f.debug_struct("EnumType");
		s.field("name", &self.name);
		match self.table.get() {
			Some(t) => s.field("members", &t.values.iter().map(EnumValue::name).collect::<Vec<_>>()),
			None => s.field("members", &format_args!("<open>")),
		};
		s.finish()
	}
}

impl fmt::Display for EnumType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

impl IntoIterator for &'static EnumType {
	type Item = &'static EnumValue;
	type IntoIter = std::slice::Iter<'static, EnumValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(test)]
mod tests;
