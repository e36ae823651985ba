use parking_lot::MutexGuard;
use rustc_hash::FxHashMap;

use super::{EnumType, Table};
use crate::props::{NAME_KEY, ORDINAL_KEY};
use crate::{EnumError, EnumValue, Prop, Props};

/// The open-phase constructor of an [`EnumType`].
///
/// Obtained from [`EnumType::assemble`]; holds the type's assembly lock until it is finished or
/// dropped. Dropping it without calling [`finish`](Self::finish) leaves the type open and
/// publishes nothing.
pub struct Assembler {
	owner: &'static EnumType,
	_guard: MutexGuard<'static, ()>,
	/// Members in definition order.
	values: Vec<EnumValue>,
	names: FxHashMap<Box<str>, u32>,
	ordinals: FxHashMap<u64, u32>,
	max_ordinal: Option<u64>,
}

impl Assembler {
	pub(super) fn new(owner: &'static EnumType, guard: MutexGuard<'static, ()>) -> Self {
		Self {
			owner,
			_guard: guard,
			values: Vec::new(),
			names: FxHashMap::default(),
			ordinals: FxHashMap::default(),
			max_ordinal: None,
		}
	}

	/// Returns the type being assembled.
	pub fn enum_type(&self) -> &'static EnumType {
		self.owner
	}

	/// Returns the number of members constructed so far.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Constructs one member from its property bag.
	///
	/// An `ordinal` entry must be a plain non-negative integer that no earlier member holds.
	/// Without one, the member gets one more than the largest ordinal seen so far. Getters in the
	/// bag are carried over unevaluated.
	pub fn construct(&mut self, name: impl Into<Box<str>>, mut props: Props) -> Result<&mut Self, EnumError> {
		let name = name.into();
		let type_name = self.owner.name();

		if self.names.contains_key(&name) {
			return Err(EnumError::DuplicateName { type_name, name });
		}

		let ordinal = match props.take(ORDINAL_KEY) {
			Some(Prop::Value(v)) => v
				.as_ordinal()
				.map_err(|reason| EnumError::InvalidOrdinal { type_name, name: name.clone(), reason })?,
			Some(_) => {
				return Err(EnumError::InvalidOrdinal {
					type_name,
					name,
					reason: "ordinal must be a plain value",
				});
			}
			None => match self.max_ordinal {
				None => 0,
				Some(max) => max.checked_add(1).ok_or_else(|| EnumError::InvalidOrdinal {
					type_name,
					name: name.clone(),
					reason: "ordinal out of range",
				})?,
			},
		};

		if let Some(&existing) = self.ordinals.get(&ordinal) {
			return Err(EnumError::DuplicateOrdinal {
				type_name,
				name,
				ordinal,
				existing: self.values[existing as usize].name().into(),
			});
		}

		if props.take(NAME_KEY).is_some() {
			tracing::warn!(enum_type = type_name, member = %name, "ignoring `name` property; members keep their own name");
		}

		tracing::trace!(enum_type = type_name, member = %name, ordinal, "constructed enum member");

		self.max_ordinal = Some(self.max_ordinal.map_or(ordinal, |max| max.max(ordinal)));
		let pos = self.values.len() as u32;
		self.names.insert(name.clone(), pos);
		self.ordinals.insert(ordinal, pos);
		self.values.push(EnumValue::new(self.owner, name, ordinal, props));
		Ok(self)
	}

	/// Publishes the members and closes the type.
	pub fn finish(self) -> Result<&'static EnumType, EnumError> {
		let owner = self.owner;
		let count = self.values.len();

		let mut indexed: Vec<(usize, EnumValue)> = self.values.into_iter().enumerate().collect();
		indexed.sort_by_key(|(_, v)| v.ordinal());

		let mut declared = vec![0u32; count];
		for (pos, (decl, _)) in indexed.iter().enumerate() {
			declared[*decl] = pos as u32;
		}
		let values: Box<[EnumValue]> = indexed.into_iter().map(|(_, v)| v).collect();

		let mut by_name = FxHashMap::with_capacity_and_hasher(count, Default::default());
		let mut by_ordinal = FxHashMap::with_capacity_and_hasher(count, Default::default());
		for (pos, value) in values.iter().enumerate() {
			by_name.insert(Box::from(value.name()), pos as u32);
			by_ordinal.insert(value.ordinal(), pos as u32);
		}

		let max_ordinal = values.last().map(EnumValue::ordinal);
		owner.publish(Table {
			values,
			declared: declared.into_boxed_slice(),
			by_name,
			by_ordinal,
		})?;

		tracing::debug!(enum_type = owner.name(), members = count, ?max_ordinal, "finalized enum");
		Ok(owner)
	}
}
