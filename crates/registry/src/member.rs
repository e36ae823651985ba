//! Static member handles and the [`closed_enum!`](crate::closed_enum) declaration macro.

use std::fmt;
use std::ops::Deref;
use std::sync::OnceLock;

use crate::{EnumType, EnumValue};

/// Named handle to one member of a static [`EnumType`].
///
/// Const-constructible, so it can live in a `static` next to its type. The first dereference
/// finalizes the type if it's lazy and caches the member.
pub struct Member {
	owner: &'static EnumType,
	name: &'static str,
	resolved: OnceLock<&'static EnumValue>,
}

impl Member {
	pub const fn new(owner: &'static EnumType, name: &'static str) -> Self {
		Self {
			owner,
			name,
			resolved: OnceLock::new(),
		}
	}

	/// Resolves the handle.
	///
	/// # Panics
	///
	/// Panics if the type has no member with this handle's name, which means the handle was
	/// declared against the wrong type or before the type was finalized.
	pub fn value(&self) -> &'static EnumValue {
		*self.resolved.get_or_init(|| {
			self.owner
				.get(self.name)
				.unwrap_or_else(|| panic!("enum {} has no member {}", self.owner.name(), self.name))
		})
	}
}

impl Deref for Member {
	type Target = EnumValue;

	fn deref(&self) -> &EnumValue {
		self.value()
	}
}

impl PartialEq<EnumValue> for Member {
	fn eq(&self, other: &EnumValue) -> bool {
		self.value() == other
	}
}

impl PartialEq<Member> for EnumValue {
	fn eq(&self, other: &Member) -> bool {
		self == other.value()
	}
}

impl PartialEq<&EnumValue> for Member {
	fn eq(&self, other: &&EnumValue) -> bool {
		self.value() == *other
	}
}

impl fmt::Debug for Member {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.owner.name(), self.name)
	}
}

/// Declares a lazily finalized enum type and a static [`Member`] handle per constant.
///
/// The generated module exposes `TYPE` and one static per member. Property values are any
/// expression convertible into a [`Prop`](crate::Prop), so getters and sibling references can
/// point at members declared further down.
///
/// ```
/// use enumify_registry::closed_enum;
///
/// closed_enum! {
///     pub mod tic_tac_toe: "TicTacToeColor" {
///         O { inverse: enumify_registry::Prop::sibling("X") },
///         X { inverse: enumify_registry::Prop::sibling("O") },
///     }
/// }
///
/// assert_eq!(tic_tac_toe::X.member("inverse"), Some(tic_tac_toe::O.value()));
/// assert_eq!(tic_tac_toe::O.to_string(), "TicTacToeColor.O");
/// ```
#[macro_export]
macro_rules! closed_enum {
	(@props $( $key:ident : $value:expr ),*) => {
		$crate::Props::new() $( .with(stringify!($key), $value) )*
	};
	(
		$(#[$meta:meta])*
		$vis:vis mod $module:ident : $type_name:literal {
			$( $member:ident $( { $( $key:ident : $value:expr ),* $(,)? } )? ),* $(,)?
		}
	) => {
		$(#[$meta])*
		#[allow(non_upper_case_globals)]
		$vis mod $module {
			#[allow(unused_imports)]
			use super::*;

			pub static TYPE: $crate::EnumType = $crate::EnumType::lazy($type_name, members);

			fn members() -> $crate::Members {
				$crate::Members::Bags(::std::vec![
					$( (
						::std::convert::From::from(stringify!($member)),
						$crate::closed_enum!(@props $( $( $key : $value ),* )?),
					), )*
				])
			}

			$( pub static $member: $crate::Member = $crate::Member::new(&TYPE, stringify!($member)); )*
		}
	};
}
