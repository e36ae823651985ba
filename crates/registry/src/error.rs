/// Errors raised while declaring or finalizing an enum type.
///
/// Lookup misses are not errors; they surface as `None` from the read methods.
#[derive(Debug, thiserror::Error)]
pub enum EnumError {
	/// A new member was requested for a type that is already closed.
	#[error("enum {type_name} is closed and can't be instantiated")]
	Instantiation { type_name: &'static str },

	/// Two members of one finalize call claimed the same ordinal.
	#[error("duplicate ordinal in {type_name}: {name} claims {ordinal}, already held by {existing}")]
	DuplicateOrdinal {
		type_name: &'static str,
		name: Box<str>,
		ordinal: u64,
		existing: Box<str>,
	},

	/// An explicit ordinal was not a non-negative integer.
	#[error("invalid ordinal for {type_name}.{name}: {reason}")]
	InvalidOrdinal {
		type_name: &'static str,
		name: Box<str>,
		reason: &'static str,
	},

	/// A member name was registered twice.
	#[error("duplicate member name in {type_name}: {name}")]
	DuplicateName { type_name: &'static str, name: Box<str> },

	/// A flag set was handed a member of another enum type.
	#[error("{found} is not a member of {expected}")]
	ForeignMember { expected: &'static str, found: String },

	#[cfg(feature = "definitions")]
	#[error("invalid TOML definition: {0}")]
	Toml(#[from] toml::de::Error),

	#[cfg(feature = "definitions")]
	#[error("invalid JSON definition: {0}")]
	Json(#[from] serde_json::Error),
}
