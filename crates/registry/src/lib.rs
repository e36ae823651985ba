//! Closed runtime enumerations of named singleton values.
//!
//! An [`EnumType`] starts open, is finalized exactly once from a list of names or of
//! `(name, property bag)` pairs, and is closed from then on: its members are fixed, uniquely
//! named, uniquely numbered, and no further member can be constructed.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`EnumType`] | A declared enumeration and its published member table. |
//! | [`Assembler`] | The only constructor of members; exists only while the type is open. |
//! | [`EnumValue`] | One member; lives for the rest of the process. |
//! | [`Props`] / [`Prop`] | Per-member property bags, including deferred getters. |
//! | [`Member`] | Const handle to a member of a static type, see [`closed_enum!`]. |
//! | [`FlagSet`] | Bitwise combination of members. |
//!
//! # Example
//!
//! ```
//! use enumify_registry::{EnumType, Props};
//!
//! static MODE: EnumType = EnumType::new("Mode");
//!
//! MODE.finalize([
//!     ("USER_R", Props::new().ordinal(0o400)),
//!     ("USER_W", Props::new().ordinal(0o200)),
//!     ("USER_X", Props::new().ordinal(0o100)),
//! ])
//! .unwrap();
//!
//! let r = MODE.get("USER_R").unwrap();
//! let w = MODE.get("USER_W").unwrap();
//! assert_eq!(r | w, 0o600);
//! assert_eq!(MODE.from_ordinal(0o100).unwrap().name(), "USER_X");
//! ```

#[cfg(feature = "definitions")]
pub mod definitions;
mod error;
mod flags;
mod index;
mod member;
mod members;
mod props;
mod value;

pub use error::EnumError;
pub use flags::FlagSet;
pub use index::{Assembler, EnumType, Init};
pub use member::Member;
pub use members::Members;
pub use props::{BITS_KEY, Getter, NAME_KEY, ORDINAL_KEY, Prop, PropValue, Props};
pub use value::EnumValue;
