//! Enum definitions loaded from TOML or JSON documents.
//!
//! A document lists its members either as bare names or as a table of property bags:
//!
//! ```toml
//! name = "Mode"
//!
//! [members.USER_R]
//! ordinal = 256
//! label = "user read"
//!
//! [members.USER_W]
//! ordinal = 128
//! ```
//!
//! Member order is document order. Documents hold plain values only; getters have to be
//! declared in code.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{EnumError, EnumType, Members, PropValue, Props};

#[derive(Debug, Deserialize)]
struct Document {
	name: Option<String>,
	members: MembersDoc,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MembersDoc {
	Names(Vec<String>),
	Bags(IndexMap<String, IndexMap<String, ValueDoc>>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ValueDoc {
	Null,
	Bool(bool),
	Int(i64),
	UInt(u64),
	Float(f64),
	Str(String),
	List(Vec<ValueDoc>),
}

impl From<ValueDoc> for PropValue {
	fn from(v: ValueDoc) -> Self {
		match v {
			ValueDoc::Null => PropValue::Null,
			ValueDoc::Bool(b) => PropValue::Bool(b),
			ValueDoc::Int(i) => PropValue::Int(i),
			ValueDoc::UInt(u) => PropValue::UInt(u),
			ValueDoc::Float(f) => PropValue::Float(f),
			ValueDoc::Str(s) => PropValue::from(s),
			ValueDoc::List(items) => PropValue::from(items.into_iter().map(PropValue::from).collect::<Vec<_>>()),
		}
	}
}

impl From<MembersDoc> for Members {
	fn from(doc: MembersDoc) -> Self {
		match doc {
			MembersDoc::Names(names) => Members::names(names),
			MembersDoc::Bags(bags) => Members::bags(
				bags.into_iter()
					.map(|(name, bag)| (name, bag.into_iter().map(|(k, v)| (k, PropValue::from(v))).collect::<Props>())),
			),
		}
	}
}

impl Members {
	/// Parses the member list of a TOML document.
	pub fn from_toml_str(src: &str) -> Result<Self, EnumError> {
		let doc: Document = toml::from_str(src)?;
		Ok(doc.members.into())
	}

	/// Parses the member list of a JSON document.
	pub fn from_json_str(src: &str) -> Result<Self, EnumError> {
		let doc: Document = serde_json::from_str(src)?;
		Ok(doc.members.into())
	}
}

/// Declares and finalizes a type from a TOML document.
///
/// The document's `name` wins over `fallback_name`.
///
/// A document that parses but fails to finalize leaves its open type leaked. Each load declares
/// a fresh type, so a corrected document can still be loaded under the same name.
pub fn load_toml(fallback_name: &str, src: &str) -> Result<&'static EnumType, EnumError> {
	let doc: Document = toml::from_str(src)?;
	load(fallback_name, doc)
}

/// Declares and finalizes a type from a JSON document.
///
/// The document's `name` wins over `fallback_name`.
///
/// A document that parses but fails to finalize leaves its open type leaked. Each load declares
/// a fresh type, so a corrected document can still be loaded under the same name.
pub fn load_json(fallback_name: &str, src: &str) -> Result<&'static EnumType, EnumError> {
	let doc: Document = serde_json::from_str(src)?;
	load(fallback_name, doc)
}

fn load(fallback_name: &str, doc: Document) -> Result<&'static EnumType, EnumError> {
	let name = doc.name.unwrap_or_else(|| fallback_name.to_owned());
	tracing::debug!(enum_type = %name, "loading enum definition");
	let ty = EnumType::leak(name);
	ty.finalize(Members::from(doc.members))
		.inspect_err(|e| tracing::warn!(enum_type = ty.name(), error = %e, "rejected enum definition"))
}
