use crate::Props;

/// The member list handed to [`EnumType::finalize`](crate::EnumType::finalize).
#[derive(Debug, Clone)]
pub enum Members {
	/// Bare names; every member gets the next sequential ordinal.
	Names(Vec<Box<str>>),
	/// Names with property bags, in definition order.
	Bags(Vec<(Box<str>, Props)>),
}

impl Members {
	pub fn names<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Box<str>>,
	{
		Self::Names(names.into_iter().map(Into::into).collect())
	}

	pub fn bags<I, S>(bags: I) -> Self
	where
		I: IntoIterator<Item = (S, Props)>,
		S: Into<Box<str>>,
	{
		Self::Bags(bags.into_iter().map(|(name, props)| (name.into(), props)).collect())
	}

	pub fn len(&self) -> usize {
		match self {
			Self::Names(names) => names.len(),
			Self::Bags(bags) => bags.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Flattens into `(name, props)` pairs; bare names get empty bags.
	pub fn into_entries(self) -> Vec<(Box<str>, Props)> {
		match self {
			Self::Names(names) => names.into_iter().map(|name| (name, Props::new())).collect(),
			Self::Bags(bags) => bags,
		}
	}
}

impl<const N: usize> From<[&str; N]> for Members {
	fn from(names: [&str; N]) -> Self {
		Self::names(names)
	}
}

impl From<&[&str]> for Members {
	fn from(names: &[&str]) -> Self {
		Self::names(names.iter().copied())
	}
}

impl From<Vec<String>> for Members {
	fn from(names: Vec<String>) -> Self {
		Self::names(names)
	}
}

impl<const N: usize> From<[(&str, Props); N]> for Members {
	fn from(bags: [(&str, Props); N]) -> Self {
		Self::bags(bags)
	}
}

impl From<Vec<(String, Props)>> for Members {
	fn from(bags: Vec<(String, Props)>) -> Self {
		Self::bags(bags)
	}
}
