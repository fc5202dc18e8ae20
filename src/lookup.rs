//! Raw lookup value coercion
//!
//! Incoming filter parameters arrive as strings; a handful of lookup
//! suffixes imply a richer shape (`__in` carries a comma-separated list,
//! `__isnull` a boolean). The shared coercion lives here so every filter
//! variant parses identically.

use std::fmt;

/// A query parameter value after shape coercion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupValue {
	/// Plain string value
	Str(String),
	/// Boolean, from an `__isnull` lookup
	Bool(bool),
	/// List of values, from an `__in` lookup
	List(Vec<String>),
}

impl LookupValue {
	/// The string payload, when this is a plain value
	pub fn as_str(&self) -> Option<&str> {
		match self {
			LookupValue::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Boolean payload, when this came from an `__isnull` lookup
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			LookupValue::Bool(b) => Some(*b),
			_ => None,
		}
	}
}

impl fmt::Display for LookupValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LookupValue::Str(s) => f.write_str(s),
			LookupValue::Bool(b) => write!(f, "{}", b),
			LookupValue::List(items) => f.write_str(&items.join(",")),
		}
	}
}

/// Coerce a raw parameter value based on its lookup key
///
/// # Examples
///
/// ```
/// use reinhardt_admin_filters::{LookupValue, prepare_lookup_value};
///
/// assert_eq!(
///     prepare_lookup_value("tags__in", "a,b,c"),
///     LookupValue::List(vec!["a".into(), "b".into(), "c".into()])
/// );
/// assert_eq!(prepare_lookup_value("author__isnull", "True"), LookupValue::Bool(true));
/// assert_eq!(prepare_lookup_value("author__isnull", "0"), LookupValue::Bool(false));
/// assert_eq!(prepare_lookup_value("name__exact", "ann"), LookupValue::Str("ann".into()));
/// ```
pub fn prepare_lookup_value(key: &str, raw: &str) -> LookupValue {
	if key.ends_with("__in") {
		LookupValue::List(raw.split(',').map(str::to_string).collect())
	} else if key.ends_with("__isnull") {
		LookupValue::Bool(!matches!(raw.to_ascii_lowercase().as_str(), "false" | "0"))
	} else {
		LookupValue::Str(raw.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("true", true)]
	#[case("True", true)]
	#[case("1", true)]
	#[case("", true)]
	#[case("false", false)]
	#[case("False", false)]
	#[case("0", false)]
	fn isnull_coercion(#[case] raw: &str, #[case] expected: bool) {
		assert_eq!(
			prepare_lookup_value("f__isnull", raw),
			LookupValue::Bool(expected)
		);
	}

	#[test]
	fn in_list_keeps_order() {
		let value = prepare_lookup_value("id__in", "3,1,2");
		assert_eq!(
			value,
			LookupValue::List(vec!["3".into(), "1".into(), "2".into()])
		);
	}
}
