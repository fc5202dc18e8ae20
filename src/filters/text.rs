//! Substring search filter for long text columns

use super::{BoundLookup, Choice, FieldFilter, FilterContext, FilterDescriptor, resolve_title};
use crate::fields::{FieldDescriptor, FieldKind};
use crate::lookup::LookupValue;
use crate::params::{FilterParams, UrlQuery};
use crate::types::errors::AdminResult;
use std::collections::BTreeMap;

/// Free-text input widget backed by a `contains` lookup
///
/// Matches text columns and char columns long enough that an enumerated
/// widget would be useless.
#[derive(Debug)]
pub struct TextFieldFilter {
	title: String,
	field_path: String,
	url: UrlQuery,
	used: BTreeMap<String, LookupValue>,
	search: BoundLookup,
}

impl TextFieldFilter {
	/// Registry descriptor for this variant
	pub fn descriptor() -> FilterDescriptor {
		FilterDescriptor {
			name: "text",
			test: Self::test,
			build: Self::build,
		}
	}

	pub(crate) fn test(field: &FieldDescriptor, _ctx: &FilterContext<'_>, _path: &str) -> bool {
		match field.kind {
			FieldKind::Char { max_length } => max_length > 20,
			FieldKind::Text => true,
			_ => false,
		}
	}

	pub(crate) fn build(
		field: &FieldDescriptor,
		params: &mut FilterParams,
		ctx: &FilterContext<'_>,
		field_path: &str,
	) -> AdminResult<Box<dyn FieldFilter>> {
		let title = resolve_title(field, field_path)?;
		let mut used = BTreeMap::new();
		let search = BoundLookup::bind("{}__contains", field_path, params, &mut used);
		Ok(Box::new(Self {
			title,
			field_path: field_path.to_string(),
			url: ctx.url(),
			used,
			search,
		}))
	}

	/// Prefixed parameter name the input widget submits under
	pub fn input_name(&self) -> &str {
		&self.search.qualified
	}

	/// Current search term, empty when unfiltered
	pub fn value(&self) -> &str {
		self.search.raw_str()
	}
}

impl FieldFilter for TextFieldFilter {
	fn title(&self) -> &str {
		&self.title
	}

	fn template(&self) -> &str {
		"admin/filters/char.html"
	}

	fn field_path(&self) -> &str {
		&self.field_path
	}

	fn used_params(&self) -> &BTreeMap<String, LookupValue> {
		&self.used
	}

	fn url_query(&self) -> &UrlQuery {
		&self.url
	}

	// Input widget: no canned choices
	fn choices(&self) -> Vec<Choice> {
		Vec::new()
	}
}
