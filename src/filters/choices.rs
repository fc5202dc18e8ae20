//! Filter for fields with declared choices

use super::{BoundLookup, Choice, FieldFilter, FilterContext, FilterDescriptor, resolve_title};
use crate::fields::FieldDescriptor;
use crate::lookup::LookupValue;
use crate::params::{FilterParams, UrlQuery};
use crate::types::errors::AdminResult;
use std::collections::BTreeMap;

/// One link per declared `(value, label)` choice
#[derive(Debug)]
pub struct ChoicesFieldFilter {
	title: String,
	field_path: String,
	url: UrlQuery,
	used: BTreeMap<String, LookupValue>,
	exact: BoundLookup,
	field_choices: Vec<(String, String)>,
}

impl ChoicesFieldFilter {
	/// Registry descriptor for this variant
	pub fn descriptor() -> FilterDescriptor {
		FilterDescriptor {
			name: "choices",
			test: Self::test,
			build: Self::build,
		}
	}

	pub(crate) fn test(field: &FieldDescriptor, _ctx: &FilterContext<'_>, _path: &str) -> bool {
		!field.choices.is_empty()
	}

	pub(crate) fn build(
		field: &FieldDescriptor,
		params: &mut FilterParams,
		ctx: &FilterContext<'_>,
		field_path: &str,
	) -> AdminResult<Box<dyn FieldFilter>> {
		let title = resolve_title(field, field_path)?;
		let mut used = BTreeMap::new();
		let exact = BoundLookup::bind("{}__exact", field_path, params, &mut used);
		Ok(Box::new(Self {
			title,
			field_path: field_path.to_string(),
			url: ctx.url(),
			used,
			exact,
			field_choices: field.choices.clone(),
		}))
	}
}

impl FieldFilter for ChoicesFieldFilter {
	fn title(&self) -> &str {
		&self.title
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

	fn choices(&self) -> Vec<Choice> {
		// Empty-string comparison, not identity: an absent parameter and an
		// explicitly empty one both mean "All".
		let mut out = vec![Choice {
			selected: self.exact.raw_str().is_empty(),
			query_string: self
				.url
				.query_string(&[], &[self.exact.qualified.clone()]),
			display: "All".to_string(),
		}];
		for (value, display) in &self.field_choices {
			out.push(Choice {
				selected: self.exact.raw_str() == value,
				query_string: self
					.url
					.query_string(&[(self.exact.qualified.clone(), value.clone())], &[]),
				display: display.clone(),
			});
		}
		out
	}
}
