//! Fallback filter listing every distinct value of a column

use super::{BoundLookup, Choice, FieldFilter, FilterContext, FilterDescriptor, resolve_title};
use crate::EMPTY_CHANGELIST_VALUE;
use crate::fields::FieldDescriptor;
use crate::lookup::LookupValue;
use crate::params::{FilterParams, UrlQuery};
use crate::types::errors::AdminResult;
use std::collections::BTreeMap;

/// Registered last with an accept-everything predicate: any field no other
/// variant claimed gets a choice per distinct stored value
#[derive(Debug)]
pub struct AllValuesFieldFilter {
	title: String,
	field_path: String,
	url: UrlQuery,
	used: BTreeMap<String, LookupValue>,
	exact: BoundLookup,
	isnull: BoundLookup,
	values: Vec<Option<String>>,
}

impl AllValuesFieldFilter {
	/// Registry descriptor for this variant
	pub fn descriptor() -> FilterDescriptor {
		FilterDescriptor {
			name: "all_values",
			test: Self::test,
			build: Self::build,
		}
	}

	pub(crate) fn test(_field: &FieldDescriptor, _ctx: &FilterContext<'_>, _path: &str) -> bool {
		true
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
		let isnull = BoundLookup::bind("{}__isnull", field_path, params, &mut used);
		Ok(Box::new(Self {
			title,
			field_path: field_path.to_string(),
			url: ctx.url(),
			used,
			exact,
			isnull,
			values: ctx.source.distinct_values(&ctx.model.name, field_path),
		}))
	}

	fn isnull_active(&self) -> bool {
		self.used
			.get(&self.isnull.param)
			.and_then(LookupValue::as_bool)
			.unwrap_or(false)
	}
}

impl FieldFilter for AllValuesFieldFilter {
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
		// Equality-based emptiness on both lookups; "All" is active when
		// neither is present.
		let mut out = vec![Choice {
			selected: self.exact.raw_str().is_empty() && !self.isnull.is_set(),
			query_string: self.url.query_string(
				&[],
				&[self.exact.qualified.clone(), self.isnull.qualified.clone()],
			),
			display: "All".to_string(),
		}];
		let mut include_none = false;
		for value in self.values.iter() {
			let Some(value) = value else {
				include_none = true;
				continue;
			};
			out.push(Choice {
				selected: self.exact.raw_str() == value,
				query_string: self.url.query_string(
					&[(self.exact.qualified.clone(), value.clone())],
					&[self.isnull.qualified.clone()],
				),
				display: value.clone(),
			});
		}
		if include_none {
			out.push(Choice {
				selected: self.isnull_active(),
				query_string: self.url.query_string(
					&[(self.isnull.qualified.clone(), "True".to_string())],
					&[self.exact.qualified.clone()],
				),
				display: EMPTY_CHANGELIST_VALUE.to_string(),
			});
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::{FieldKind, ModelMeta};
	use crate::request::Request;
	use crate::site::{AdminSettings, AdminSite, RelatedSource};
	use std::sync::Arc;

	struct Cities;

	impl RelatedSource for Cities {
		fn related_label(&self, _m: &str, _f: &str, _v: &str) -> Option<String> {
			None
		}

		fn related_choices(&self, _m: &str) -> Vec<(String, String)> {
			Vec::new()
		}

		fn distinct_values(&self, model: &str, field_path: &str) -> Vec<Option<String>> {
			assert_eq!(model, "user");
			assert_eq!(field_path, "city");
			vec![
				Some("Berlin".to_string()),
				None,
				Some("Tokyo".to_string()),
			]
		}
	}

	fn build(uri: &str) -> Box<dyn FieldFilter> {
		// uuid-ish column: no specific variant claims it
		let field = FieldDescriptor::new("city", FieldKind::Char { max_length: 12 });
		let request = Request::builder().uri(uri).build();
		let model = Arc::new(ModelMeta::new("user", vec![field.clone()]));
		let site = AdminSite::new("/admin");
		let settings = AdminSettings::default();
		let source = Cities;
		let ctx = FilterContext::new(&request, model, &site, &source, &settings);
		let mut params = FilterParams::from_request(&request);
		AllValuesFieldFilter::build(&field, &mut params, &ctx, "city").unwrap()
	}

	#[test]
	fn lists_distinct_values_with_null_entry() {
		let filter = build("/admin/user/");
		let choices = filter.choices();
		assert_eq!(choices.len(), 4);
		assert_eq!(choices[1].display, "Berlin");
		assert_eq!(choices[2].display, "Tokyo");
		assert_eq!(choices[3].display, EMPTY_CHANGELIST_VALUE);
		assert!(choices[0].selected);
	}

	#[test]
	fn value_selection_is_exclusive() {
		let filter = build("/admin/user/?_p_city__exact=Tokyo");
		let choices = filter.choices();
		assert_eq!(choices.iter().filter(|c| c.selected).count(), 1);
		assert!(choices[2].selected);
	}

	#[test]
	fn null_choice_selected_by_isnull() {
		let filter = build("/admin/user/?_p_city__isnull=True");
		let choices = filter.choices();
		assert!(choices[3].selected);
		assert!(!choices[0].selected);
	}
}
