//! Boolean field filter

use super::{BoundLookup, Choice, FieldFilter, FilterContext, FilterDescriptor, resolve_title};
use crate::fields::{FieldDescriptor, FieldKind};
use crate::lookup::LookupValue;
use crate::params::{FilterParams, UrlQuery};
use crate::types::errors::AdminResult;
use std::collections::BTreeMap;

/// Yes / No / All widget for boolean columns, with an extra "Unknown"
/// choice when the column is nullable
#[derive(Debug)]
pub struct BooleanFieldFilter {
	title: String,
	field_path: String,
	url: UrlQuery,
	used: BTreeMap<String, LookupValue>,
	exact: BoundLookup,
	isnull: BoundLookup,
	nullable: bool,
}

impl BooleanFieldFilter {
	/// Registry descriptor for this variant
	pub fn descriptor() -> FilterDescriptor {
		FilterDescriptor {
			name: "boolean",
			test: Self::test,
			build: Self::build,
		}
	}

	pub(crate) fn test(field: &FieldDescriptor, _ctx: &FilterContext<'_>, _path: &str) -> bool {
		matches!(field.kind, FieldKind::Boolean)
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
			nullable: field.null,
		}))
	}

	fn isnull_active(&self) -> bool {
		self.used
			.get(&self.isnull.param)
			.and_then(LookupValue::as_bool)
			.unwrap_or(false)
	}
}

impl FieldFilter for BooleanFieldFilter {
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
		let mut out = vec![Choice {
			selected: self.exact.raw_str().is_empty() && !self.isnull_active(),
			query_string: self.url.query_string(
				&[],
				&[self.exact.qualified.clone(), self.isnull.qualified.clone()],
			),
			display: "All".to_string(),
		}];
		for (value, display) in [("1", "Yes"), ("0", "No")] {
			out.push(Choice {
				selected: self.exact.raw_str() == value && !self.isnull_active(),
				query_string: self.url.query_string(
					&[(self.exact.qualified.clone(), value.to_string())],
					&[self.isnull.qualified.clone()],
				),
				display: display.to_string(),
			});
		}
		if self.nullable {
			out.push(Choice {
				selected: self.isnull_active(),
				query_string: self.url.query_string(
					&[(self.isnull.qualified.clone(), "True".to_string())],
					&[self.exact.qualified.clone()],
				),
				display: "Unknown".to_string(),
			});
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::ModelMeta;
	use crate::request::Request;
	use crate::site::{AdminSettings, AdminSite, EmptySource};
	use std::sync::Arc;

	fn build(uri: &str, nullable: bool) -> Box<dyn FieldFilter> {
		let request = Request::builder().uri(uri).build();
		let mut field = FieldDescriptor::new("active", FieldKind::Boolean);
		if nullable {
			field = field.nullable();
		}
		let model = Arc::new(ModelMeta::new("user", vec![field.clone()]));
		let site = AdminSite::new("/admin");
		let settings = AdminSettings::default();
		let source = EmptySource;
		let ctx = FilterContext::new(&request, model, &site, &source, &settings);
		let mut params = FilterParams::from_request(&request);
		BooleanFieldFilter::build(&field, &mut params, &ctx, "active").unwrap()
	}

	#[test]
	fn all_selected_when_unfiltered() {
		let filter = build("/admin/user/", false);
		let choices = filter.choices();
		assert_eq!(choices.len(), 3);
		assert!(choices[0].selected);
		assert!(!choices[1].selected);
		assert!(!choices[2].selected);
		assert!(!filter.is_used());
	}

	#[test]
	fn yes_selected_from_param() {
		let filter = build("/admin/user/?_p_active__exact=1", false);
		let choices = filter.choices();
		assert!(!choices[0].selected);
		assert!(choices[1].selected);
		assert_eq!(choices[1].display, "Yes");
		assert!(filter.is_used());
	}

	#[test]
	fn unknown_choice_only_for_nullable() {
		let filter = build("/admin/user/?_p_active__isnull=True", true);
		let choices = filter.choices();
		assert_eq!(choices.len(), 4);
		assert_eq!(choices[3].display, "Unknown");
		assert!(choices[3].selected);
		assert!(!choices[0].selected);
	}

	#[test]
	fn yes_link_drops_isnull() {
		let filter = build("/admin/user/?_p_active__isnull=True&_q_=x", true);
		let yes = &filter.choices()[1];
		assert_eq!(yes.query_string, "?_p_active__exact=1&_q_=x");
	}
}
