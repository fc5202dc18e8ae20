//! Numeric comparison filter

use super::{BoundLookup, Choice, FieldFilter, FilterContext, FilterDescriptor, resolve_title};
use crate::fields::FieldDescriptor;
use crate::lookup::LookupValue;
use crate::params::{FilterParams, UrlQuery};
use crate::query::QuerySet;
use crate::types::errors::AdminResult;
use std::collections::BTreeMap;

const LOOKUPS: [(&str, &str); 6] = [
	("equal", "{}__exact"),
	("lt", "{}__lt"),
	("gt", "{}__gt"),
	("ne", "{}__ne"),
	("lte", "{}__lte"),
	("gte", "{}__gte"),
];

/// Comparison inputs (equal, less/greater than, not equal) for numeric
/// columns
#[derive(Debug)]
pub struct NumberFieldFilter {
	title: String,
	field_path: String,
	url: UrlQuery,
	used: BTreeMap<String, LookupValue>,
	ne_param: String,
	inputs: Vec<(&'static str, BoundLookup)>,
}

impl NumberFieldFilter {
	/// Registry descriptor for this variant
	pub fn descriptor() -> FilterDescriptor {
		FilterDescriptor {
			name: "number",
			test: Self::test,
			build: Self::build,
		}
	}

	pub(crate) fn test(field: &FieldDescriptor, _ctx: &FilterContext<'_>, _path: &str) -> bool {
		field.kind.is_numeric()
	}

	pub(crate) fn build(
		field: &FieldDescriptor,
		params: &mut FilterParams,
		ctx: &FilterContext<'_>,
		field_path: &str,
	) -> AdminResult<Box<dyn FieldFilter>> {
		Self::new(field, params, ctx, field_path).map(|f| Box::new(f) as Box<dyn FieldFilter>)
	}

	pub(crate) fn new(
		field: &FieldDescriptor,
		params: &mut FilterParams,
		ctx: &FilterContext<'_>,
		field_path: &str,
	) -> AdminResult<Self> {
		let title = resolve_title(field, field_path)?;
		let mut used = BTreeMap::new();
		let inputs = LOOKUPS
			.iter()
			.map(|(name, pattern)| (*name, BoundLookup::bind(pattern, field_path, params, &mut used)))
			.collect();
		Ok(Self {
			title,
			field_path: field_path.to_string(),
			url: ctx.url(),
			used,
			ne_param: format!("{field_path}__ne"),
			inputs,
		})
	}

	/// `(logical name, prefixed parameter name, current value)` per input,
	/// for widget rendering
	pub fn inputs(&self) -> Vec<(&'static str, &str, &str)> {
		self.inputs
			.iter()
			.map(|(name, bound)| (*name, bound.qualified.as_str(), bound.raw_str()))
			.collect()
	}
}

impl FieldFilter for NumberFieldFilter {
	fn title(&self) -> &str {
		&self.title
	}

	fn template(&self) -> &str {
		"admin/filters/number.html"
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
		Vec::new()
	}

	/// The `ne` lookup is logically distinct from the positive lookups
	/// sharing its prefix: it narrows by exclusion, so it must not land in
	/// the inclusion set.
	fn apply(&self, queryset: QuerySet) -> AdminResult<QuerySet> {
		let mut qs = queryset;
		for (lookup, value) in &self.used {
			if *lookup == self.ne_param {
				qs = qs.exclude(&self.field_path, value)?;
			} else {
				qs = qs.filter(lookup, value)?;
			}
		}
		Ok(qs)
	}
}
