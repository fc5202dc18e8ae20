//! Filters for relational fields
//!
//! Two strategies exist, picked by the target admin's configured
//! interaction style: [`RelatedSearchFieldFilter`] renders a search-lookup
//! widget against a separate endpoint (`fk-ajax` style), while
//! [`RelatedFieldFilter`] lists every related object inline.

use super::{BoundLookup, Choice, FieldFilter, FilterContext, FilterDescriptor, resolve_title};
use crate::EMPTY_CHANGELIST_VALUE;
use crate::fields::{FieldDescriptor, FieldKind};
use crate::lookup::LookupValue;
use crate::params::{FilterParams, UrlQuery};
use crate::site::RelFieldStyle;
use crate::text::truncate_words;
use crate::types::errors::{AdminError, AdminResult};
use std::collections::BTreeMap;

const LABEL_WORDS: usize = 14;

fn relation_target(field: &FieldDescriptor) -> AdminResult<(&str, &str)> {
	match &field.kind {
		FieldKind::ForeignKey { to, to_field } => Ok((to, to_field)),
		_ => Err(AdminError::ImproperlyConfigured(format!(
			"'{}' is not a relational field",
			field.name
		))),
	}
}

/// Search-lookup widget for relations whose target admin is configured
/// `fk-ajax`
#[derive(Debug)]
pub struct RelatedSearchFieldFilter {
	title: String,
	field_path: String,
	url: UrlQuery,
	used: BTreeMap<String, LookupValue>,
	exact: BoundLookup,
	search_url: String,
	label: String,
}

impl RelatedSearchFieldFilter {
	/// Registry descriptor for this variant
	pub fn descriptor() -> FilterDescriptor {
		FilterDescriptor {
			name: "related_search",
			test: Self::test,
			build: Self::build,
		}
	}

	pub(crate) fn test(field: &FieldDescriptor, ctx: &FilterContext<'_>, _path: &str) -> bool {
		let FieldKind::ForeignKey { to, .. } = &field.kind else {
			return false;
		};
		ctx.site
			.config(to)
			.and_then(|c| c.relfield_style)
			== Some(RelFieldStyle::FkAjax)
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
		let (to, to_field) = relation_target(field)?;
		let title = resolve_title(field, field_path)?;
		let mut used = BTreeMap::new();
		let pattern = format!("{{}}__{to_field}__exact");
		let exact = BoundLookup::bind(&pattern, field_path, params, &mut used);

		// A vanished related object degrades to an empty label, never an
		// error.
		let label = match exact.raw_str() {
			"" => String::new(),
			raw => ctx
				.source
				.related_label(to, to_field, raw)
				.map(|l| truncate_words(&l, LABEL_WORDS))
				.unwrap_or_default(),
		};

		Ok(Self {
			title,
			field_path: field_path.to_string(),
			url: ctx.url(),
			used,
			exact,
			search_url: ctx.site.changelist_url(to),
			label,
		})
	}

	/// Endpoint the widget queries for candidate objects
	pub fn search_url(&self) -> &str {
		&self.search_url
	}

	/// Display label of the currently selected related object
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Prefixed parameter name the widget submits under
	pub fn input_name(&self) -> &str {
		&self.exact.qualified
	}
}

impl FieldFilter for RelatedSearchFieldFilter {
	fn title(&self) -> &str {
		&self.title
	}

	fn template(&self) -> &str {
		"admin/filters/fk_search.html"
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
}

/// Inline choice list over every object of the related model
#[derive(Debug)]
pub struct RelatedFieldFilter {
	title: String,
	field_path: String,
	url: UrlQuery,
	used: BTreeMap<String, LookupValue>,
	exact: BoundLookup,
	isnull: BoundLookup,
	nullable: bool,
	lookup_choices: Vec<(String, String)>,
}

impl RelatedFieldFilter {
	/// Registry descriptor for this variant
	pub fn descriptor() -> FilterDescriptor {
		FilterDescriptor {
			name: "related",
			test: Self::test,
			build: Self::build,
		}
	}

	pub(crate) fn test(field: &FieldDescriptor, _ctx: &FilterContext<'_>, _path: &str) -> bool {
		field.kind.is_relation()
	}

	pub(crate) fn build(
		field: &FieldDescriptor,
		params: &mut FilterParams,
		ctx: &FilterContext<'_>,
		field_path: &str,
	) -> AdminResult<Box<dyn FieldFilter>> {
		let (to, to_field) = relation_target(field)?;
		let title = resolve_title(field, field_path)?;
		let mut used = BTreeMap::new();
		let pattern = format!("{{}}__{to_field}__exact");
		let exact = BoundLookup::bind(&pattern, field_path, params, &mut used);
		let isnull = BoundLookup::bind("{}__isnull", field_path, params, &mut used);
		Ok(Box::new(Self {
			title,
			field_path: field_path.to_string(),
			url: ctx.url(),
			used,
			exact,
			isnull,
			nullable: field.null,
			lookup_choices: ctx.source.related_choices(to),
		}))
	}

	fn isnull_active(&self) -> bool {
		self.used
			.get(&self.isnull.param)
			.and_then(LookupValue::as_bool)
			.unwrap_or(false)
	}
}

impl FieldFilter for RelatedFieldFilter {
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

	// A single related object (and no null choice) gives nothing worth
	// filtering on
	fn has_output(&self) -> bool {
		let extra = usize::from(self.nullable);
		self.lookup_choices.len() + extra > 1
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
		for (key, display) in &self.lookup_choices {
			out.push(Choice {
				selected: self.exact.raw_str() == key,
				query_string: self.url.query_string(
					&[(self.exact.qualified.clone(), key.clone())],
					&[self.isnull.qualified.clone()],
				),
				display: display.clone(),
			});
		}
		if self.nullable {
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
	use crate::fields::ModelMeta;
	use crate::request::Request;
	use crate::site::{AdminSettings, AdminSite, EmptySource, ModelAdminConfig, RelatedSource};
	use std::sync::Arc;

	struct Authors;

	impl RelatedSource for Authors {
		fn related_label(&self, model: &str, to_field: &str, value: &str) -> Option<String> {
			(model == "author" && to_field == "id" && value == "7")
				.then(|| "Ann Author".to_string())
		}

		fn related_choices(&self, _model: &str) -> Vec<(String, String)> {
			vec![
				("7".to_string(), "Ann Author".to_string()),
				("8".to_string(), "Bob Writer".to_string()),
			]
		}

		fn distinct_values(&self, _model: &str, _field_path: &str) -> Vec<Option<String>> {
			Vec::new()
		}
	}

	fn author_field() -> FieldDescriptor {
		FieldDescriptor::new(
			"author",
			FieldKind::ForeignKey {
				to: "author".into(),
				to_field: "id".into(),
			},
		)
		.nullable()
	}

	fn site_with(style: Option<RelFieldStyle>) -> AdminSite {
		let mut site = AdminSite::new("/admin");
		site.register(
			"author",
			ModelAdminConfig {
				relfield_style: style,
			},
		);
		site
	}

	#[test]
	fn search_variant_requires_fk_ajax_style() {
		let field = author_field();
		let request = Request::builder().uri("/").build();
		let model = Arc::new(ModelMeta::new("book", vec![field.clone()]));
		let settings = AdminSettings::default();
		let source = EmptySource;

		let ajax_site = site_with(Some(RelFieldStyle::FkAjax));
		let ctx = FilterContext::new(&request, model.clone(), &ajax_site, &source, &settings);
		assert!(RelatedSearchFieldFilter::test(&field, &ctx, "author"));

		let plain_site = site_with(Some(RelFieldStyle::FkSelect));
		let ctx = FilterContext::new(&request, model.clone(), &plain_site, &source, &settings);
		assert!(!RelatedSearchFieldFilter::test(&field, &ctx, "author"));

		let unregistered = AdminSite::new("/admin");
		let ctx = FilterContext::new(&request, model, &unregistered, &source, &settings);
		assert!(!RelatedSearchFieldFilter::test(&field, &ctx, "author"));
	}

	#[test]
	fn search_variant_resolves_selected_label() {
		let field = author_field();
		let request = Request::builder()
			.uri("/admin/book/?_p_author__id__exact=7")
			.build();
		let model = Arc::new(ModelMeta::new("book", vec![field.clone()]));
		let site = site_with(Some(RelFieldStyle::FkAjax));
		let settings = AdminSettings::default();
		let source = Authors;
		let ctx = FilterContext::new(&request, model, &site, &source, &settings);
		let mut params = FilterParams::from_request(&request);
		let filter =
			RelatedSearchFieldFilter::new(&field, &mut params, &ctx, "author").unwrap();
		assert_eq!(filter.label(), "Ann Author");
		assert_eq!(filter.search_url(), "/admin/author/");
		assert_eq!(filter.input_name(), "_p_author__id__exact");
	}

	#[test]
	fn missing_related_object_degrades_to_empty_label() {
		let field = author_field();
		let request = Request::builder()
			.uri("/admin/book/?_p_author__id__exact=999")
			.build();
		let model = Arc::new(ModelMeta::new("book", vec![field.clone()]));
		let site = site_with(Some(RelFieldStyle::FkAjax));
		let settings = AdminSettings::default();
		let source = Authors;
		let ctx = FilterContext::new(&request, model, &site, &source, &settings);
		let mut params = FilterParams::from_request(&request);
		let filter =
			RelatedSearchFieldFilter::new(&field, &mut params, &ctx, "author").unwrap();
		assert_eq!(filter.label(), "");
	}

	#[test]
	fn list_variant_offers_all_objects_and_null() {
		let field = author_field();
		let request = Request::builder()
			.uri("/admin/book/?_p_author__id__exact=8")
			.build();
		let model = Arc::new(ModelMeta::new("book", vec![field.clone()]));
		let site = site_with(None);
		let settings = AdminSettings::default();
		let source = Authors;
		let ctx = FilterContext::new(&request, model, &site, &source, &settings);
		let mut params = FilterParams::from_request(&request);
		let filter = RelatedFieldFilter::build(&field, &mut params, &ctx, "author").unwrap();

		assert!(filter.has_output());
		let choices = filter.choices();
		assert_eq!(choices.len(), 4);
		assert_eq!(choices[3].display, EMPTY_CHANGELIST_VALUE);
		let selected: Vec<&str> = choices
			.iter()
			.filter(|c| c.selected)
			.map(|c| c.display.as_str())
			.collect();
		assert_eq!(selected, vec!["Bob Writer"]);
	}

	#[test]
	fn list_variant_without_choices_has_no_output() {
		let field = FieldDescriptor::new(
			"author",
			FieldKind::ForeignKey {
				to: "author".into(),
				to_field: "id".into(),
			},
		);
		let request = Request::builder().uri("/").build();
		let model = Arc::new(ModelMeta::new("book", vec![field.clone()]));
		let site = site_with(None);
		let settings = AdminSettings::default();
		let source = EmptySource;
		let ctx = FilterContext::new(&request, model, &site, &source, &settings);
		let mut params = FilterParams::from_request(&request);
		let filter = RelatedFieldFilter::build(&field, &mut params, &ctx, "author").unwrap();
		assert!(!filter.has_output());
	}
}
