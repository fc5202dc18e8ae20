//! List filter infrastructure
//!
//! A [`FilterRegistry`] owns an ordered list of [`FilterDescriptor`]s.
//! For each field in a list view's `list_filter`, the registry scans the
//! descriptors in registration order and constructs the first variant whose
//! predicate accepts the field; fields matching no predicate get no filter
//! UI. Registration order plus the priority offset fully determine match
//! order.
//!
//! Constructed filters implement [`FieldFilter`]: they are bound to one
//! `(field, request, field_path)` tuple, live for one render, and expose
//! their presented states as [`Choice`] values.

mod all_values;
mod boolean;
mod choices;
mod date;
mod number;
mod related;
mod text;

pub use all_values::AllValuesFieldFilter;
pub use boolean::BooleanFieldFilter;
pub use choices::ChoicesFieldFilter;
pub use date::DateFieldFilter;
pub use number::NumberFieldFilter;
pub use related::{RelatedFieldFilter, RelatedSearchFieldFilter};
pub use text::TextFieldFilter;

use crate::fields::FieldDescriptor;
use crate::lookup::{LookupValue, prepare_lookup_value};
use crate::params::{FILTER_PREFIX, FilterParams, UrlQuery};
use crate::query::QuerySet;
use crate::request::Request;
use crate::site::{AdminSettings, AdminSite, RelatedSource};
use crate::text::humanize_field_name;
use crate::types::errors::{AdminError, AdminResult};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::fields::ModelMeta;

/// One renderable filter state
///
/// Invariant: within a filter's presented set, at most one choice is
/// selected; none selected means the unfiltered "All" state is active.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
	/// Whether this state is currently active
	pub selected: bool,
	/// Query string that navigates to this state, preserving unrelated
	/// parameters
	pub query_string: String,
	/// Display label
	pub display: String,
}

/// Everything a filter needs from the surrounding request cycle
pub struct FilterContext<'a> {
	/// The inbound request
	pub request: &'a Request,
	/// Metadata for the model being listed
	pub model: Arc<ModelMeta>,
	/// Admin site configuration registry
	pub site: &'a AdminSite,
	/// Data access for relational and all-values widgets
	pub source: &'a dyn RelatedSource,
	/// Admin-wide settings
	pub settings: &'a AdminSettings,
	now: Option<DateTime<Utc>>,
}

impl<'a> FilterContext<'a> {
	pub fn new(
		request: &'a Request,
		model: Arc<ModelMeta>,
		site: &'a AdminSite,
		source: &'a dyn RelatedSource,
		settings: &'a AdminSettings,
	) -> Self {
		Self {
			request,
			model,
			site,
			source,
			settings,
			now: None,
		}
	}

	/// Pin the context clock, mainly for tests
	pub fn at(mut self, now: DateTime<Utc>) -> Self {
		self.now = Some(now);
		self
	}

	/// Current time adjusted to the configured time zone
	pub fn current_time(&self) -> DateTime<Tz> {
		self.now
			.unwrap_or_else(Utc::now)
			.with_timezone(&self.settings.timezone)
	}

	/// Snapshot of the full request parameters for link generation
	pub fn url(&self) -> UrlQuery {
		UrlQuery::from_request(self.request)
	}
}

impl fmt::Debug for FilterContext<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FilterContext")
			.field("model", &self.model.name)
			.field("now", &self.now)
			.finish_non_exhaustive()
	}
}

/// A filter bound to one field of one request
pub trait FieldFilter {
	/// Display title, from the field's verbose name
	fn title(&self) -> &str;

	/// Template the widget renders with
	fn template(&self) -> &str {
		"admin/filters/list.html"
	}

	/// Field path this filter is bound to
	fn field_path(&self) -> &str;

	/// Lookup parameters captured from the request (unprefixed keys)
	fn used_params(&self) -> &BTreeMap<String, LookupValue>;

	/// Request parameter snapshot used for link generation
	fn url_query(&self) -> &UrlQuery;

	/// Whether the request activated this filter
	fn is_used(&self) -> bool {
		!self.used_params().is_empty()
	}

	/// Whether the widget has anything to render
	fn has_output(&self) -> bool {
		true
	}

	/// Presented filter states; empty for input-style widgets
	fn choices(&self) -> Vec<Choice> {
		Vec::new()
	}

	/// Link that clears this filter while preserving every other parameter
	fn remove_url(&self) -> String {
		let remove: Vec<String> = self
			.used_params()
			.keys()
			.map(|k| format!("{FILTER_PREFIX}{k}"))
			.collect();
		self.url_query().query_string(&[], &remove)
	}

	/// Narrow `queryset` by every captured constraint, conjunctively
	fn apply(&self, queryset: QuerySet) -> AdminResult<QuerySet> {
		let mut qs = queryset;
		for (lookup, value) in self.used_params() {
			qs = qs.filter(lookup, value)?;
		}
		Ok(qs)
	}
}

impl fmt::Debug for dyn FieldFilter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldFilter")
			.field("title", &self.title())
			.field("field_path", &self.field_path())
			.finish_non_exhaustive()
	}
}

/// Predicate deciding whether a variant handles a field
pub type FilterTest = fn(&FieldDescriptor, &FilterContext<'_>, &str) -> bool;

/// Constructor producing a request-bound filter
pub type FilterBuild =
	fn(&FieldDescriptor, &mut FilterParams, &FilterContext<'_>, &str) -> AdminResult<Box<dyn FieldFilter>>;

/// One registered filter kind
#[derive(Clone)]
pub struct FilterDescriptor {
	/// Stable name, for logging
	pub name: &'static str,
	/// Field predicate
	pub test: FilterTest,
	/// Filter constructor
	pub build: FilterBuild,
}

impl fmt::Debug for FilterDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FilterDescriptor")
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}

/// Ordered filter-kind registry; first match wins
///
/// # Examples
///
/// ```
/// use reinhardt_admin_filters::FilterRegistry;
///
/// let registry = FilterRegistry::with_defaults();
/// assert_eq!(registry.len(), 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
	descriptors: Vec<FilterDescriptor>,
	take_priority_index: usize,
}

impl FilterRegistry {
	/// Empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry seeded with the built-in variants, in dispatch order:
	/// boolean, choices, text, number, date, related-search, related,
	/// all-values
	pub fn with_defaults() -> Self {
		let mut registry = Self::new();
		registry.register(BooleanFieldFilter::descriptor());
		registry.register(ChoicesFieldFilter::descriptor());
		registry.register(TextFieldFilter::descriptor());
		registry.register(NumberFieldFilter::descriptor());
		registry.register(DateFieldFilter::descriptor());
		registry.register(RelatedSearchFieldFilter::descriptor());
		registry.register(RelatedFieldFilter::descriptor());
		registry.register(AllValuesFieldFilter::descriptor());
		registry
	}

	/// Append a descriptor
	pub fn register(&mut self, descriptor: FilterDescriptor) {
		self.descriptors.push(descriptor);
	}

	/// Insert a descriptor ahead of every plainly-registered one
	///
	/// Priority registrations keep their own relative order: the second
	/// priority descriptor lands after the first but before all plain ones.
	/// This is how a custom filter overrides a default for some field type.
	pub fn register_priority(&mut self, descriptor: FilterDescriptor) {
		self.descriptors.insert(self.take_priority_index, descriptor);
		self.take_priority_index += 1;
	}

	/// Number of registered descriptors
	pub fn len(&self) -> usize {
		self.descriptors.len()
	}

	/// Whether the registry is empty
	pub fn is_empty(&self) -> bool {
		self.descriptors.is_empty()
	}

	/// Registered descriptor names, in dispatch order
	pub fn names(&self) -> Vec<&'static str> {
		self.descriptors.iter().map(|d| d.name).collect()
	}

	/// Construct the first matching filter for `field`, or `None` when no
	/// predicate accepts it
	pub fn create(
		&self,
		field: &FieldDescriptor,
		params: &mut FilterParams,
		ctx: &FilterContext<'_>,
		field_path: &str,
	) -> AdminResult<Option<Box<dyn FieldFilter>>> {
		for descriptor in &self.descriptors {
			if (descriptor.test)(field, ctx, field_path) {
				tracing::debug!(filter = descriptor.name, field = field_path, "matched list filter");
				return (descriptor.build)(field, params, ctx, field_path).map(Some);
			}
		}
		tracing::debug!(field = field_path, "no list filter matched");
		Ok(None)
	}
}

/// One declared lookup after parameter extraction
#[derive(Debug, Clone)]
pub(crate) struct BoundLookup {
	/// Unprefixed parameter key, e.g. `age__gt`
	pub param: String,
	/// Prefixed key as it appears in URLs, e.g. `_p_age__gt`
	pub qualified: String,
	/// Raw request value, when present
	pub raw: Option<String>,
}

impl BoundLookup {
	/// Expand `pattern` for `field_path`, pop the matching request
	/// parameter, and record the coerced value in `used`
	pub fn bind(
		pattern: &str,
		field_path: &str,
		params: &mut FilterParams,
		used: &mut BTreeMap<String, LookupValue>,
	) -> Self {
		let param = pattern.replace("{}", field_path);
		let qualified = format!("{FILTER_PREFIX}{param}");
		let raw = params.pop(&param);
		if let Some(raw) = &raw {
			used.insert(param.clone(), prepare_lookup_value(&param, raw));
		}
		Self {
			param,
			qualified,
			raw,
		}
	}

	/// Raw value, empty string when the parameter is absent
	pub fn raw_str(&self) -> &str {
		self.raw.as_deref().unwrap_or("")
	}

	/// Whether the request carried this lookup
	pub fn is_set(&self) -> bool {
		self.raw.is_some()
	}
}

/// Resolve a filter title, failing fast on a blank configuration
pub(crate) fn resolve_title(field: &FieldDescriptor, field_path: &str) -> AdminResult<String> {
	let title = if field.verbose_name.is_empty() {
		humanize_field_name(field_path)
	} else {
		field.verbose_name.clone()
	};
	if title.is_empty() {
		return Err(AdminError::ImproperlyConfigured(format!(
			"the filter for '{}' does not specify a title",
			field.name
		)));
	}
	Ok(title)
}
