//! Date filter with canned relative ranges

use super::{BoundLookup, Choice, FieldFilter, FilterContext, FilterDescriptor, resolve_title};
use crate::fields::{FieldDescriptor, FieldKind};
use crate::lookup::LookupValue;
use crate::params::{FILTER_PREFIX, FilterParams, UrlQuery};
use crate::types::errors::AdminResult;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

/// Canned ranges (Today, Past 7 days, This month, This year) plus manual
/// since/until and year/month/day component lookups
///
/// Ranges are half-open `[since, until)` intervals anchored to the context
/// clock adjusted to the configured time zone. A canned choice is selected
/// iff the raw date parameters captured from the request structurally equal
/// that range's parameter set.
#[derive(Debug)]
pub struct DateFieldFilter {
	title: String,
	field_path: String,
	url: UrlQuery,
	used: BTreeMap<String, LookupValue>,
	year: BoundLookup,
	month: BoundLookup,
	day: BoundLookup,
	/// Prefixed key prefix covering every lookup of this field
	field_generic: String,
	/// Raw prefixed date parameters as they arrived
	date_params: BTreeMap<String, String>,
	links: Vec<(&'static str, BTreeMap<String, String>)>,
}

impl DateFieldFilter {
	/// Registry descriptor for this variant
	pub fn descriptor() -> FilterDescriptor {
		FilterDescriptor {
			name: "date",
			test: Self::test,
			build: Self::build,
		}
	}

	pub(crate) fn test(field: &FieldDescriptor, _ctx: &FilterContext<'_>, _path: &str) -> bool {
		field.kind.is_temporal()
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

		// Capture the raw per-field date params before binding pops them;
		// canned-range selection compares against this set structurally.
		let generic = format!("{field_path}__");
		let date_params: BTreeMap<String, String> = params
			.with_key_prefix(&generic)
			.into_iter()
			.map(|(k, v)| (format!("{FILTER_PREFIX}{k}"), v))
			.collect();

		let mut used = BTreeMap::new();
		let since = BoundLookup::bind("{}__gte", field_path, params, &mut used);
		let until = BoundLookup::bind("{}__lt", field_path, params, &mut used);
		let year = BoundLookup::bind("{}__year", field_path, params, &mut used);
		let month = BoundLookup::bind("{}__month", field_path, params, &mut used);
		let day = BoundLookup::bind("{}__day", field_path, params, &mut used);

		let now = ctx.current_time();
		let today = now.date_naive();
		let render = |d: NaiveDate| match field.kind {
			FieldKind::DateTime => format!("{d} 00:00:00"),
			_ => d.to_string(),
		};
		let range = |from: NaiveDate| {
			BTreeMap::from([
				(since.qualified.clone(), render(from)),
				(until.qualified.clone(), render(today + Duration::days(1))),
			])
		};
		let month_start = today.with_day(1).unwrap_or(today);
		let year_start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
		let links = vec![
			("Any date", BTreeMap::new()),
			("Today", range(today)),
			("Past 7 days", range(today - Duration::days(7))),
			("This month", range(month_start)),
			("This year", range(year_start)),
		];

		Ok(Self {
			title,
			field_path: field_path.to_string(),
			url: ctx.url(),
			used,
			year,
			month,
			day,
			field_generic: format!("{FILTER_PREFIX}{generic}"),
			date_params,
			links,
		})
	}

	/// Whether a year/month/day component lookup is active (the widget then
	/// shows the manual form instead of highlighting a canned range)
	pub fn component_selected(&self) -> bool {
		self.year.is_set() || self.month.is_set() || self.day.is_set()
	}
}

impl FieldFilter for DateFieldFilter {
	fn title(&self) -> &str {
		&self.title
	}

	fn template(&self) -> &str {
		"admin/filters/date.html"
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
		// Ranges can coincide (on Jan 1 "This year" collapses into
		// "Today"); only the first structural match is marked selected so
		// the presented set keeps a single active choice.
		let mut matched = false;
		self.links
			.iter()
			.map(|(display, link)| {
				let selected = !matched && self.date_params == *link;
				if selected {
					matched = true;
				}
				let new_params: Vec<(String, String)> =
					link.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
				Choice {
					selected,
					query_string: self
						.url
						.query_string(&new_params, &[self.field_generic.clone()]),
					display: display.to_string(),
				}
			})
			.collect()
	}
}
