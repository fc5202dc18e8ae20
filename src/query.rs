//! Query constraint builder
//!
//! [`QuerySet`] is the opaque query-building collaborator the filters
//! narrow. It performs no I/O and no optimization; it records typed
//! inclusion and exclusion constraints for the host ORM to execute.
//! Lookup keys follow the `field__op` convention (`age__gt`,
//! `author__id__exact`, `published__isnull`).

use crate::fields::{FieldKind, ModelMeta};
use crate::lookup::LookupValue;
use crate::types::errors::{AdminError, AdminResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Comparison operator of one constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
	Eq,
	Ne,
	Gt,
	Gte,
	Lt,
	Lte,
	In,
	IsNull,
	Contains,
	Year,
	Month,
	Day,
}

impl FilterOperator {
	fn from_suffix(suffix: &str) -> Option<Self> {
		Some(match suffix {
			"exact" => FilterOperator::Eq,
			"ne" => FilterOperator::Ne,
			"gt" => FilterOperator::Gt,
			"gte" => FilterOperator::Gte,
			"lt" => FilterOperator::Lt,
			"lte" => FilterOperator::Lte,
			"in" => FilterOperator::In,
			"isnull" => FilterOperator::IsNull,
			"contains" => FilterOperator::Contains,
			"year" => FilterOperator::Year,
			"month" => FilterOperator::Month,
			"day" => FilterOperator::Day,
			_ => return None,
		})
	}
}

/// Typed constraint value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterValue {
	String(String),
	Integer(i64),
	Float(f64),
	Boolean(bool),
	Null,
	List(Vec<FilterValue>),
}

/// One recorded constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
	pub field: String,
	pub operator: FilterOperator,
	pub value: FilterValue,
}

impl Filter {
	pub fn new(field: impl Into<String>, operator: FilterOperator, value: FilterValue) -> Self {
		Self {
			field: field.into(),
			operator,
			value,
		}
	}
}

/// Accumulated constraints for one model
#[derive(Debug, Clone)]
pub struct QuerySet {
	model: Arc<ModelMeta>,
	filters: Vec<Filter>,
	excludes: Vec<Filter>,
}

impl QuerySet {
	/// Start an unconstrained queryset over `model`
	pub fn new(model: Arc<ModelMeta>) -> Self {
		Self {
			model,
			filters: Vec::new(),
			excludes: Vec::new(),
		}
	}

	/// Add an inclusion constraint
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_filters::{
	///     FieldDescriptor, FieldKind, FilterValue, LookupValue, ModelMeta, QuerySet,
	/// };
	/// use std::sync::Arc;
	///
	/// let model = Arc::new(ModelMeta::new(
	///     "article",
	///     vec![FieldDescriptor::new("views", FieldKind::Integer)],
	/// ));
	/// let qs = QuerySet::new(model)
	///     .filter("views__gt", &LookupValue::Str("10".into()))
	///     .unwrap();
	/// assert_eq!(qs.filters()[0].value, FilterValue::Integer(10));
	/// ```
	pub fn filter(mut self, lookup: &str, value: &LookupValue) -> AdminResult<Self> {
		let constraint = self.build_constraint(lookup, value)?;
		self.filters.push(constraint);
		Ok(self)
	}

	/// Add an exclusion constraint
	pub fn exclude(mut self, lookup: &str, value: &LookupValue) -> AdminResult<Self> {
		let constraint = self.build_constraint(lookup, value)?;
		self.excludes.push(constraint);
		Ok(self)
	}

	/// Recorded inclusion constraints
	pub fn filters(&self) -> &[Filter] {
		&self.filters
	}

	/// Recorded exclusion constraints
	pub fn excludes(&self) -> &[Filter] {
		&self.excludes
	}

	fn build_constraint(&self, lookup: &str, value: &LookupValue) -> AdminResult<Filter> {
		let (path, operator) = parse_lookup(lookup);
		let kind = self.resolve_kind(lookup, path)?;
		let value = coerce_value(path, operator, &kind, value)?;
		Ok(Filter::new(path, operator, value))
	}

	fn resolve_kind(&self, lookup: &str, path: &str) -> AdminResult<FieldKind> {
		let base = path.split("__").next().unwrap_or(path);
		let field = self
			.model
			.field(base)
			.ok_or_else(|| AdminError::UnknownLookup(lookup.to_string()))?;
		// Traversals into a related model carry the related key as-is; the
		// host ORM coerces them against the target column.
		if field.kind.is_relation() && path != base {
			return Ok(FieldKind::Text);
		}
		Ok(field.kind.clone())
	}
}

fn parse_lookup(lookup: &str) -> (&str, FilterOperator) {
	if let Some((path, suffix)) = lookup.rsplit_once("__")
		&& let Some(op) = FilterOperator::from_suffix(suffix)
	{
		return (path, op);
	}
	(lookup, FilterOperator::Eq)
}

fn coerce_value(
	path: &str,
	operator: FilterOperator,
	kind: &FieldKind,
	value: &LookupValue,
) -> AdminResult<FilterValue> {
	match operator {
		FilterOperator::IsNull => match value {
			LookupValue::Bool(b) => Ok(FilterValue::Boolean(*b)),
			LookupValue::Str(s) => Ok(FilterValue::Boolean(!matches!(
				s.to_ascii_lowercase().as_str(),
				"false" | "0"
			))),
			LookupValue::List(_) => Err(AdminError::Validation(format!(
				"'{path}__isnull' expects a boolean, got a list"
			))),
		},
		FilterOperator::In => match value {
			LookupValue::List(items) => {
				let coerced = items
					.iter()
					.map(|raw| coerce_scalar(path, kind, raw))
					.collect::<AdminResult<Vec<_>>>()?;
				Ok(FilterValue::List(coerced))
			}
			other => {
				let raw = other.to_string();
				Ok(FilterValue::List(vec![coerce_scalar(path, kind, &raw)?]))
			}
		},
		FilterOperator::Year | FilterOperator::Month | FilterOperator::Day => {
			let raw = value.to_string();
			raw.parse::<i64>().map(FilterValue::Integer).map_err(|_| {
				AdminError::Validation(format!("invalid date component '{raw}' for '{path}'"))
			})
		}
		_ => {
			let raw = match value {
				LookupValue::Str(s) => s.clone(),
				other => other.to_string(),
			};
			coerce_scalar(path, kind, &raw)
		}
	}
}

fn coerce_scalar(path: &str, kind: &FieldKind, raw: &str) -> AdminResult<FilterValue> {
	match kind {
		FieldKind::Integer => raw.parse::<i64>().map(FilterValue::Integer).map_err(|_| {
			AdminError::Validation(format!("invalid numeric value '{raw}' for '{path}'"))
		}),
		FieldKind::Float | FieldKind::Decimal { .. } => {
			raw.parse::<f64>().map(FilterValue::Float).map_err(|_| {
				AdminError::Validation(format!("invalid numeric value '{raw}' for '{path}'"))
			})
		}
		FieldKind::Boolean => match raw {
			"1" | "true" | "True" => Ok(FilterValue::Boolean(true)),
			"0" | "false" | "False" => Ok(FilterValue::Boolean(false)),
			_ => Err(AdminError::Validation(format!(
				"invalid boolean value '{raw}' for '{path}'"
			))),
		},
		_ => Ok(FilterValue::String(raw.to_string())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::FieldDescriptor;

	fn model() -> Arc<ModelMeta> {
		Arc::new(ModelMeta::new(
			"article",
			vec![
				FieldDescriptor::new("views", FieldKind::Integer),
				FieldDescriptor::new("rating", FieldKind::Float),
				FieldDescriptor::new("published", FieldKind::Boolean).nullable(),
				FieldDescriptor::new("created_at", FieldKind::Date),
				FieldDescriptor::new(
					"author",
					FieldKind::ForeignKey {
						to: "author".into(),
						to_field: "id".into(),
					},
				),
			],
		))
	}

	#[test]
	fn parses_operator_suffix() {
		let qs = QuerySet::new(model())
			.filter("views__gte", &LookupValue::Str("5".into()))
			.unwrap();
		assert_eq!(qs.filters()[0].field, "views");
		assert_eq!(qs.filters()[0].operator, FilterOperator::Gte);
	}

	#[test]
	fn bare_field_defaults_to_eq() {
		let qs = QuerySet::new(model())
			.exclude("views", &LookupValue::Str("3".into()))
			.unwrap();
		assert_eq!(qs.excludes()[0].operator, FilterOperator::Eq);
		assert_eq!(qs.excludes()[0].value, FilterValue::Integer(3));
	}

	#[test]
	fn relation_traversal_keeps_string_value() {
		let qs = QuerySet::new(model())
			.filter("author__id__exact", &LookupValue::Str("9".into()))
			.unwrap();
		assert_eq!(qs.filters()[0].field, "author__id");
		assert_eq!(qs.filters()[0].value, FilterValue::String("9".into()));
	}

	#[test]
	fn malformed_numeric_is_a_validation_error() {
		let err = QuerySet::new(model())
			.filter("views__gt", &LookupValue::Str("abc".into()))
			.unwrap_err();
		assert!(matches!(err, AdminError::Validation(_)));
	}

	#[test]
	fn unknown_field_is_rejected() {
		let err = QuerySet::new(model())
			.filter("missing__exact", &LookupValue::Str("x".into()))
			.unwrap_err();
		assert!(matches!(err, AdminError::UnknownLookup(_)));
	}

	#[test]
	fn isnull_coerces_to_boolean() {
		let qs = QuerySet::new(model())
			.filter("published__isnull", &LookupValue::Bool(true))
			.unwrap();
		assert_eq!(qs.filters()[0].value, FilterValue::Boolean(true));
	}

	#[test]
	fn in_list_coerces_each_item() {
		let qs = QuerySet::new(model())
			.filter(
				"views__in",
				&LookupValue::List(vec!["1".into(), "2".into()]),
			)
			.unwrap();
		assert_eq!(
			qs.filters()[0].value,
			FilterValue::List(vec![FilterValue::Integer(1), FilterValue::Integer(2)])
		);
	}
}
