//! Model and field metadata
//!
//! The filter registry dispatches on field kind, so the crate carries a
//! small descriptor model instead of the full ORM metadata.

use crate::text::humanize_field_name;

/// Kind of a model field, as far as filtering is concerned
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
	Boolean,
	Char { max_length: u32 },
	Text,
	Integer,
	Float,
	Decimal { precision: u32, scale: u32 },
	Date,
	DateTime,
	/// Relation to another model; `to_field` is the referenced column
	ForeignKey { to: String, to_field: String },
}

impl FieldKind {
	/// Integer, float, and decimal fields take the numeric filter
	pub fn is_numeric(&self) -> bool {
		matches!(
			self,
			FieldKind::Integer | FieldKind::Float | FieldKind::Decimal { .. }
		)
	}

	/// Date and datetime fields take the date filter
	pub fn is_temporal(&self) -> bool {
		matches!(self, FieldKind::Date | FieldKind::DateTime)
	}

	/// Whether this field points at another model
	pub fn is_relation(&self) -> bool {
		matches!(self, FieldKind::ForeignKey { .. })
	}
}

/// One model field's metadata
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
	/// Column name
	pub name: String,
	/// Human-readable name, used as the filter title
	pub verbose_name: String,
	/// Field kind
	pub kind: FieldKind,
	/// Whether the column is nullable
	pub null: bool,
	/// Declared `(value, label)` choices, if any
	pub choices: Vec<(String, String)>,
}

impl FieldDescriptor {
	/// Create a descriptor with a humanized verbose name
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_filters::{FieldDescriptor, FieldKind};
	///
	/// let field = FieldDescriptor::new("created_at", FieldKind::DateTime);
	/// assert_eq!(field.verbose_name, "Created at");
	/// ```
	pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
		let name = name.into();
		let verbose_name = humanize_field_name(&name);
		Self {
			name,
			verbose_name,
			kind,
			null: false,
			choices: Vec::new(),
		}
	}

	/// Override the verbose name
	pub fn verbose_name(mut self, verbose_name: impl Into<String>) -> Self {
		self.verbose_name = verbose_name.into();
		self
	}

	/// Mark the column nullable
	pub fn nullable(mut self) -> Self {
		self.null = true;
		self
	}

	/// Attach declared choices
	pub fn with_choices(mut self, choices: Vec<(&str, &str)>) -> Self {
		self.choices = choices
			.into_iter()
			.map(|(v, l)| (v.to_string(), l.to_string()))
			.collect();
		self
	}
}

/// Metadata for the model a list view renders
#[derive(Debug, Clone)]
pub struct ModelMeta {
	/// Model name (used in admin URLs)
	pub name: String,
	/// Declared fields
	pub fields: Vec<FieldDescriptor>,
}

impl ModelMeta {
	pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
		Self {
			name: name.into(),
			fields,
		}
	}

	/// Find a field by column name
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|f| f.name == name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn kind_predicates() {
		assert!(FieldKind::Integer.is_numeric());
		assert!(FieldKind::Decimal { precision: 10, scale: 2 }.is_numeric());
		assert!(!FieldKind::Text.is_numeric());
		assert!(FieldKind::DateTime.is_temporal());
		assert!(
			FieldKind::ForeignKey {
				to: "author".into(),
				to_field: "id".into()
			}
			.is_relation()
		);
	}

	#[test]
	fn field_lookup_by_name() {
		let model = ModelMeta::new(
			"article",
			vec![
				FieldDescriptor::new("title", FieldKind::Char { max_length: 100 }),
				FieldDescriptor::new("views", FieldKind::Integer),
			],
		);
		assert!(model.field("views").is_some());
		assert!(model.field("missing").is_none());
	}
}
