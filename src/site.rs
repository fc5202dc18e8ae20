//! Admin site registry and data-access collaborators
//!
//! Filters need a little knowledge about the rest of the admin: how a
//! related model's admin is configured, where its changelist lives, and how
//! to resolve display values. [`AdminSite`] carries the configuration;
//! [`RelatedSource`] abstracts the data access so the crate performs no I/O
//! of its own.

use chrono_tz::Tz;
use std::collections::HashMap;

/// Interaction style configured for a relational field's target admin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelFieldStyle {
	/// Inline choice listing
	FkSelect,
	/// Separate search-lookup endpoint
	FkAjax,
}

/// Per-model admin configuration relevant to filtering
#[derive(Debug, Clone, Default)]
pub struct ModelAdminConfig {
	/// How relational fields pointing at this model should render
	pub relfield_style: Option<RelFieldStyle>,
}

/// Registry of model admin configurations
#[derive(Debug, Clone)]
pub struct AdminSite {
	url_prefix: String,
	registry: HashMap<String, ModelAdminConfig>,
}

impl AdminSite {
	/// Create a site rooted at `url_prefix`
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_filters::AdminSite;
	///
	/// let site = AdminSite::new("/admin");
	/// assert_eq!(site.changelist_url("Author"), "/admin/author/");
	/// ```
	pub fn new(url_prefix: impl Into<String>) -> Self {
		Self {
			url_prefix: url_prefix.into(),
			registry: HashMap::new(),
		}
	}

	/// Register a model admin configuration
	pub fn register(&mut self, model: impl Into<String>, config: ModelAdminConfig) {
		self.registry.insert(model.into(), config);
	}

	/// Configuration for a registered model
	pub fn config(&self, model: &str) -> Option<&ModelAdminConfig> {
		self.registry.get(model)
	}

	/// Changelist URL for a model
	pub fn changelist_url(&self, model: &str) -> String {
		format!(
			"{}/{}/",
			self.url_prefix.trim_end_matches('/'),
			model.to_lowercase()
		)
	}
}

/// Data access the relational and all-values filters delegate to
///
/// Implementations live with the host ORM; the crate only consumes display
/// representations.
pub trait RelatedSource {
	/// Display representation of the related object whose `to_field` equals
	/// `value`, or `None` when no such object exists
	fn related_label(&self, model: &str, to_field: &str, value: &str) -> Option<String>;

	/// `(key, display)` pairs for every object of the related model
	fn related_choices(&self, model: &str) -> Vec<(String, String)>;

	/// Distinct values of one column, `None` entries representing NULL
	fn distinct_values(&self, model: &str, field_path: &str) -> Vec<Option<String>>;
}

/// A [`RelatedSource`] with no data behind it
///
/// Useful for views whose filters never touch relational or all-values
/// widgets, and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySource;

impl RelatedSource for EmptySource {
	fn related_label(&self, _model: &str, _to_field: &str, _value: &str) -> Option<String> {
		None
	}

	fn related_choices(&self, _model: &str) -> Vec<(String, String)> {
		Vec::new()
	}

	fn distinct_values(&self, _model: &str, _field_path: &str) -> Vec<Option<String>> {
		Vec::new()
	}
}

/// Admin-wide settings the filters consult
#[derive(Debug, Clone)]
pub struct AdminSettings {
	/// Time zone used to anchor canned date ranges
	pub timezone: Tz,
}

impl Default for AdminSettings {
	fn default() -> Self {
		Self {
			timezone: chrono_tz::UTC,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn changelist_url_normalizes_prefix() {
		let site = AdminSite::new("/admin/");
		assert_eq!(site.changelist_url("Author"), "/admin/author/");
	}

	#[test]
	fn config_roundtrip() {
		let mut site = AdminSite::new("/admin");
		site.register(
			"author",
			ModelAdminConfig {
				relfield_style: Some(RelFieldStyle::FkAjax),
			},
		);
		assert_eq!(
			site.config("author").and_then(|c| c.relfield_style),
			Some(RelFieldStyle::FkAjax)
		);
		assert!(site.config("book").is_none());
	}
}
