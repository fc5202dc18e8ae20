//! Response payload types for the AJAX plugins
//!
//! These mirror the informal JSON contract of the admin's asynchronous
//! variants: the list view emits headers/objects/count, the form view emits
//! a success or error result, and the detail view emits an ordered
//! label-to-value object.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reserved error key for errors not attached to a single form field
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Payload emitted by [`AjaxListPlugin`](crate::AjaxListPlugin) in place of
/// the HTML result table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AjaxListResponse {
	/// Column label per displayed field
	pub headers: HashMap<String, String>,
	/// One entry per result row, mapping field name to its rendered value
	pub objects: Vec<HashMap<String, String>>,
	/// Total result count across all pages
	pub total_count: u64,
	/// Whether further pages exist
	pub has_more: bool,
}

/// One form field's collected errors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldErrorEntry {
	/// DOM id of the widget (`id_<name>`, or `__all__` for non-field errors)
	pub id: String,
	/// Field name
	pub name: String,
	/// Error messages for this field
	pub errors: Vec<String>,
}

/// Payload emitted by [`AjaxFormPlugin`](crate::AjaxFormPlugin) on form
/// submission
///
/// # Examples
///
/// ```
/// use reinhardt_admin_filters::AjaxFormResponse;
///
/// let response = AjaxFormResponse::Success {
///     obj_id: Some("7".to_string()),
///     obj_repr: Some("Article 7".to_string()),
///     change_url: Some("/admin/article/7/change/".to_string()),
///     detail_url: Some("/admin/article/7/detail/".to_string()),
/// };
/// let json = serde_json::to_value(&response).unwrap();
/// assert_eq!(json["result"], "success");
/// assert_eq!(json["obj_id"], "7");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum AjaxFormResponse {
	/// The submission validated (and, for a completed save, identifies the
	/// created object and its follow-up URLs)
	Success {
		#[serde(skip_serializing_if = "Option::is_none")]
		obj_id: Option<String>,
		#[serde(skip_serializing_if = "Option::is_none")]
		obj_repr: Option<String>,
		#[serde(skip_serializing_if = "Option::is_none")]
		change_url: Option<String>,
		#[serde(skip_serializing_if = "Option::is_none")]
		detail_url: Option<String>,
	},
	/// Validation failed; errors are structured data, never raised
	Error { errors: Vec<FieldErrorEntry> },
}

/// Ordered label-to-value payload emitted by
/// [`AjaxDetailPlugin`](crate::AjaxDetailPlugin)
///
/// `serde_json` is compiled with `preserve_order`, so the map serializes in
/// the layout's declaration order.
pub type AjaxDetailResponse = serde_json::Map<String, serde_json::Value>;
