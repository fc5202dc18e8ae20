//! JSON variant of the object detail view

use super::is_ajax_request;
use crate::request::Request;
use crate::types::responses::AjaxDetailResponse;
use std::collections::HashMap;

/// One displayed field: its label and rendered value
#[derive(Debug, Clone)]
pub struct FieldResult {
	pub label: String,
	pub value: String,
}

/// Detail-view data, with `layout` fixing the field display order
#[derive(Debug, Clone)]
pub struct DetailViewContent {
	pub layout: Vec<String>,
	pub results: HashMap<String, FieldResult>,
}

/// Replaces the HTML detail page with an ordered label-to-value object on
/// asynchronous requests
#[derive(Debug, Default)]
pub struct AjaxDetailPlugin;

impl AjaxDetailPlugin {
	pub fn new() -> Self {
		Self
	}

	/// Build the ordered payload, or `None` when the request wants HTML
	///
	/// An explicit `_format=html` overrides the asynchronous flag; callers
	/// embedding the detail page in a panel rely on that escape hatch.
	pub fn process(
		&self,
		request: &Request,
		view: &DetailViewContent,
	) -> Option<AjaxDetailResponse> {
		if !is_ajax_request(request) {
			return None;
		}
		if request.query_params().get("_format").map(String::as_str) == Some("html") {
			return None;
		}
		tracing::debug!(fields = view.layout.len(), "serving detail as json");
		let mut payload = AjaxDetailResponse::new();
		for field_name in &view.layout {
			if let Some(result) = view.results.get(field_name) {
				payload.insert(
					result.label.clone(),
					serde_json::Value::String(result.value.clone()),
				);
			}
		}
		Some(payload)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn view() -> DetailViewContent {
		let mut results = HashMap::new();
		results.insert(
			"title".to_string(),
			FieldResult {
				label: "Title".to_string(),
				value: "Ownership".to_string(),
			},
		);
		results.insert(
			"author".to_string(),
			FieldResult {
				label: "Author".to_string(),
				value: "kent".to_string(),
			},
		);
		DetailViewContent {
			layout: vec!["author".to_string(), "title".to_string()],
			results,
		}
	}

	#[test]
	fn payload_follows_layout_order() {
		let request = Request::builder().uri("/admin/article/7/?_ajax=1").build();
		let payload = AjaxDetailPlugin::new().process(&request, &view()).unwrap();
		let keys: Vec<&String> = payload.keys().collect();
		assert_eq!(keys, vec!["Author", "Title"]);
	}

	#[test]
	fn format_html_defers() {
		let request = Request::builder()
			.uri("/admin/article/7/?_ajax=1&_format=html")
			.build();
		assert!(AjaxDetailPlugin::new().process(&request, &view()).is_none());
	}

	#[test]
	fn layout_entries_without_results_are_skipped() {
		let request = Request::builder().uri("/admin/article/7/?_ajax=1").build();
		let mut content = view();
		content.layout.push("missing".to_string());
		let payload = AjaxDetailPlugin::new().process(&request, &content).unwrap();
		assert_eq!(payload.len(), 2);
	}
}
