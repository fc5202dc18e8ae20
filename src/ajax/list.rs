//! JSON variant of the changelist result table

use super::is_ajax_request;
use crate::request::Request;
use crate::text::escape;
use crate::types::responses::AjaxListResponse;
use std::collections::HashMap;

/// One rendered column header
#[derive(Debug, Clone)]
pub struct ResultHeader {
	pub field_name: String,
	pub text: String,
}

/// One rendered result cell
#[derive(Debug, Clone)]
pub struct ResultCell {
	pub field_name: String,
	pub value: String,
}

/// Result-table data the changelist view assembled for rendering
///
/// `base_list_display` is the configured column set; headers and cells for
/// columns outside it (selection checkboxes, action links) are dropped from
/// the JSON payload.
#[derive(Debug, Clone)]
pub struct ListViewContent {
	pub base_list_display: Vec<String>,
	pub headers: Vec<ResultHeader>,
	pub rows: Vec<Vec<ResultCell>>,
	pub result_count: u64,
	pub has_more: bool,
}

/// Replaces the HTML result table with a JSON payload on asynchronous
/// requests
#[derive(Debug, Default)]
pub struct AjaxListPlugin;

impl AjaxListPlugin {
	pub fn new() -> Self {
		Self
	}

	/// Build the JSON payload, or `None` when the request wants HTML
	pub fn process(&self, request: &Request, view: &ListViewContent) -> Option<AjaxListResponse> {
		if !is_ajax_request(request) {
			return None;
		}
		tracing::debug!(
			rows = view.rows.len(),
			total = view.result_count,
			"serving changelist as json"
		);

		let displayed = |name: &str| view.base_list_display.iter().any(|d| d == name);
		let headers: HashMap<String, String> = view
			.headers
			.iter()
			.filter(|h| displayed(&h.field_name))
			.map(|h| (h.field_name.clone(), h.text.clone()))
			.collect();
		let objects = view
			.rows
			.iter()
			.map(|row| {
				row.iter()
					.filter(|cell| displayed(&cell.field_name))
					.map(|cell| (cell.field_name.clone(), escape(&cell.value)))
					.collect()
			})
			.collect();
		Some(AjaxListResponse {
			headers,
			objects,
			total_count: view.result_count,
			has_more: view.has_more,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn cell(name: &str, value: &str) -> ResultCell {
		ResultCell {
			field_name: name.to_string(),
			value: value.to_string(),
		}
	}

	fn view() -> ListViewContent {
		ListViewContent {
			base_list_display: vec!["title".to_string(), "author".to_string()],
			headers: vec![
				ResultHeader {
					field_name: "action_checkbox".to_string(),
					text: String::new(),
				},
				ResultHeader {
					field_name: "title".to_string(),
					text: "Title".to_string(),
				},
				ResultHeader {
					field_name: "author".to_string(),
					text: "Author".to_string(),
				},
			],
			rows: vec![
				vec![
					cell("action_checkbox", "<input>"),
					cell("title", "Ferris & friends"),
					cell("author", "kent"),
				],
				vec![
					cell("action_checkbox", "<input>"),
					cell("title", "Second"),
					cell("author", "kent"),
				],
			],
			result_count: 12,
			has_more: true,
		}
	}

	#[test]
	fn defers_without_ajax_flag() {
		let request = Request::builder().uri("/admin/article/").build();
		assert!(AjaxListPlugin::new().process(&request, &view()).is_none());
	}

	#[test]
	fn drops_columns_outside_list_display() {
		let request = Request::builder().uri("/admin/article/?_ajax=1").build();
		let response = AjaxListPlugin::new().process(&request, &view()).unwrap();
		assert_eq!(response.headers.len(), 2);
		assert!(!response.headers.contains_key("action_checkbox"));
		for object in &response.objects {
			assert_eq!(object.len(), 2);
		}
	}

	#[test]
	fn escapes_cell_values() {
		let request = Request::builder().uri("/admin/article/?_ajax=1").build();
		let response = AjaxListPlugin::new().process(&request, &view()).unwrap();
		assert_eq!(
			response.objects[0].get("title").unwrap(),
			"Ferris &amp; friends"
		);
	}

	#[test]
	fn carries_count_and_pagination() {
		let request = Request::builder().uri("/admin/article/?_ajax=1").build();
		let response = AjaxListPlugin::new().process(&request, &view()).unwrap();
		assert_eq!(response.total_count, 12);
		assert!(response.has_more);
		assert_eq!(response.objects.len(), 2);
	}
}
