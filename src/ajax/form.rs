//! JSON variant of form submission results

use super::is_ajax_request;
use crate::request::Request;
use crate::types::responses::{AjaxFormResponse, FieldErrorEntry, NON_FIELD_ERRORS};
use http::Method;

/// The object a successful save produced, with its follow-up URLs
#[derive(Debug, Clone)]
pub struct NewObject {
	pub id: String,
	pub repr: String,
	pub change_url: String,
	pub detail_url: String,
}

/// Form state the add/change view holds after processing a submission
///
/// `errors` pairs each field name with its messages; [`NON_FIELD_ERRORS`]
/// names errors not attached to a single field.
#[derive(Debug, Clone, Default)]
pub struct FormViewContent {
	pub new_obj: Option<NewObject>,
	pub errors: Vec<(String, Vec<String>)>,
}

impl FormViewContent {
	pub fn is_valid(&self) -> bool {
		self.errors.is_empty()
	}
}

/// Replaces form-view redirects and re-renders with JSON verdicts on
/// asynchronous submissions
#[derive(Debug, Default)]
pub struct AjaxFormPlugin;

impl AjaxFormPlugin {
	pub fn new() -> Self {
		Self
	}

	/// Success payload after a completed save, or `None` when the request
	/// wants the normal redirect
	pub fn post_response(
		&self,
		request: &Request,
		view: &FormViewContent,
	) -> Option<AjaxFormResponse> {
		if !is_ajax_request(request) {
			return None;
		}
		tracing::debug!("serving form save result as json");
		let obj = view.new_obj.as_ref();
		Some(AjaxFormResponse::Success {
			obj_id: obj.map(|o| o.id.clone()),
			obj_repr: obj.map(|o| o.repr.clone()),
			change_url: obj.map(|o| o.change_url.clone()),
			detail_url: obj.map(|o| o.detail_url.clone()),
		})
	}

	/// Validation verdict for a submission that did not save, or `None` when
	/// the request is not an asynchronous POST
	pub fn get_response(
		&self,
		request: &Request,
		view: &FormViewContent,
	) -> Option<AjaxFormResponse> {
		if !is_ajax_request(request) || request.method() != Method::POST {
			return None;
		}
		if view.is_valid() {
			return Some(AjaxFormResponse::Success {
				obj_id: None,
				obj_repr: None,
				change_url: None,
				detail_url: None,
			});
		}
		tracing::debug!(fields = view.errors.len(), "serving form errors as json");
		let errors = view
			.errors
			.iter()
			.map(|(name, messages)| FieldErrorEntry {
				id: if name == NON_FIELD_ERRORS {
					name.clone()
				} else {
					format!("id_{name}")
				},
				name: name.clone(),
				errors: messages.clone(),
			})
			.collect();
		Some(AjaxFormResponse::Error { errors })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn post(uri: &str) -> Request {
		Request::builder().method(Method::POST).uri(uri).build()
	}

	#[test]
	fn post_response_carries_object_urls() {
		let view = FormViewContent {
			new_obj: Some(NewObject {
				id: "7".to_string(),
				repr: "Article 7".to_string(),
				change_url: "/admin/article/7/change/".to_string(),
				detail_url: "/admin/article/7/detail/".to_string(),
			}),
			errors: Vec::new(),
		};
		let response = AjaxFormPlugin::new()
			.post_response(&post("/admin/article/add/?_ajax=1"), &view)
			.unwrap();
		let json = serde_json::to_value(&response).unwrap();
		assert_eq!(json["result"], "success");
		assert_eq!(json["obj_id"], "7");
		assert_eq!(json["change_url"], "/admin/article/7/change/");
	}

	#[test]
	fn error_ids_follow_widget_convention() {
		let view = FormViewContent {
			new_obj: None,
			errors: vec![
				("title".to_string(), vec!["This field is required.".to_string()]),
				(
					NON_FIELD_ERRORS.to_string(),
					vec!["Duplicate entry.".to_string()],
				),
			],
		};
		let response = AjaxFormPlugin::new()
			.get_response(&post("/admin/article/add/?_ajax=1"), &view)
			.unwrap();
		let AjaxFormResponse::Error { errors } = response else {
			panic!("expected an error verdict");
		};
		assert_eq!(errors[0].id, "id_title");
		assert_eq!(errors[0].name, "title");
		assert_eq!(errors[1].id, NON_FIELD_ERRORS);
	}

	#[test]
	fn get_response_ignores_plain_get() {
		let request = Request::builder().uri("/admin/article/add/?_ajax=1").build();
		let view = FormViewContent::default();
		assert!(AjaxFormPlugin::new().get_response(&request, &view).is_none());
	}

	#[test]
	fn valid_resubmission_reports_bare_success() {
		let view = FormViewContent::default();
		let response = AjaxFormPlugin::new()
			.get_response(&post("/admin/article/add/?_ajax=1"), &view)
			.unwrap();
		let json = serde_json::to_value(&response).unwrap();
		assert_eq!(json["result"], "success");
		assert!(json.get("obj_id").is_none());
	}
}
