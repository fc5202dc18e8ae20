//! AJAX response variants for admin views
//!
//! Not a state machine: each plugin is a conditional post-processing hook a
//! view calls after assembling its normal render data. When the inbound
//! request is flagged asynchronous the hook returns a structured payload;
//! otherwise it returns `None` and the view renders HTML as usual.

mod detail;
mod form;
mod list;

pub use detail::{AjaxDetailPlugin, DetailViewContent, FieldResult};
pub use form::{AjaxFormPlugin, FormViewContent, NewObject};
pub use list::{AjaxListPlugin, ListViewContent, ResultCell, ResultHeader};

use crate::request::Request;

/// Whether the request asked for an asynchronous payload: either the
/// `XMLHttpRequest` transport marker or an explicit `_ajax` parameter
///
/// # Examples
///
/// ```
/// use reinhardt_admin_filters::{Request, is_ajax_request};
///
/// let plain = Request::builder().uri("/admin/article/").build();
/// assert!(!is_ajax_request(&plain));
///
/// let flagged = Request::builder().uri("/admin/article/?_ajax=1").build();
/// assert!(is_ajax_request(&flagged));
/// ```
pub fn is_ajax_request(request: &Request) -> bool {
	request.is_xhr()
		|| request
			.query_params()
			.get("_ajax")
			.is_some_and(|v| !v.is_empty() && v != "0")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn explicit_zero_does_not_flag() {
		let request = Request::builder().uri("/?_ajax=0").build();
		assert!(!is_ajax_request(&request));
	}

	#[test]
	fn xhr_header_flags() {
		let request = Request::builder()
			.uri("/")
			.header(
				http::header::HeaderName::from_static("x-requested-with"),
				"xmlhttprequest",
			)
			.build();
		assert!(is_ajax_request(&request));
	}
}
