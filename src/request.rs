//! Request snapshot consumed by filters and AJAX plugins
//!
//! The host framework owns the real request/response cycle; filters only
//! need the method, headers, and decoded query parameters, so this type
//! captures exactly that for the duration of one render.

use http::{HeaderMap, Method};
use percent_encoding::percent_decode_str;
use std::collections::HashMap;

/// Immutable view of one inbound admin request
#[derive(Debug, Clone)]
pub struct Request {
	method: Method,
	path: String,
	query_params: HashMap<String, String>,
	headers: HeaderMap,
}

/// Builder for [`Request`]
#[derive(Debug, Default)]
pub struct RequestBuilder {
	method: Option<Method>,
	uri: String,
	headers: HeaderMap,
}

impl RequestBuilder {
	/// Set the HTTP method (defaults to GET)
	pub fn method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	/// Set the request URI, including any query string
	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = uri.into();
		self
	}

	/// Add a header
	pub fn header(mut self, name: http::header::HeaderName, value: &str) -> Self {
		if let Ok(value) = value.parse() {
			self.headers.insert(name, value);
		}
		self
	}

	/// Build the request, decoding query parameters from the URI
	pub fn build(self) -> Request {
		let (path, query) = match self.uri.split_once('?') {
			Some((p, q)) => (p.to_string(), q),
			None => (self.uri.clone(), ""),
		};
		Request {
			method: self.method.unwrap_or(Method::GET),
			path,
			query_params: Request::parse_query(query),
			headers: self.headers,
		}
	}
}

impl Request {
	/// Start building a request
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_filters::Request;
	/// use http::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::GET)
	///     .uri("/admin/article/?_p_age__gt=3&_q_=rust")
	///     .build();
	///
	/// assert_eq!(request.path(), "/admin/article/");
	/// assert_eq!(request.query_params().get("_q_"), Some(&"rust".to_string()));
	/// ```
	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}

	fn parse_query(query: &str) -> HashMap<String, String> {
		query
			.split('&')
			.filter(|pair| !pair.is_empty())
			.filter_map(|pair| {
				// Split on first '=' only to preserve '=' in values
				let mut parts = pair.splitn(2, '=');
				let key = parts.next()?;
				let value = parts.next().unwrap_or("");
				Some((Self::decode(key), Self::decode(value)))
			})
			.collect()
	}

	// Form encoding: '+' means space, so it is replaced before percent
	// decoding and an encoded '%2B' still comes out as a literal '+'
	fn decode(component: &str) -> String {
		percent_decode_str(&component.replace('+', " "))
			.decode_utf8_lossy()
			.to_string()
	}

	/// Request method
	pub fn method(&self) -> &Method {
		&self.method
	}

	/// Request path without the query string
	pub fn path(&self) -> &str {
		&self.path
	}

	/// URL-decoded query parameters
	pub fn query_params(&self) -> &HashMap<String, String> {
		&self.query_params
	}

	/// Header value as a string, if present and valid UTF-8
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}

	/// Whether the request carries the `XMLHttpRequest` transport marker
	pub fn is_xhr(&self) -> bool {
		self.header("x-requested-with")
			.is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
	}
}
