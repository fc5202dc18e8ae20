//! Query-parameter bookkeeping for filters
//!
//! Every filter-controlled parameter is namespaced with [`FILTER_PREFIX`] so
//! it cannot collide with the admin's other query parameters (search term,
//! pagination, ordering). [`FilterParams`] is the per-request working set of
//! unprefixed lookup keys that filters consume during construction;
//! [`UrlQuery`] is a snapshot of the full parameter set used to generate
//! navigation links that toggle one filter while preserving the rest.

use crate::request::Request;
use std::collections::BTreeMap;

/// Reserved prefix for filter-controlled query parameters
pub const FILTER_PREFIX: &str = "_p_";

/// Query parameter carrying the admin search term
pub const SEARCH_VAR: &str = "_q_";

/// Working set of unprefixed lookup parameters for one list render
///
/// Built from the request by stripping [`FILTER_PREFIX`]; filters pop the
/// keys they recognize so the same entries are not also treated as ordinary
/// parameters downstream.
#[derive(Debug, Clone, Default)]
pub struct FilterParams {
	params: BTreeMap<String, String>,
}

impl FilterParams {
	/// Extract the prefixed parameters from a request
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_filters::{FilterParams, Request};
	///
	/// let request = Request::builder()
	///     .uri("/admin/?_p_age__gt=30&_q_=smith&page=2")
	///     .build();
	/// let params = FilterParams::from_request(&request);
	/// assert_eq!(params.get("age__gt"), Some("30"));
	/// assert_eq!(params.len(), 1);
	/// ```
	pub fn from_request(request: &Request) -> Self {
		let params = request
			.query_params()
			.iter()
			.filter_map(|(k, v)| {
				k.strip_prefix(FILTER_PREFIX)
					.map(|stripped| (stripped.to_string(), v.clone()))
			})
			.collect();
		Self { params }
	}

	/// Insert a lookup parameter (unprefixed key)
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.params.insert(key.into(), value.into());
	}

	/// Remove and return the value for `key`
	pub fn pop(&mut self, key: &str) -> Option<String> {
		self.params.remove(key)
	}

	/// Look up a value without consuming it
	pub fn get(&self, key: &str) -> Option<&str> {
		self.params.get(key).map(String::as_str)
	}

	/// Entries whose key starts with `prefix`, in key order
	pub fn with_key_prefix(&self, prefix: &str) -> Vec<(String, String)> {
		self.params
			.iter()
			.filter(|(k, _)| k.starts_with(prefix))
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()
	}

	/// Number of remaining entries
	pub fn len(&self) -> usize {
		self.params.len()
	}

	/// Whether no entries remain
	pub fn is_empty(&self) -> bool {
		self.params.is_empty()
	}
}

/// Snapshot of the full request parameter set for link generation
#[derive(Debug, Clone, Default)]
pub struct UrlQuery {
	params: BTreeMap<String, String>,
}

impl UrlQuery {
	/// Capture the current request's parameters
	pub fn from_request(request: &Request) -> Self {
		Self {
			params: request
				.query_params()
				.iter()
				.map(|(k, v)| (k.clone(), v.clone()))
				.collect(),
		}
	}

	#[cfg(test)]
	pub(crate) fn from_pairs(pairs: &[(&str, &str)]) -> Self {
		Self {
			params: pairs
				.iter()
				.map(|(k, v)| (k.to_string(), v.to_string()))
				.collect(),
		}
	}

	/// Build a query string with `new_params` merged in and every parameter
	/// whose key starts with one of `remove` dropped
	///
	/// Removal happens before merging, so a key can be replaced by listing
	/// it in both. Output keys are sorted, giving deterministic links.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_filters::{Request, UrlQuery};
	///
	/// let request = Request::builder()
	///     .uri("/admin/?_p_age__gt=30&_q_=smith")
	///     .build();
	/// let url = UrlQuery::from_request(&request);
	///
	/// let qs = url.query_string(&[], &["_p_age__".to_string()]);
	/// assert_eq!(qs, "?_q_=smith");
	/// ```
	pub fn query_string(&self, new_params: &[(String, String)], remove: &[String]) -> String {
		let mut params: BTreeMap<String, String> = self
			.params
			.iter()
			.filter(|(k, _)| !remove.iter().any(|r| k.starts_with(r.as_str())))
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect();
		for (k, v) in new_params {
			params.insert(k.clone(), v.clone());
		}

		let pairs: Vec<(&String, &String)> = params.iter().collect();
		let encoded = serde_urlencoded::to_string(&pairs).unwrap_or_default();
		format!("?{}", encoded)
	}
}
