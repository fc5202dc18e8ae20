//! # Reinhardt Admin Filters
//!
//! Pluggable list-filtering widgets and AJAX response plugins for
//! Django-style admin views.
//!
//! ## Overview
//!
//! Two pieces make up this crate:
//!
//! - A [`FilterRegistry`] that matches a model field against an ordered list
//!   of filter descriptors (first match wins) and constructs a request-bound
//!   [`FieldFilter`]. Each filter extracts its own namespaced query
//!   parameters, renders toggle links as [`Choice`] values, and narrows a
//!   [`QuerySet`] with the captured constraints.
//! - Three AJAX plugins ([`AjaxListPlugin`], [`AjaxFormPlugin`],
//!   [`AjaxDetailPlugin`]) that turn the normal list / form / detail
//!   renderings into structured payloads when the request is flagged
//!   asynchronous.
//!
//! ## Quick Start
//!
//! ```
//! use reinhardt_admin_filters::{
//!     AdminSettings, AdminSite, EmptySource, FieldDescriptor, FieldKind,
//!     FilterContext, FilterParams, FilterRegistry, ModelMeta, Request,
//! };
//! use std::sync::Arc;
//!
//! let model = Arc::new(ModelMeta::new(
//!     "article",
//!     vec![FieldDescriptor::new("is_published", FieldKind::Boolean)],
//! ));
//! let request = Request::builder()
//!     .uri("/admin/article/?_p_is_published__exact=1")
//!     .build();
//!
//! let site = AdminSite::new("/admin");
//! let settings = AdminSettings::default();
//! let source = EmptySource;
//! let ctx = FilterContext::new(&request, model.clone(), &site, &source, &settings);
//! let mut params = FilterParams::from_request(&request);
//!
//! let registry = FilterRegistry::with_defaults();
//! let field = model.field("is_published").unwrap();
//! let filter = registry
//!     .create(field, &mut params, &ctx, "is_published")
//!     .unwrap()
//!     .expect("boolean fields always match a filter");
//! assert!(filter.is_used());
//! ```

pub mod ajax;
pub mod fields;
pub mod filters;
pub mod lookup;
pub mod params;
pub mod query;
pub mod request;
pub mod site;
pub mod text;
pub mod types;

pub use ajax::{
	AjaxDetailPlugin, AjaxFormPlugin, AjaxListPlugin, DetailViewContent, FieldResult,
	FormViewContent, ListViewContent, NewObject, ResultCell, ResultHeader, is_ajax_request,
};
pub use fields::{FieldDescriptor, FieldKind, ModelMeta};
pub use filters::{
	AllValuesFieldFilter, BooleanFieldFilter, Choice, ChoicesFieldFilter, DateFieldFilter,
	FieldFilter, FilterContext, FilterDescriptor, FilterRegistry, NumberFieldFilter,
	RelatedFieldFilter, RelatedSearchFieldFilter, TextFieldFilter,
};
pub use lookup::{LookupValue, prepare_lookup_value};
pub use params::{FILTER_PREFIX, FilterParams, SEARCH_VAR, UrlQuery};
pub use query::{Filter, FilterOperator, FilterValue, QuerySet};
pub use request::Request;
pub use site::{AdminSettings, AdminSite, EmptySource, ModelAdminConfig, RelFieldStyle, RelatedSource};
pub use types::errors::{AdminError, AdminResult};
pub use types::responses::{
	AjaxDetailResponse, AjaxFormResponse, AjaxListResponse, FieldErrorEntry, NON_FIELD_ERRORS,
};

/// Display value used for "no related object" / null choices in list filters
pub const EMPTY_CHANGELIST_VALUE: &str = "(None)";
