//! Albedo: a programmable HTTP test double.
//!
//! By default every request is answered with an empty 200. Responses can be
//! reflected once through `POST /reflect`, or bound to a method and request
//! target through `POST /configure_reflection` until `PUT /reset`.

pub mod api;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod logging;
pub mod reflection;
pub mod response;
