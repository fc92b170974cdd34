//! Authenticated request pipeline.
//!
//! [`headers`] builds the outbound stage, [`classify`] is the pure inbound
//! classifier, and [`http::HttpClient`] orchestrates both and owns every
//! side effect (notification, session teardown, deferred redirect).

pub mod classify;
pub mod headers;
pub mod http;
