//! Shared model and logic of the logbook client.
//!
//! Everything here is independent of the browser: the template schema and
//! its builder operations, value bags, validation, submission payloads, the
//! entry list, request sequencing and the API error type. The `frontend`
//! crate renders these; tests exercise them natively.

pub mod api;
pub mod builder;
pub mod entries;
pub mod fetch;
pub mod model;
pub mod requests;
pub mod submission;
pub mod validation;
