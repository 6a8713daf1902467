//! Request pipelines for Forelese.
//!
//! Each pipeline is one request's sequential validate -> act -> respond flow.
//! Pipelines hold their collaborators behind trait objects so tests can swap
//! in fakes for the external services.

mod query;
mod upload;

pub use query::QueryPipeline;
pub use upload::{sanitize_filename, UploadPipeline, UploadReceipt, ALLOWED_EXTENSIONS};
