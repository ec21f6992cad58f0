use thiserror::Error;

/// Failure classes of the aggregation pipeline.
///
/// The split matters to the HTTP layer: a geolocation rejection carries the
/// upstream's own message back to the caller, while every other upstream
/// failure collapses into one generic error.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The geolocation service answered, but with a non-success status.
    #[error("geolocation failed: {message}")]
    GeolocationRejected { message: String },

    /// Transport failure, non-OK status or undecodable body from any upstream.
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}
