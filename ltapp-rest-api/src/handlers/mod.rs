pub mod datapools;
pub mod health;
pub mod load;
pub mod messages;

// Re-export handler functions
pub use datapools::*;
pub use health::*;
pub use load::*;
pub use messages::*;

use axum::extract::{rejection::QueryRejection, Query};

use crate::errors::{RestError, RestResult};

/// Unwrap a query extraction, reporting malformed parameters in the envelope
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> RestResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| RestError::bad_request(rejection.body_text()))
}
