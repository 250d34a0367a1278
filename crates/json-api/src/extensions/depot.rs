//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use crate::observability::REQUEST_ID_DEPOT_KEY;

/// Helpers for reading request-scoped values out of the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn request_id(&self) -> &str;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn request_id(&self) -> &str {
        self.get::<String>(REQUEST_ID_DEPOT_KEY)
            .map_or("-", String::as_str)
    }
}
