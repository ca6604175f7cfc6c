use std::sync::Arc;

use salvo::async_trait;
pub use kidsguide_core::config::*;

use kidsguide_core::error::CoreError;

use crate::error::{AppError, AppResult};

/// Shares one loaded [`Settings`] with every request, so listing handlers
/// see the configured page sizes and `site.timezone`.
pub struct ConfigHandler {
    pub settings: Arc<Settings>,
}

#[async_trait]
impl salvo::Handler for ConfigHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.settings));
    }
}

/// ## Summary
/// The settings a handler reads page sizes and the site timezone from.
///
/// ## Errors
/// Returns `CoreError::MissingState` (500) when the route was mounted
/// without [`ConfigHandler`].
pub fn get_config_from_depot(depot: &salvo::Depot) -> AppResult<Arc<Settings>> {
    depot
        .obtain::<Arc<Settings>>()
        .cloned()
        .map_err(|_err| AppError::CoreError(CoreError::MissingState("no settings in depot")))
}
