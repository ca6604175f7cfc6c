use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use kidsguide_core::error::CoreError;
use kidsguide_db::db::DbProvider;

/// Injects the shared connection provider (the pool) into every request's depot.
pub struct DbProviderHandler<T: DbProvider + Send + Sync + Clone> {
    pub provider: T,
}

#[async_trait]
impl<T: DbProvider + Send + Sync + Clone + 'static> salvo::Handler for DbProviderHandler<T> {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        // bb8 pools are reference-counted; cloning shares the same connections
        let provider: Arc<dyn DbProvider + Send + Sync> = Arc::new(self.provider.clone());
        depot.inject(provider);
    }
}

/// ## Summary
/// The connection provider a catalog or event handler should check out from.
///
/// Handlers that fan out (the recurring-event batch) take the provider
/// itself; the rest call `get_connection()` once.
///
/// ## Errors
/// Returns `CoreError::MissingState` (500) when the route was mounted
/// without [`DbProviderHandler`].
pub fn get_db_from_depot(
    depot: &salvo::Depot,
) -> AppResult<Arc<dyn DbProvider + Send + Sync + 'static>> {
    depot
        .obtain::<Arc<dyn DbProvider + Send + Sync>>()
        .cloned()
        .map_err(|_err| CoreError::MissingState("no database provider in depot").into())
}
