//! Application state for the web layer.

use std::sync::Arc;

use crate::config::Catalog;
use crate::emission::EmissionFactorTable;
use crate::resolver::RequestResolver;
use crate::store::RouteStore;

/// Shared application state.
///
/// Everything in here is read-only for the lifetime of the server.
#[derive(Clone)]
pub struct AppState {
    /// Known routes
    pub routes: Arc<RouteStore>,

    /// Emission factors per transport mode
    pub factors: Arc<EmissionFactorTable>,

    /// City list for autocomplete, computed once at startup
    pub cities: Arc<Vec<String>>,
}

impl AppState {
    /// Create a new app state from a loaded catalog.
    pub fn new(catalog: Catalog) -> Self {
        let cities = catalog.routes.list_cities();
        Self {
            routes: Arc::new(catalog.routes),
            factors: Arc::new(catalog.factors),
            cities: Arc::new(cities),
        }
    }

    /// A resolver borrowing this state's routes and factors.
    pub fn resolver(&self) -> RequestResolver<'_> {
        RequestResolver::new(&self.routes, &self.factors)
    }
}
