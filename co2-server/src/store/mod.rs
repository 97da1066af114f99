//! Known routes between cities.
//!
//! The route list is loaded once at startup and never mutated. It answers two
//! questions: which cities exist (for autocomplete) and how far apart two
//! cities are (so the user need not type a distance).

use std::collections::HashSet;

use tracing::warn;

use crate::domain::{DomainError, Route, compare_cities, normalize_city};

/// Fixed, ordered list of known routes.
///
/// Lookup is symmetric and ignores case and surrounding whitespace. When
/// several stored routes connect the same pair of cities, the first one
/// stored wins.
#[derive(Debug, Clone, Default)]
pub struct RouteStore {
    routes: Vec<Route>,
}

impl RouteStore {
    /// Create a store from already-validated routes, keeping their order.
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Every distinct city appearing as an origin or destination.
    ///
    /// Duplicates are detected case-insensitively and the first-seen
    /// spelling is kept. The result is sorted by base letters, ignoring
    /// accents and case.
    pub fn list_cities(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut cities = Vec::new();

        for route in &self.routes {
            for city in [route.origin(), route.destination()] {
                if seen.insert(normalize_city(city)) {
                    cities.push(city.to_string());
                }
            }
        }

        // Stable: names with equal keys keep first-seen order
        cities.sort_by(|a, b| compare_cities(a, b));
        cities
    }

    /// Look up the distance between two cities, in either direction.
    ///
    /// Returns `None` immediately if either name is blank.
    ///
    /// # Example
    ///
    /// ```
    /// use co2_server::store::default_routes;
    ///
    /// let store = default_routes();
    /// assert_eq!(store.find_distance("São Paulo", "Rio de Janeiro"), Some(429.0));
    /// assert_eq!(store.find_distance(" RIO DE JANEIRO ", "são paulo"), Some(429.0));
    /// assert_eq!(store.find_distance("São Paulo", ""), None);
    /// ```
    pub fn find_distance(&self, origin: &str, destination: &str) -> Option<f64> {
        let origin = normalize_city(origin);
        let destination = normalize_city(destination);

        if origin.is_empty() || destination.is_empty() {
            return None;
        }

        self.routes
            .iter()
            .find(|r| r.connects(&origin, &destination))
            .map(Route::distance_km)
    }

    /// All stored routes, in stored order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of stored routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are stored.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Builder for creating a route store.
///
/// Rows that fail validation are skipped with a warning, so one bad entry
/// in the catalog does not take down the others.
#[derive(Debug, Default)]
pub struct RouteStoreBuilder {
    routes: Vec<Route>,
}

impl RouteStoreBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route.
    pub fn add(mut self, origin: &str, destination: &str, distance_km: f64) -> Self {
        match Route::new(origin, destination, distance_km) {
            Ok(route) => self.routes.push(route),
            Err(e) => warn!(origin, destination, distance_km, "skipping route: {e}"),
        }
        self
    }

    /// Add a route, failing on invalid input instead of skipping it.
    pub fn try_add(
        mut self,
        origin: &str,
        destination: &str,
        distance_km: f64,
    ) -> Result<Self, DomainError> {
        self.routes.push(Route::new(origin, destination, distance_km)?);
        Ok(self)
    }

    /// Build the route store.
    pub fn build(self) -> RouteStore {
        RouteStore::new(self.routes)
    }
}

/// The built-in set of Brazilian intercity routes.
pub fn default_routes() -> RouteStore {
    RouteStoreBuilder::new()
        .add("São Paulo", "Rio de Janeiro", 429.0)
        .add("São Paulo", "Belo Horizonte", 586.0)
        .add("Brasília", "Goiânia", 209.0)
        .add("Curitiba", "Florianópolis", 300.0)
        .build()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn city_name() -> impl Strategy<Value = String> {
        "[A-Za-zÀ-ÖØ-Þà-öø-ÿ]{1,8}( [A-Za-zÀ-ÖØ-Þà-öø-ÿ]{1,8})?"
    }

    fn route_rows() -> impl Strategy<Value = Vec<(String, String, f64)>> {
        prop::collection::vec((city_name(), city_name(), 0.0f64..5000.0), 0..12)
    }

    fn build(rows: &[(String, String, f64)]) -> RouteStore {
        rows.iter()
            .fold(RouteStoreBuilder::new(), |b, (o, d, km)| b.add(o, d, *km))
            .build()
    }

    /// Randomize letter case and add surrounding whitespace.
    fn scramble(s: &str, flip: bool) -> String {
        let body: String = if flip {
            s.to_uppercase()
        } else {
            s.to_lowercase()
        };
        format!("  {body}\t")
    }

    proptest! {
        /// Lookup is symmetric for every stored pair
        #[test]
        fn find_distance_symmetric(rows in route_rows()) {
            let store = build(&rows);
            for route in store.routes() {
                prop_assert_eq!(
                    store.find_distance(route.origin(), route.destination()),
                    store.find_distance(route.destination(), route.origin())
                );
            }
        }

        /// Every stored pair can be found
        #[test]
        fn stored_pairs_found(rows in route_rows()) {
            let store = build(&rows);
            for route in store.routes() {
                prop_assert!(store.find_distance(route.origin(), route.destination()).is_some());
            }
        }

        /// Case and padding never change the lookup result
        #[test]
        fn find_distance_case_insensitive(rows in route_rows(), flip in any::<bool>()) {
            let store = build(&rows);
            for route in store.routes() {
                prop_assert_eq!(
                    store.find_distance(
                        &scramble(route.origin(), flip),
                        &scramble(route.destination(), !flip)
                    ),
                    store.find_distance(route.origin(), route.destination())
                );
            }
        }

        /// Listed cities are unique under case-insensitive comparison
        #[test]
        fn list_cities_unique(rows in route_rows()) {
            let cities = build(&rows).list_cities();
            let keys: HashSet<String> = cities.iter().map(|c| normalize_city(c)).collect();
            prop_assert_eq!(keys.len(), cities.len());
        }

        /// Listed cities are sorted by collation key
        #[test]
        fn list_cities_sorted(rows in route_rows()) {
            let cities = build(&rows).list_cities();
            for window in cities.windows(2) {
                prop_assert!(
                    compare_cities(&window[0], &window[1]) != std::cmp::Ordering::Greater,
                    "{:?} should not come before {:?}",
                    window[0],
                    window[1]
                );
            }
        }

        /// Every endpoint appears in the city list
        #[test]
        fn list_cities_complete(rows in route_rows()) {
            let store = build(&rows);
            let keys: HashSet<String> =
                store.list_cities().iter().map(|c| normalize_city(c)).collect();
            for route in store.routes() {
                prop_assert!(keys.contains(&normalize_city(route.origin())));
                prop_assert!(keys.contains(&normalize_city(route.destination())));
            }
        }
    }
}
