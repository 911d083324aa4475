//! Route catalog shown on the dashboard page.
//!
//! The kiosk ships a snapshot of the current route setting as embedded
//! JSON; the dashboard filter panel narrows it down by wall.

use serde::Deserialize;

use crate::error::Result;

/// Embedded route snapshot, compiled into the binary.
pub const DEFAULT_CATALOG_JSON: &str = include_str!("../data/routes.json");

/// One set route or boulder problem.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Route {
    pub name: String,
    pub grade: String,
    pub wall: String,
    pub setter: String,
}

/// Parse the embedded route snapshot.
pub fn load_default() -> Result<Vec<Route>> {
    let routes: Vec<Route> = serde_json::from_str(DEFAULT_CATALOG_JSON)?;
    Ok(routes)
}

/// Distinct wall names in first-seen order.
pub fn walls(routes: &[Route]) -> Vec<String> {
    let mut walls: Vec<String> = Vec::new();
    for route in routes {
        if !walls.contains(&route.wall) {
            walls.push(route.wall.clone());
        }
    }
    walls
}

/// Routes on the given wall, or everything when no wall is selected.
pub fn filter_by_wall<'a>(routes: &'a [Route], wall: Option<&str>) -> Vec<&'a Route> {
    routes
        .iter()
        .filter(|route| wall.is_none_or(|wall| route.wall == wall))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_parses() {
        let routes = load_default().expect("embedded routes.json should parse");
        assert!(!routes.is_empty());
        assert!(routes.iter().all(|route| !route.name.is_empty()));
    }

    #[test]
    fn test_walls_are_distinct() {
        use std::collections::BTreeSet;

        let routes = load_default().unwrap();
        let walls = walls(&routes);
        assert!(!walls.is_empty());

        let distinct: BTreeSet<&String> = walls.iter().collect();
        assert_eq!(walls.len(), distinct.len());
    }

    #[test]
    fn test_filter_by_wall() {
        let routes = load_default().unwrap();
        let walls = walls(&routes);
        let first_wall = &walls[0];

        let filtered = filter_by_wall(&routes, Some(first_wall));
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|route| &route.wall == first_wall));

        let unfiltered = filter_by_wall(&routes, None);
        assert_eq!(unfiltered.len(), routes.len());
    }
}
