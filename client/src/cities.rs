/// Fixed city table; not configurable at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub zoom: f64,
}

pub const DEFAULT_CITY: &str = "New York";

/// Camera fly animation length when switching cities, in seconds.
pub const CITY_FLY_DURATION_SECS: f64 = 1.5;
/// Refresh is deferred until the fly animation lands.
pub const CITY_FLY_SETTLE_MS: u32 = 1_500;

/// Zoom and fly duration used when recentering on a single area.
pub const AREA_ZOOM: f64 = 15.0;
pub const AREA_FLY_DURATION_SECS: f64 = 1.0;

pub const CITIES: &[City] = &[
    City {
        name: "New York",
        lat: 40.7128,
        lng: -74.0060,
        zoom: 12.0,
    },
    City {
        name: "Mumbai",
        lat: 19.0760,
        lng: 72.8777,
        zoom: 12.0,
    },
    City {
        name: "Tokyo",
        lat: 35.6762,
        lng: 139.6503,
        zoom: 12.0,
    },
    City {
        name: "London",
        lat: 51.5074,
        lng: -0.1278,
        zoom: 12.0,
    },
    City {
        name: "Shanghai",
        lat: 31.2304,
        lng: 121.4737,
        zoom: 12.0,
    },
    City {
        name: "Miami",
        lat: 25.7617,
        lng: -80.1918,
        zoom: 12.0,
    },
];

pub fn find_city(name: &str) -> Option<&'static City> {
    CITIES.iter().find(|city| city.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_city_is_in_the_table() {
        let city = find_city(DEFAULT_CITY).expect("default city must exist");
        assert_eq!(city.lat, 40.7128);
        assert_eq!(city.lng, -74.0060);
    }

    #[test]
    fn unknown_city_yields_none() {
        assert_eq!(find_city("Atlantis"), None);
    }

    #[test]
    fn all_cities_share_the_default_zoom() {
        assert_eq!(CITIES.len(), 6);
        assert!(CITIES.iter().all(|city| city.zoom == 12.0));
    }
}
