// Placeholder figures for the results dashboard. Nothing here depends on the
// selected trail: no elevation, weather or routing data is fetched.

/// Elevation samples (feet) drawn for every trail
pub const MOCK_ELEVATION: [u64; 8] = [200, 350, 300, 550, 700, 650, 800, 400];

pub const ELEVATION_GAIN_LABEL: &str = "+1,204 ft";

pub const WEATHER_SUMMARY: &str = "Perfect Conditions • 65°F";

pub const ROUTE_DISTANCE: &str = "284 miles";

pub const ROUTE_DURATION: &str = "4h 23m";

/// Elevation samples shifted so the lowest point sits at zero, which keeps
/// the profile readable in a chart scaled from zero.
pub fn elevation_profile() -> Vec<u64> {
    let min = MOCK_ELEVATION.iter().copied().min().unwrap_or(0);
    MOCK_ELEVATION.iter().map(|h| h - min).collect()
}
