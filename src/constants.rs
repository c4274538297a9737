//! Application constants and configuration

pub const APP_NAME: &str = "Widget Gallery";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulated latency of the demo option loader
pub const OPTION_LOAD_DELAY_MS: u64 = 500;

/// Demo property sub-types as (label, value)
pub const PROPERTY_SUB_TYPES: &[(&str, &str)] = &[
    ("Apartment", "apartment"),
    ("Villa", "villa"),
    ("Office Space", "office_space"),
    ("Retail Shop", "retail_shop"),
    ("Warehouse", "warehouse"),
];

/// Static amenity choices as (label, value)
pub const AMENITIES: &[(&str, &str)] = &[
    ("Parking", "parking"),
    ("Elevator", "elevator"),
    ("Swimming Pool", "pool"),
    ("Gym", "gym"),
];

/// Days of demo data shown by the chart
pub const CHART_DAYS: u64 = 30;

/// How long the "value selected" toast stays visible
pub const TOAST_SECS: f32 = 3.0;
