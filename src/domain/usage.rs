//! Usage profile types for battery life estimation.
//!
//! Six daily-usage features, in the order the trained model expects them.

use serde::{Deserialize, Serialize};

/// Number of features consumed by the model.
pub const FEATURE_COUNT: usize = 6;

/// Feature names as written in the training artifacts.
/// Order: screen_time, gaming_hours, brightness, battery_capacity, background_apps, app_usage
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "screen_time",
    "gaming_hours",
    "brightness",
    "battery_capacity",
    "background_apps",
    "app_usage",
];

/// One input feature of the usage profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Daily screen-on time in hours
    ScreenTime,
    /// Daily gaming time in hours
    GamingHours,
    /// Display brightness in percent
    Brightness,
    /// Rated battery capacity in mAh
    BatteryCapacity,
    /// Number of apps kept running in the background
    BackgroundApps,
    /// Number of distinct apps used per day
    AppUsage,
}

impl Feature {
    /// All features in model order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::ScreenTime,
        Feature::GamingHours,
        Feature::Brightness,
        Feature::BatteryCapacity,
        Feature::BackgroundApps,
        Feature::AppUsage,
    ];

    /// Position of this feature in the model input vector.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::ScreenTime => 0,
            Self::GamingHours => 1,
            Self::Brightness => 2,
            Self::BatteryCapacity => 3,
            Self::BackgroundApps => 4,
            Self::AppUsage => 5,
        }
    }

    /// Artifact name (snake_case).
    #[must_use]
    pub fn name(self) -> &'static str {
        FEATURE_NAMES[self.index()]
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ScreenTime => "Screen Time",
            Self::GamingHours => "Gaming Hours",
            Self::Brightness => "Brightness",
            Self::BatteryCapacity => "Battery Capacity",
            Self::BackgroundApps => "Background Apps",
            Self::AppUsage => "App Usage",
        }
    }

    /// Unit hint shown next to the control.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Self::ScreenTime | Self::GamingHours => "hours",
            Self::Brightness => "%",
            Self::BatteryCapacity => "mAh",
            Self::BackgroundApps => "running",
            Self::AppUsage => "apps/day",
        }
    }

    /// Inclusive (min, max) range accepted by the input control.
    #[must_use]
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::ScreenTime => (1.0, 15.0),
            Self::GamingHours => (0.0, 10.0),
            Self::Brightness => (10.0, 100.0),
            Self::BatteryCapacity => (2000.0, 6000.0),
            Self::BackgroundApps => (0.0, 50.0),
            Self::AppUsage => (1.0, 40.0),
        }
    }

    /// Value the control starts at.
    #[must_use]
    pub fn default_value(self) -> f64 {
        match self {
            Self::ScreenTime => 6.0,
            Self::GamingHours => 2.0,
            Self::Brightness => 70.0,
            Self::BatteryCapacity => 4000.0,
            Self::BackgroundApps => 10.0,
            Self::AppUsage => 12.0,
        }
    }

    /// Clamp a value into this feature's range.
    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        let (min, max) = self.range();
        if value.is_nan() {
            return self.default_value();
        }
        value.clamp(min, max)
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw usage profile submitted by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageProfile {
    /// Screen time in hours (1-15)
    pub screen_time: f64,

    /// Gaming time in hours (0-10)
    pub gaming_hours: f64,

    /// Brightness in percent (10-100)
    pub brightness: f64,

    /// Battery capacity in mAh (2000-6000)
    pub battery_capacity: f64,

    /// Background apps running (0-50)
    pub background_apps: f64,

    /// Apps used per day (1-40)
    pub app_usage: f64,
}

impl Default for UsageProfile {
    fn default() -> Self {
        Self::from_array(Feature::ALL.map(Feature::default_value))
    }
}

impl UsageProfile {
    /// Build a profile from values in model order.
    #[must_use]
    pub fn from_array(v: [f64; FEATURE_COUNT]) -> Self {
        Self {
            screen_time: v[0],
            gaming_hours: v[1],
            brightness: v[2],
            battery_capacity: v[3],
            background_apps: v[4],
            app_usage: v[5],
        }
    }

    /// Values in model order.
    #[must_use]
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.screen_time,
            self.gaming_hours,
            self.brightness,
            self.battery_capacity,
            self.background_apps,
            self.app_usage,
        ]
    }

    /// Read a single feature.
    #[must_use]
    pub fn get(&self, feature: Feature) -> f64 {
        self.to_array()[feature.index()]
    }

    /// Copy of this profile with every feature clamped to its range.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let raw = self.to_array();
        Self::from_array(Feature::ALL.map(|f| f.clamp(raw[f.index()])))
    }
}

/// A usage profile after the fitted scaling transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledVector(pub [f64; FEATURE_COUNT]);

impl ScaledVector {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}
