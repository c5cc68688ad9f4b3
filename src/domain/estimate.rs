//! Estimate result types.
//!
//! Represents the output of the battery life regression and the
//! rules that interpret it.

use serde::{Deserialize, Serialize};

use super::usage::{Feature, UsageProfile, FEATURE_COUNT};

/// Predicted hours above which battery performance is excellent.
pub const HIGH_BAND_HOURS: f64 = 14.0;

/// Predicted hours above which battery drain is only moderate.
pub const MODERATE_BAND_HOURS: f64 = 8.0;

/// Severity band for a battery life prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeverityBand {
    /// Long battery life
    High,
    /// Moderate drain
    Moderate,
    /// Heavy drain, short battery life
    Low,
}

impl SeverityBand {
    /// Classify predicted hours. Both breakpoints are strict.
    #[must_use]
    pub fn from_hours(hours: f64) -> Self {
        if hours > HIGH_BAND_HOURS {
            Self::High
        } else if hours > MODERATE_BAND_HOURS {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "Excellent Battery Performance",
            Self::Moderate => "Moderate Battery Drain",
            Self::Low => "High Battery Drain",
        }
    }

    /// File name of the icon asset for this band.
    #[must_use]
    pub fn icon_asset(&self) -> &'static str {
        match self {
            Self::High => "high.png",
            Self::Moderate => "medium.png",
            Self::Low => "low.png",
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::High => (16, 185, 129),    // Emerald (#10B981)
            Self::Moderate => (251, 191, 36), // Amber (#FBBF24)
            Self::Low => (244, 63, 94),      // Rose (#F43F5E)
        }
    }
}

impl std::fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "HIGH"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

/// Optimization tip triggered by a single usage threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advisory {
    ReduceGaming,
    LowerBrightness,
    CloseBackgroundApps,
}

impl Advisory {
    /// Evaluation order. Every rule is checked; none excludes another.
    pub const ORDER: [Advisory; 3] = [
        Advisory::ReduceGaming,
        Advisory::LowerBrightness,
        Advisory::CloseBackgroundApps,
    ];

    /// Whether this tip applies to the raw (unscaled) profile.
    #[must_use]
    pub fn applies_to(&self, profile: &UsageProfile) -> bool {
        match self {
            Self::ReduceGaming => profile.gaming_hours > 3.0,
            Self::LowerBrightness => profile.brightness > 80.0,
            Self::CloseBackgroundApps => profile.background_apps > 20.0,
        }
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::ReduceGaming => "Reduce gaming time to improve battery life.",
            Self::LowerBrightness => "Lower brightness level to save power.",
            Self::CloseBackgroundApps => "Close unused background apps.",
        }
    }

    /// All tips that apply to `profile`, in evaluation order.
    #[must_use]
    pub fn evaluate(profile: &UsageProfile) -> Vec<Advisory> {
        Self::ORDER
            .into_iter()
            .filter(|a| a.applies_to(profile))
            .collect()
    }
}

/// Per-feature importance weights, aligned with [`Feature::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportances {
    weights: [f64; FEATURE_COUNT],
}

impl FeatureImportances {
    /// Wrap raw weights. Negative or non-finite entries become zero.
    #[must_use]
    pub fn new(weights: [f64; FEATURE_COUNT]) -> Self {
        Self {
            weights: weights.map(|w| if w.is_finite() && w > 0.0 { w } else { 0.0 }),
        }
    }

    /// Same weights scaled to sum to 1. All-zero weights stay zero.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let total: f64 = self.weights.iter().sum();
        if total <= 0.0 {
            return *self;
        }
        Self {
            weights: self.weights.map(|w| w / total),
        }
    }

    #[must_use]
    pub fn weight(&self, feature: Feature) -> f64 {
        self.weights[feature.index()]
    }

    /// `(feature, weight)` pairs in model order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.into_iter().map(|f| (f, self.weights[f.index()]))
    }
}

/// A single battery life estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estimate {
    /// Predicted battery life in hours
    pub hours: f64,

    /// Severity classification
    pub band: SeverityBand,

    /// Triggered optimization tips
    pub advisories: Vec<Advisory>,

    /// When the estimate was computed
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Estimate {
    /// Interpret a raw prediction for the profile that produced it.
    #[must_use]
    pub fn new(hours: f64, profile: &UsageProfile) -> Self {
        Self {
            hours,
            band: SeverityBand::from_hours(hours),
            advisories: Advisory::evaluate(profile),
            created_at: chrono::Utc::now(),
        }
    }

    /// Prediction formatted with two decimals.
    #[must_use]
    pub fn hours_display(&self) -> String {
        format!("{:.2} hours", self.hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(gaming_hours: f64, brightness: f64, background_apps: f64) -> UsageProfile {
        UsageProfile {
            gaming_hours,
            brightness,
            background_apps,
            ..UsageProfile::default()
        }
    }

    #[test]
    fn test_band_from_hours() {
        assert_eq!(SeverityBand::from_hours(15.0), SeverityBand::High);
        assert_eq!(SeverityBand::from_hours(10.0), SeverityBand::Moderate);
        assert_eq!(SeverityBand::from_hours(5.0), SeverityBand::Low);
    }

    #[test]
    fn test_band_breakpoints_are_strict() {
        assert_eq!(SeverityBand::from_hours(14.0), SeverityBand::Moderate);
        assert_eq!(SeverityBand::from_hours(8.0), SeverityBand::Low);
        assert_eq!(SeverityBand::from_hours(14.000_1), SeverityBand::High);
    }

    #[test]
    fn test_single_advisory() {
        let tips = Advisory::evaluate(&profile(5.0, 50.0, 5.0));
        assert_eq!(tips, vec![Advisory::ReduceGaming]);
    }

    #[test]
    fn test_advisories_keep_declared_order() {
        let tips = Advisory::evaluate(&profile(1.0, 90.0, 30.0));
        assert_eq!(
            tips,
            vec![Advisory::LowerBrightness, Advisory::CloseBackgroundApps]
        );
    }

    #[test]
    fn test_advisory_thresholds_are_strict() {
        assert!(Advisory::evaluate(&profile(3.0, 80.0, 20.0)).is_empty());
        assert_eq!(Advisory::evaluate(&profile(4.0, 81.0, 21.0)).len(), 3);
    }

    #[test]
    fn test_estimate_creation() {
        let estimate = Estimate::new(12.345, &profile(5.0, 50.0, 5.0));

        assert_eq!(estimate.band, SeverityBand::Moderate);
        assert_eq!(estimate.advisories, vec![Advisory::ReduceGaming]);
        assert_eq!(estimate.hours_display(), "12.35 hours");
    }

    #[test]
    fn test_importances_normalized() {
        let raw = FeatureImportances::new([2.0, 1.0, 1.0, 0.0, -3.0, f64::NAN]);
        let norm = raw.normalized();

        assert!((norm.weight(Feature::ScreenTime) - 0.5).abs() < 1e-12);
        assert!((norm.weight(Feature::GamingHours) - 0.25).abs() < 1e-12);
        assert_eq!(norm.weight(Feature::BackgroundApps), 0.0);
        assert_eq!(norm.weight(Feature::AppUsage), 0.0);

        let zero = FeatureImportances::new([0.0; FEATURE_COUNT]).normalized();
        assert!(zero.iter().all(|(_, w)| w == 0.0));
    }
}
