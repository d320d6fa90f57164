//! Discrete phase names and illumination descriptors.
//!
//! The phase is a function of the position in the synodic cycle, never of
//! the illumination: illumination is symmetric over a cycle, so it cannot
//! separate waxing from waning. Classification uses eight anchors spaced
//! 1/8 apart with a ±1/16 band around each; band edges are half open on
//! the upper side, so a position exactly between two anchors takes the
//! later phase.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The eight canonical phases of the synodic cycle.
///
/// Serializes as the canonical display name ("Full Moon"), the form the
/// presentation layers print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    #[cfg_attr(feature = "serde", serde(rename = "New Moon"))]
    New,
    #[cfg_attr(feature = "serde", serde(rename = "Waxing Crescent"))]
    WaxingCrescent,
    #[cfg_attr(feature = "serde", serde(rename = "First Quarter"))]
    FirstQuarter,
    #[cfg_attr(feature = "serde", serde(rename = "Waxing Gibbous"))]
    WaxingGibbous,
    #[cfg_attr(feature = "serde", serde(rename = "Full Moon"))]
    Full,
    #[cfg_attr(feature = "serde", serde(rename = "Waning Gibbous"))]
    WaningGibbous,
    #[cfg_attr(feature = "serde", serde(rename = "Last Quarter"))]
    LastQuarter,
    #[cfg_attr(feature = "serde", serde(rename = "Waning Crescent"))]
    WaningCrescent,
}

/// Anchor cycle positions; 1.0 wraps back to the next new moon.
const ANCHORS: [(f64, Phase); 9] = [
    (0.000, Phase::New),
    (0.125, Phase::WaxingCrescent),
    (0.250, Phase::FirstQuarter),
    (0.375, Phase::WaxingGibbous),
    (0.500, Phase::Full),
    (0.625, Phase::WaningGibbous),
    (0.750, Phase::LastQuarter),
    (0.875, Phase::WaningCrescent),
    (1.000, Phase::New),
];

/// Half the anchor spacing: every position matches exactly one band.
const BAND_HALF_WIDTH: f64 = 0.0625;

impl Phase {
    pub const ALL: [Phase; 8] = [
        Phase::New,
        Phase::WaxingCrescent,
        Phase::FirstQuarter,
        Phase::WaxingGibbous,
        Phase::Full,
        Phase::WaningGibbous,
        Phase::LastQuarter,
        Phase::WaningCrescent,
    ];

    /// Classifies a position in the synodic cycle (0 = new moon,
    /// 0.5 = full moon). Values outside [0, 1) wrap first, so exactly
    /// 1.0 reads as the next new moon.
    ///
    /// Total over the cycle: every finite input maps to a phase.
    pub fn for_cycle_position(cycle_position: f64) -> Phase {
        let pos = cycle_position.rem_euclid(1.0);
        for (anchor, phase) in ANCHORS {
            // Ascending anchors: the first band whose upper edge lies
            // beyond pos is the match, and the previous band's upper
            // edge already bounds pos from below.
            if pos < anchor + BAND_HALF_WIDTH {
                return phase;
            }
        }
        // pos ∈ [0.9375, 1.0) matched the wrapped anchor above; only a
        // non-finite input falls through.
        Phase::New
    }

    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            Phase::New => "New Moon",
            Phase::WaxingCrescent => "Waxing Crescent",
            Phase::FirstQuarter => "First Quarter",
            Phase::WaxingGibbous => "Waxing Gibbous",
            Phase::Full => "Full Moon",
            Phase::WaningGibbous => "Waning Gibbous",
            Phase::LastQuarter => "Last Quarter",
            Phase::WaningCrescent => "Waning Crescent",
        }
    }

    /// Long-form description as the console and GUI front ends print it.
    pub fn description(&self) -> &'static str {
        match self {
            Phase::New => "New (totally dark)",
            Phase::WaxingCrescent => "Waxing Crescent (increasing to full)",
            Phase::FirstQuarter => "First Quarter (increasing to full)",
            Phase::WaxingGibbous => "Waxing Gibbous (increasing to full)",
            Phase::Full => "Full Moon (full light)",
            Phase::WaningGibbous => "Waning Gibbous (decreasing from full)",
            Phase::LastQuarter => "Last Quarter (decreasing from full)",
            Phase::WaningCrescent => "Waning Crescent (decreasing from full)",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Qualitative description of how much of the disk is lit, independent
/// of the phase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IlluminationBand {
    VirtuallyDark,
    BarelyVisible,
    ThinCrescent,
    HalfIlluminated,
    MoreThanHalfIlluminated,
    AlmostFull,
    FullyIlluminated,
}

impl IlluminationBand {
    /// Band for an illumination percentage. Ranges are half open upward;
    /// 99 and above reads as fully illuminated.
    pub fn for_percent(percent: f64) -> IlluminationBand {
        match percent {
            p if p < 1.0 => IlluminationBand::VirtuallyDark,
            p if p < 10.0 => IlluminationBand::BarelyVisible,
            p if p < 25.0 => IlluminationBand::ThinCrescent,
            p if p < 50.0 => IlluminationBand::HalfIlluminated,
            p if p < 75.0 => IlluminationBand::MoreThanHalfIlluminated,
            p if p < 99.0 => IlluminationBand::AlmostFull,
            _ => IlluminationBand::FullyIlluminated,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IlluminationBand::VirtuallyDark => "Virtually Dark",
            IlluminationBand::BarelyVisible => "Barely Visible",
            IlluminationBand::ThinCrescent => "Thin Crescent",
            IlluminationBand::HalfIlluminated => "Half Illuminated",
            IlluminationBand::MoreThanHalfIlluminated => "More than Half Illuminated",
            IlluminationBand::AlmostFull => "Almost Full",
            IlluminationBand::FullyIlluminated => "Fully Illuminated",
        }
    }
}

impl fmt::Display for IlluminationBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_positions() {
        assert_eq!(Phase::for_cycle_position(0.0), Phase::New);
        assert_eq!(Phase::for_cycle_position(0.125), Phase::WaxingCrescent);
        assert_eq!(Phase::for_cycle_position(0.25), Phase::FirstQuarter);
        assert_eq!(Phase::for_cycle_position(0.375), Phase::WaxingGibbous);
        assert_eq!(Phase::for_cycle_position(0.5), Phase::Full);
        assert_eq!(Phase::for_cycle_position(0.625), Phase::WaningGibbous);
        assert_eq!(Phase::for_cycle_position(0.75), Phase::LastQuarter);
        assert_eq!(Phase::for_cycle_position(0.875), Phase::WaningCrescent);
    }

    #[test]
    fn test_wraparound() {
        assert_eq!(Phase::for_cycle_position(0.9999), Phase::New);
        assert_eq!(Phase::for_cycle_position(1.0), Phase::New);
    }

    #[test]
    fn test_band_edges_take_the_later_phase() {
        // An exact midpoint between anchors belongs to the upper band.
        assert_eq!(Phase::for_cycle_position(0.0625 - 1e-9), Phase::New);
        assert_eq!(Phase::for_cycle_position(0.0625), Phase::WaxingCrescent);
        assert_eq!(Phase::for_cycle_position(0.4375 - 1e-9), Phase::WaxingGibbous);
        assert_eq!(Phase::for_cycle_position(0.4375), Phase::Full);
        assert_eq!(Phase::for_cycle_position(0.9375), Phase::New);
    }

    #[test]
    fn test_total_coverage() {
        // Dense sweep: every position must land on exactly one of the
        // eight phases, with no gap at the band edges.
        for step in 0..10_000 {
            let pos = f64::from(step) / 10_000.0;
            let phase = Phase::for_cycle_position(pos);
            assert!(Phase::ALL.contains(&phase), "no phase for {pos}");
        }
    }

    #[test]
    fn test_classification_is_deterministic() {
        for step in 0..1000 {
            let pos = f64::from(step) / 1000.0;
            assert_eq!(
                Phase::for_cycle_position(pos),
                Phase::for_cycle_position(pos)
            );
        }
    }

    #[test]
    fn test_names_and_descriptions() {
        assert_eq!(Phase::Full.name(), "Full Moon");
        assert_eq!(Phase::Full.to_string(), "Full Moon");
        assert_eq!(
            Phase::WaxingGibbous.description(),
            "Waxing Gibbous (increasing to full)"
        );
        assert_eq!(Phase::New.description(), "New (totally dark)");
    }

    #[test]
    fn test_illumination_bands() {
        assert_eq!(
            IlluminationBand::for_percent(0.0),
            IlluminationBand::VirtuallyDark
        );
        assert_eq!(
            IlluminationBand::for_percent(0.99),
            IlluminationBand::VirtuallyDark
        );
        assert_eq!(
            IlluminationBand::for_percent(1.0),
            IlluminationBand::BarelyVisible
        );
        assert_eq!(
            IlluminationBand::for_percent(10.0),
            IlluminationBand::ThinCrescent
        );
        assert_eq!(
            IlluminationBand::for_percent(42.31),
            IlluminationBand::HalfIlluminated
        );
        assert_eq!(
            IlluminationBand::for_percent(74.999),
            IlluminationBand::MoreThanHalfIlluminated
        );
        assert_eq!(
            IlluminationBand::for_percent(98.999),
            IlluminationBand::AlmostFull
        );
        assert_eq!(
            IlluminationBand::for_percent(99.0),
            IlluminationBand::FullyIlluminated
        );
        assert_eq!(
            IlluminationBand::for_percent(100.0),
            IlluminationBand::FullyIlluminated
        );
    }

    #[test]
    fn test_band_labels() {
        assert_eq!(IlluminationBand::FullyIlluminated.label(), "Fully Illuminated");
        assert_eq!(
            IlluminationBand::MoreThanHalfIlluminated.to_string(),
            "More than Half Illuminated"
        );
    }
}
