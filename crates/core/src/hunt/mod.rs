//! Hunt session rules: target placement, proximity, found transitions.

pub mod heat;
pub mod position;
pub mod score;

use rand::Rng;
use tracing::{debug, info};

use crate::geo::{self, Coordinate, GeoError};
use self::heat::Heat;

/// Session-unique identifier for a placed target. Pairs with the verified
/// player id to deduplicate find events before they reach the score store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetId(u64);

impl TargetId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Tunables for a hunt round. The defaults follow the original game: a
/// target hidden within 100 m of the first fix, found below 5 m, heat
/// bottoming out at 20 m.
#[derive(Clone, Copy, Debug)]
pub struct HuntConfig {
    /// Radius of the disc the target is hidden in, meters.
    pub target_radius_m: f64,
    /// Distance below which the target counts as found, meters.
    pub found_threshold_m: f64,
    /// Distance at which the heat indicator reads fully cold, meters.
    pub heat_scale_m: f64,
}

impl Default for HuntConfig {
    fn default() -> Self {
        HuntConfig {
            target_radius_m: 100.0,
            found_threshold_m: 5.0,
            heat_scale_m: 20.0,
        }
    }
}

/// Where a session is in its round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HuntPhase {
    /// No position fix seen yet; no target exists.
    AwaitingFix,
    Searching,
    Found,
}

/// Result of feeding one position fix into the session.
#[derive(Clone, Copy, Debug)]
pub struct FixOutcome {
    pub target: TargetId,
    pub distance_m: f64,
    pub heat: Heat,
    /// True exactly once, on the fix that crossed the found threshold.
    pub just_found: bool,
}

/// One player's hunt round.
///
/// The session holds only the sampled target and the phase; each fix is
/// an independent computation, so a caller retrying after an upstream
/// position error corrupts nothing.
pub struct HuntSession {
    config: HuntConfig,
    phase: HuntPhase,
    target: Option<(TargetId, Coordinate)>,
    next_target: u64,
}

impl HuntSession {
    pub fn new(config: HuntConfig) -> Result<Self, GeoError> {
        for radius in [
            config.target_radius_m,
            config.found_threshold_m,
            config.heat_scale_m,
        ] {
            if radius <= 0.0 || radius.is_nan() {
                return Err(GeoError::InvalidRadius(radius));
            }
        }

        Ok(HuntSession {
            config,
            phase: HuntPhase::AwaitingFix,
            target: None,
            next_target: 0,
        })
    }

    pub fn phase(&self) -> HuntPhase {
        self.phase
    }

    pub fn config(&self) -> &HuntConfig {
        &self.config
    }

    /// The current target, if one has been placed. Exposed so the app can
    /// drop a marker once the round ends.
    pub fn target(&self) -> Option<(TargetId, Coordinate)> {
        self.target
    }

    /// Feed one position fix, using the process-wide RNG if a target
    /// still needs to be placed.
    pub fn record_fix(&mut self, fix: Coordinate) -> Result<FixOutcome, GeoError> {
        self.record_fix_with(fix, &mut rand::rng())
    }

    /// As [`record_fix`](Self::record_fix) with a caller-supplied RNG.
    pub fn record_fix_with<R: Rng + ?Sized>(
        &mut self,
        fix: Coordinate,
        rng: &mut R,
    ) -> Result<FixOutcome, GeoError> {
        let (id, target) = match self.target {
            Some(placed) => placed,
            None => {
                // First fix of the round hides the target nearby.
                let target =
                    geo::sample_point_in_disc_with(fix, self.config.target_radius_m, rng)?;
                let id = TargetId(self.next_target);
                self.next_target += 1;
                self.target = Some((id, target));
                self.phase = HuntPhase::Searching;
                info!(target_id = id.value(), "target placed");
                (id, target)
            }
        };

        let distance_m = geo::distance_meters(fix, target);
        let heat = Heat::from_distance(distance_m, self.config.heat_scale_m);

        let just_found =
            self.phase == HuntPhase::Searching && distance_m < self.config.found_threshold_m;
        if just_found {
            self.phase = HuntPhase::Found;
            info!(target_id = id.value(), distance_m, "target found");
        } else {
            debug!(target_id = id.value(), distance_m, "position fix");
        }

        Ok(FixOutcome {
            target: id,
            distance_m,
            heat,
            just_found,
        })
    }

    /// Start a new round: drops the target; the next fix places a fresh
    /// one under a fresh [`TargetId`].
    pub fn reset(&mut self) {
        self.phase = HuntPhase::AwaitingFix;
        self.target = None;
    }
}
