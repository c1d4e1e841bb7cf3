//! Spin renderer
//!
//! Drives a [`SpinSurface`] through one timed transition that ends with the
//! winner centred in the viewport.

mod easing;
mod surface;

pub use easing::CubicBezier;
pub use surface::{MemorySurface, SpinSurface};

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use crate::config::Settings;
use crate::draw::DrawPlan;
use crate::error::Result;
use crate::models::Participant;

/// Offset that puts entry `target_index` in the middle of the viewport
pub fn final_offset(target_index: usize, row_height: f64, viewport_height: f64) -> f64 {
    let highlight = (viewport_height - row_height) / 2.0;
    -(target_index as f64 * row_height) + highlight
}

/// Timing of the spin transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinParams {
    pub duration: Duration,
    pub frame_interval: Duration,
    pub easing: CubicBezier,
}

impl Default for SpinParams {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for SpinParams {
    fn from(settings: &Settings) -> Self {
        Self {
            duration: settings.spin_duration(),
            frame_interval: settings.frame_interval(),
            easing: CubicBezier::SPIN,
        }
    }
}

/// What the surface ended up showing
#[derive(Debug, Clone)]
pub struct SpinOutcome {
    pub winner: Participant,
    pub target_index: usize,
    /// Offset where the surface came to rest, after correction
    pub final_offset: f64,
    /// Drift removed by the last re-centring step
    pub correction: f64,
    pub frames: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Spinner {
    params: SpinParams,
}

impl Spinner {
    pub fn new(params: SpinParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SpinParams {
        &self.params
    }

    /// Scroll `surface` through the plan and stop on the winner.
    ///
    /// Runs until the transition completes; dropping the future stops the
    /// animation wherever it is.
    pub async fn spin<S: SpinSurface + ?Sized>(
        &self,
        surface: &mut S,
        plan: &DrawPlan,
    ) -> Result<SpinOutcome> {
        surface.load(&plan.sequence)?;
        surface.set_offset(0.0)?;

        let target = final_offset(
            plan.target_index,
            surface.row_height(),
            surface.viewport_height(),
        );
        let total = self.params.duration.as_secs_f64();

        tracing::debug!(
            target_index = plan.target_index,
            target_offset = target,
            duration_ms = self.params.duration.as_millis() as u64,
            "Spin started"
        );

        let start = Instant::now();
        let mut ticker = tokio::time::interval(self.params.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut frames = 0;

        loop {
            ticker.tick().await;
            let progress = if total > 0.0 {
                (start.elapsed().as_secs_f64() / total).min(1.0)
            } else {
                1.0
            };

            surface.set_offset(target * self.params.easing.ease(progress))?;
            frames += 1;

            if progress >= 1.0 {
                break;
            }
        }

        // Layout can drift from the nominal row height; measure and re-centre.
        let correction = match surface.entry_center(plan.target_index) {
            Some(center) => {
                let delta = surface.viewport_height() / 2.0 - center;
                if delta.abs() > f64::EPSILON {
                    surface.set_offset(surface.offset() + delta)?;
                }
                delta
            }
            None => {
                tracing::warn!(
                    target_index = plan.target_index,
                    "Winner entry not found on surface, skipping re-centre"
                );
                0.0
            }
        };

        tracing::debug!(frames, correction, "Spin finished");

        Ok(SpinOutcome {
            winner: plan.winner.clone(),
            target_index: plan.target_index,
            final_offset: surface.offset(),
            correction,
            frames,
        })
    }
}
