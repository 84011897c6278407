//! Fixed-interval virtual timers and per-tick steps
//!
//! Both phases run off the engine's single clock: the charge timer only while
//! `Charging`, the flight timer only while `Flying`. Each tick is a pure step
//! over session state so timing is testable without real timers.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use super::arc::{JumpArc, Landing, classify_landing};
use super::state::{Charge, Flight, JumpDirection, Platform};
use crate::settings::GameOptions;

/// Repeating timer fed by the game clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub interval_ms: u64,
    accumulated_ms: u64,
}

impl Timer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            accumulated_ms: 0,
        }
    }

    /// Add elapsed clock time
    pub fn feed(&mut self, dt_ms: u64) {
        self.accumulated_ms = self.accumulated_ms.saturating_add(dt_ms);
    }

    /// Consume one interval if enough time has accumulated
    pub fn take_tick(&mut self) -> bool {
        if self.accumulated_ms >= self.interval_ms {
            self.accumulated_ms -= self.interval_ms;
            true
        } else {
            false
        }
    }
}

impl Charge {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            timer: Timer::new(interval_ms),
            ticks: 0,
        }
    }

    /// One charge tick: squash the source by a unit and speed up the jump
    pub fn step(&mut self, speed: &mut f64, source: &mut Platform, options: &GameOptions) {
        self.ticks += 1;
        *speed += options.speed_increment;
        source.height = (source.height - 1.0).max(0.0);
    }
}

/// Outcome of one flight tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightStep {
    /// Marker still in the air at `pos` (lon, lat, height)
    Airborne { pos: DVec3 },
    /// Marker came down at `pos`; emitted exactly once per flight
    Landed { pos: DVec3, landing: Landing },
}

impl Flight {
    /// Set up a flight from `source` toward `target` covering `speed` degrees
    pub fn begin(
        source: DVec2,
        target: DVec2,
        direction: JumpDirection,
        speed: f64,
        options: &GameOptions,
    ) -> Self {
        let start = direction.along(source);
        let end = start + speed;
        Self {
            timer: Timer::new(options.flight_interval_ms),
            direction,
            start,
            end,
            true_end: direction.along(target),
            current: start,
            arc: JumpArc::new(start, end, options.box_size.height),
        }
    }

    /// Advance the marker one step along the arc
    ///
    /// The landing frame is clamped to `end` at base height, so the final
    /// render never overshoots the landing point.
    pub fn step(&mut self, source: DVec2, options: &GameOptions) -> FlightStep {
        self.current += options.flight_step;

        if self.current >= self.end {
            let ground = self.direction.with_along(source, self.end);
            FlightStep::Landed {
                pos: ground.extend(self.arc.base_height),
                landing: classify_landing(self.true_end, self.end, options.box_size.width_half),
            }
        } else {
            let ground = self.direction.with_along(source, self.current);
            FlightStep::Airborne {
                pos: ground.extend(self.arc.height_at(self.current)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Color;
    use crate::sim::state::EntityId;

    fn source_platform() -> Platform {
        Platform {
            id: EntityId(1),
            pos: DVec2::new(113.1805, 23.1205),
            height: 50.0,
            color: Color::WHITE,
        }
    }

    #[test]
    fn test_timer_ticks_per_interval() {
        let mut timer = Timer::new(100);
        timer.feed(99);
        assert!(!timer.take_tick());
        timer.feed(1);
        assert!(timer.take_tick());
        assert!(!timer.take_tick());

        timer.feed(250);
        assert!(timer.take_tick());
        assert!(timer.take_tick());
        assert!(!timer.take_tick());
        timer.feed(50);
        assert!(timer.take_tick());
    }

    #[test]
    fn test_charge_speed_formula() {
        let options = GameOptions::default();
        let mut charge = Charge::new(options.charge_interval_ms);
        let mut speed = options.start_speed;
        let mut source = source_platform();
        for _ in 0..3 {
            charge.step(&mut speed, &mut source, &options);
        }
        assert_eq!(charge.ticks, 3);
        assert!((speed - (0.0001 + 0.000175 * 3.0)).abs() < 1e-12);
        assert_eq!(source.height, 47.0);
    }

    #[test]
    fn test_charge_never_squashes_below_ground() {
        let options = GameOptions::default();
        let mut charge = Charge::new(options.charge_interval_ms);
        let mut speed = options.start_speed;
        let mut source = source_platform();
        source.height = 0.5;
        charge.step(&mut speed, &mut source, &options);
        charge.step(&mut speed, &mut source, &options);
        assert_eq!(source.height, 0.0);
    }

    #[test]
    fn test_flight_lands_once_on_clamped_end() {
        let options = GameOptions::default();
        let source = DVec2::new(113.1805, 23.1205);
        let target = DVec2::new(113.1805, 23.1225);
        let speed = 0.00198;
        let mut flight = Flight::begin(source, target, JumpDirection::North, speed, &options);

        let mut airborne = 0;
        let (pos, landing) = loop {
            match flight.step(source, &options) {
                FlightStep::Airborne { pos } => {
                    assert_eq!(pos.x, source.x);
                    assert!(pos.z >= options.box_size.height);
                    airborne += 1;
                }
                FlightStep::Landed { pos, landing } => break (pos, landing),
            }
            assert!(airborne < 1000, "flight never landed");
        };

        assert!(airborne >= 38);
        assert_eq!(pos, DVec3::new(source.x, flight.end, options.box_size.height));
        assert_eq!(landing, Landing::Hit { end: flight.end });
    }

    #[test]
    fn test_flight_short_jump_misses() {
        let options = GameOptions::default();
        let source = DVec2::new(113.1805, 23.1205);
        let target = DVec2::new(113.1835, 23.1205);
        let mut flight = Flight::begin(source, target, JumpDirection::East, 0.000625, &options);
        let landing = loop {
            if let FlightStep::Landed { landing, .. } = flight.step(source, &options) {
                break landing;
            }
        };
        assert!(!landing.is_hit());
    }

    #[test]
    fn test_flight_peaks_mid_jump() {
        let options = GameOptions::default();
        let source = DVec2::new(113.1805, 23.1205);
        let target = DVec2::new(113.1825, 23.1205);
        let mut flight = Flight::begin(source, target, JumpDirection::East, 0.002, &options);
        let mut heights = Vec::new();
        while let FlightStep::Airborne { pos } = flight.step(source, &options) {
            heights.push(pos.z);
        }
        let peak = heights
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert!(peak > heights.len() / 4 && peak < heights.len() * 3 / 4);
        assert!(heights[peak] <= flight.arc.apex());
    }
}
