//! Jump game engine
//!
//! Owns the session, drives the charge and flight phases from a single
//! virtual clock (`advance`) and pushes every visual change to the map host.
//!
//! Phase flow:
//! `Idle -> Spawned -> Charging -> Flying -> Spawned | GameOver`

use glam::{DVec2, DVec3};
use rand_pcg::Pcg32;

use crate::error::{GameError, Result};
use crate::host::{CameraView, MapHost};
use crate::settings::GameOptions;
use crate::sim::{
    Charge, EntityId, Flight, FlightStep, GameEvent, GamePhase, JumpDirection, Landing, Platform,
    RngState, Session, next_target_pos, random_color, random_gap,
};

/// Low-level pointer input delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press,
    Release,
}

pub struct JumpGame<H: MapHost> {
    host: H,
    options: GameOptions,
    rng: Pcg32,
    session: Session,
    /// Stable for the lifetime of the engine
    marker_id: EntityId,
    next_id: u32,
    input_attached: bool,
    events: Vec<GameEvent>,
    clock_ms: u64,
}

impl<H: MapHost> JumpGame<H> {
    /// Create an engine; fails fast on invalid options
    pub fn new(host: H, options: GameOptions, seed: u64) -> Result<Self> {
        options.validate()?;
        log::info!("Game initialized with seed: {}", seed);
        Ok(Self {
            host,
            options,
            rng: RngState::new(seed).to_rng(),
            session: Session::default(),
            marker_id: EntityId(1),
            next_id: 2,
            input_attached: false,
            events: Vec::new(),
            clock_ms: 0,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn marker_id(&self) -> EntityId {
        self.marker_id
    }

    pub fn source(&self) -> Option<&Platform> {
        self.session.source.as_ref()
    }

    pub fn target(&self) -> Option<&Platform> {
        self.session.target.as_ref()
    }

    pub fn direction(&self) -> JumpDirection {
        self.session.direction
    }

    /// Current charge speed
    pub fn speed(&self) -> f64 {
        self.session.speed
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn input_attached(&self) -> bool {
        self.input_attached
    }

    /// Take all lifecycle events fired since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Place the first platform pair, attach input and fire `GameStart`
    pub fn start_game(&mut self) -> Result<()> {
        if self.session.phase != GamePhase::Idle {
            return Err(GameError::OutOfPhase {
                op: "start_game",
                phase: self.session.phase,
            });
        }

        self.bootstrap();
        self.spawn_next_target()?;
        self.attach_input();
        self.events.push(GameEvent::GameStart);
        log::info!("Game started at {:?}", self.options.start_lon_lat);
        Ok(())
    }

    /// Clear the board from any phase and start again
    pub fn reset_game(&mut self) -> Result<()> {
        self.detach_input();
        // Dropping the session drops any live charge or flight timer
        self.session.clear();
        self.host.clear_entities();
        log::info!("Game reset");
        self.start_game()
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::Press => self.press(),
            InputEvent::Release => self.release(),
        }
    }

    /// Begin charging: speed resets to the base value
    pub fn press(&mut self) -> Result<()> {
        self.require_input("press", GamePhase::Spawned)?;
        self.session.speed = self.options.start_speed;
        self.session.charge = Some(Charge::new(self.options.charge_interval_ms));
        self.session.phase = GamePhase::Charging;
        log::debug!("Charging from speed {}", self.session.speed);
        Ok(())
    }

    /// Stop charging, restore the source height and launch the marker
    pub fn release(&mut self) -> Result<()> {
        self.require_input("release", GamePhase::Charging)?;
        let ticks = self.session.charge.take().map(|c| c.ticks).unwrap_or_default();

        let (source, target) = self.platform_pair("release")?;
        let source_pos = source.pos;
        let target_pos = target.pos;
        let source_id = source.id;

        let height = self.options.box_size.height;
        if let Some(source) = self.session.source.as_mut() {
            source.height = height;
        }
        self.host.set_platform_height(source_id, height);

        self.session.flight = Some(Flight::begin(
            source_pos,
            target_pos,
            self.session.direction,
            self.session.speed,
            &self.options,
        ));
        self.session.phase = GamePhase::Flying;
        log::debug!(
            "Released after {} charge ticks, speed {}",
            ticks,
            self.session.speed
        );
        Ok(())
    }

    /// Advance the game clock by `dt_ms`, running whichever timer is live
    ///
    /// Returns the landing on the tick where a flight resolves; a flight
    /// resolves exactly once and any clock time left after it is dropped.
    pub fn advance(&mut self, dt_ms: u64) -> Result<Option<Landing>> {
        self.clock_ms = self.clock_ms.saturating_add(dt_ms);
        debug_assert!(
            !(self.session.charge.is_some() && self.session.flight.is_some()),
            "charge and flight timers both live"
        );

        match self.session.phase {
            GamePhase::Charging => {
                self.run_charge(dt_ms);
                Ok(None)
            }
            GamePhase::Flying => self.run_flight(dt_ms),
            _ => Ok(None),
        }
    }

    /// How long to hold for a dead-center landing on the current target
    pub fn ideal_hold_ms(&self) -> Option<u64> {
        let source = self.session.source.as_ref()?;
        let target = self.session.target.as_ref()?;
        let direction = self.session.direction;
        let gap = direction.along(target.pos) - direction.along(source.pos);
        let ticks = ((gap - self.options.start_speed) / self.options.speed_increment)
            .round()
            .max(0.0) as u64;
        Some(ticks * self.options.charge_interval_ms)
    }

    fn run_charge(&mut self, dt_ms: u64) {
        let Session {
            charge,
            speed,
            source,
            ..
        } = &mut self.session;
        let (Some(charge), Some(source)) = (charge.as_mut(), source.as_mut()) else {
            return;
        };

        charge.timer.feed(dt_ms);
        while charge.timer.take_tick() {
            charge.step(speed, source, &self.options);
            self.host.set_platform_height(source.id, source.height);
        }
    }

    fn run_flight(&mut self, dt_ms: u64) -> Result<Option<Landing>> {
        let Some(source_pos) = self.session.source.as_ref().map(|s| s.pos) else {
            return Err(GameError::OutOfPhase {
                op: "advance",
                phase: self.session.phase,
            });
        };
        if let Some(flight) = self.session.flight.as_mut() {
            flight.timer.feed(dt_ms);
        }

        loop {
            let Some(flight) = self.session.flight.as_mut() else {
                return Ok(None);
            };
            if !flight.timer.take_tick() {
                return Ok(None);
            }
            match flight.step(source_pos, &self.options) {
                FlightStep::Airborne { pos } => self.render_marker(pos),
                FlightStep::Landed { pos, landing } => {
                    self.session.flight = None;
                    self.render_marker(pos);
                    self.resolve(landing)?;
                    return Ok(Some(landing));
                }
            }
        }
    }

    fn resolve(&mut self, landing: Landing) -> Result<()> {
        match landing {
            Landing::Hit { end } => {
                let direction = self.session.direction;
                if let Some(target) = self.session.target.as_mut() {
                    target.pos = direction.with_along(target.pos, end);
                }
                self.session.score += 1;
                log::info!("Landed at {} (score {})", end, self.session.score);
                self.spawn_next_target()
            }
            Landing::Miss { end, true_end } => {
                self.session.phase = GamePhase::GameOver;
                self.detach_input();
                self.events.push(GameEvent::GameOver);
                self.host.fly_to_all(CameraView {
                    heading_deg: 0.0,
                    pitch_deg: self.options.camera.game_over_pitch_deg,
                    duration_secs: None,
                });
                log::info!(
                    "Game over: landed at {} but target was {} (score {})",
                    end,
                    true_end,
                    self.session.score
                );
                Ok(())
            }
        }
    }

    /// Degenerate first pair: source and target share the start platform
    fn bootstrap(&mut self) {
        let start = DVec2::from_array(self.options.start_lon_lat);
        let platform = self.create_platform(start);
        self.session.source = Some(platform.clone());
        self.session.target = Some(platform);
        self.render_marker(start.extend(self.options.box_size.height));
    }

    /// Promote the target to source and place a fresh target
    fn spawn_next_target(&mut self) -> Result<()> {
        let Some(source) = self.session.target.take() else {
            return Err(GameError::OutOfPhase {
                op: "spawn_next_target",
                phase: self.session.phase,
            });
        };
        // The first pair shares one entity; later sources are retired
        match self.session.source.take() {
            Some(old) if old.id != source.id => self.host.remove_entity(old.id),
            _ => {}
        }

        let direction = JumpDirection::random(&mut self.rng);
        let gap = random_gap(&mut self.rng, &self.options);
        let target = self.create_platform(next_target_pos(source.pos, direction, gap));

        self.host.fly_to(
            &[source.id, target.id],
            CameraView {
                heading_deg: direction.camera_heading_deg(),
                pitch_deg: self.options.camera.pitch_deg,
                duration_secs: Some(self.options.camera.duration_secs),
            },
        );
        log::debug!(
            "Next platform {:?} at {:?}, gap {} {:?}",
            target.id,
            target.pos,
            gap,
            direction
        );

        self.session.source = Some(source);
        self.session.target = Some(target);
        self.session.direction = direction;
        self.session.phase = GamePhase::Spawned;
        Ok(())
    }

    fn create_platform(&mut self, pos: DVec2) -> Platform {
        let id = self.next_entity_id();
        let platform = Platform {
            id,
            pos,
            height: self.options.box_size.height,
            color: random_color(&mut self.rng),
        };
        self.host.add_platform(
            id,
            platform.footprint(self.options.box_size.width_half),
            platform.height,
            &self.options.platform_style,
            platform.color,
        );
        platform
    }

    /// Replace the marker instance; never mutated in place
    fn render_marker(&mut self, pos: DVec3) {
        if self.host.has_entity(self.marker_id) {
            self.host.remove_entity(self.marker_id);
        }
        self.host
            .add_marker(self.marker_id, pos, &self.options.marker_style);
    }

    fn platform_pair(&self, op: &'static str) -> Result<(&Platform, &Platform)> {
        match (self.session.source.as_ref(), self.session.target.as_ref()) {
            (Some(source), Some(target)) => Ok((source, target)),
            _ => Err(GameError::OutOfPhase {
                op,
                phase: self.session.phase,
            }),
        }
    }

    fn require_input(&self, op: &'static str, phase: GamePhase) -> Result<()> {
        if !self.input_attached {
            return Err(GameError::InputDetached);
        }
        if self.session.phase != phase {
            return Err(GameError::OutOfPhase {
                op,
                phase: self.session.phase,
            });
        }
        Ok(())
    }

    fn attach_input(&mut self) {
        if !self.input_attached {
            self.input_attached = true;
            self.host.attach_input();
        }
    }

    fn detach_input(&mut self) {
        if self.input_attached {
            self.input_attached = false;
            self.host.detach_input();
        }
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }
}
