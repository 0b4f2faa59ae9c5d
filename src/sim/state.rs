//! Game session state and core session rules
//!
//! The session owns every entity, the RNG, the clock and the pending
//! deferred actions. Nothing outlives the session that created it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, AsteroidSize};
use super::bullet::Bullet;
use super::particle::ParticleSystem;
use super::physics::Arena;
use super::saucer::{Saucer, SaucerKind, Target};
use super::schedule::{DeferredAction, Schedule};
use super::ship::Ship;
use crate::consts::*;
use crate::error::Result;
use crate::settings::Settings;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended; start begins a new one
    GameOver,
}

/// Named sound triggers for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEvent {
    Shoot,
    Explosion,
    Thrust,
    SaucerShoot,
    ExtraLife,
}

impl SoundEvent {
    pub fn name(self) -> &'static str {
        match self {
            SoundEvent::Shoot => "shoot",
            SoundEvent::Explosion => "explosion",
            SoundEvent::Thrust => "thrust",
            SoundEvent::SaucerShoot => "ufoShoot",
            SoundEvent::ExtraLife => "extraLife",
        }
    }
}

/// Things that happened during a frame, drained by the driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundEvent),
    GameStarted,
    ShipDestroyed { pos: Vec2 },
    ShipRespawned,
    AsteroidDestroyed { size: AsteroidSize, points: u64 },
    SaucerDestroyed { kind: SaucerKind, points: u64 },
    SaucerSpawned { kind: SaucerKind },
    ExtraLife { lives: u32 },
    /// Field cleared; `wave` is the number of the wave that follows
    WaveCleared { wave: u32 },
    WaveSpawned { wave: u32, asteroids: usize },
    GameOver { score: u64 },
}

/// Counters and flags for the UI collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub wave: u32,
    pub phase: GamePhase,
    pub show_menu: bool,
    pub show_game_over: bool,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub arena: Arena,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// Current wave (1-based)
    pub wave: u32,
    /// Score at which the next bonus life is granted
    pub next_extra_life: u64,
    /// Session clock (ms), advanced by every tick
    pub elapsed_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Bumped on every game start; deferred actions from older runs are dropped
    pub generation: u64,
    /// Player ship; `None` while a loss is being resolved
    pub ship: Option<Ship>,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    pub saucers: Vec<Saucer>,
    pub saucer_bullets: Vec<Bullet>,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    /// ms accumulated towards the next saucer
    pub saucer_spawn_timer: f32,
    pub last_shot_ms: Option<f64>,
    pub last_hyperspace_ms: Option<f64>,
    /// A cleared field is waiting for its next wave
    pub wave_pending: bool,
    pub schedule: Schedule,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session in the menu phase with default settings
    pub fn new(seed: u64) -> Self {
        Self::build(&Settings::seeded(seed))
    }

    /// Create a session from host settings, rejecting arenas the game
    /// cannot run in
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::build(settings))
    }

    fn build(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena: Arena::new(settings.width, settings.height),
            phase: GamePhase::Menu,
            score: 0,
            lives: STARTING_LIVES,
            wave: 1,
            next_extra_life: EXTRA_LIFE_SCORE,
            elapsed_ms: 0.0,
            time_ticks: 0,
            generation: 0,
            ship: None,
            asteroids: Vec::new(),
            bullets: Vec::new(),
            saucers: Vec::new(),
            saucer_bullets: Vec::new(),
            particles: ParticleSystem::new(settings.max_particles()),
            saucer_spawn_timer: 0.0,
            last_shot_ms: None,
            last_hyperspace_ms: None,
            wave_pending: false,
            schedule: Schedule::new(),
            events: Vec::new(),
        }
    }

    /// Reset counters and the world, then spawn the ship and wave 1
    pub fn start_game(&mut self) {
        self.generation += 1;
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.wave = 1;
        self.next_extra_life = EXTRA_LIFE_SCORE;
        self.saucer_spawn_timer = 0.0;
        self.wave_pending = false;
        self.last_shot_ms = None;
        self.last_hyperspace_ms = None;

        self.ship = Some(Ship::new(self.arena.center()));
        self.asteroids.clear();
        self.bullets.clear();
        self.saucers.clear();
        self.saucer_bullets.clear();
        self.particles.clear();

        log::info!("Game started (generation {}, seed {})", self.generation, self.seed);
        self.events.push(GameEvent::GameStarted);
        self.spawn_wave();
    }

    /// Populate the field for the current wave: min(4 + wave, 12) large rocks
    pub fn spawn_wave(&mut self) {
        let count = (BASE_WAVE_ASTEROIDS + self.wave).min(MAX_WAVE_ASTEROIDS) as usize;
        for _ in 0..count {
            let asteroid = Asteroid::spawn_random(self.arena, &mut self.rng);
            self.asteroids.push(asteroid);
        }
        log::info!("Wave {}: {} asteroids", self.wave, count);
        self.events.push(GameEvent::WaveSpawned {
            wave: self.wave,
            asteroids: count,
        });
    }

    /// Add points, granting a life for every threshold crossed
    pub fn add_score(&mut self, points: u64) {
        self.score += points;

        while self.score >= self.next_extra_life {
            self.lives += 1;
            self.next_extra_life += EXTRA_LIFE_SCORE;
            log::info!("Extra life at {} points ({} lives)", self.score, self.lives);
            self.events.push(GameEvent::ExtraLife { lives: self.lives });
            self.events.push(GameEvent::Sound(SoundEvent::ExtraLife));
        }
    }

    /// Blow up the ship and queue the respawn-or-game-over decision
    pub fn destroy_ship(&mut self) {
        let Some(ship) = self.ship.take() else {
            return;
        };
        let pos = ship.body.pos;

        self.particles
            .create_explosion(pos, COLOR_WHITE, 15, &mut self.rng);
        self.events.push(GameEvent::Sound(SoundEvent::Explosion));
        self.events.push(GameEvent::ShipDestroyed { pos });

        self.lives = self.lives.saturating_sub(1);
        log::debug!("Ship destroyed at {:?}, {} lives left", pos, self.lives);

        self.schedule.schedule(
            self.elapsed_ms,
            RESPAWN_DELAY_MS,
            self.generation,
            DeferredAction::ResolveShipLoss,
        );
    }

    /// Enter the terminal phase
    pub fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        log::info!("Game over: score {}, wave {}", self.score, self.wave);
        self.events.push(GameEvent::GameOver { score: self.score });
    }

    /// Per-frame snapshot of the live ship for saucer targeting
    pub fn target(&self) -> Option<Target> {
        self.ship.as_ref().and_then(Ship::as_target)
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            lives: self.lives,
            wave: self.wave,
            phase: self.phase,
            show_menu: self.phase == GamePhase::Menu,
            show_game_over: self.phase == GamePhase::GameOver,
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_waits_in_menu() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.ship.is_none());
        assert!(state.asteroids.is_empty());
        assert!(state.hud().show_menu);
    }

    #[test]
    fn test_from_settings_rejects_cramped_arena() {
        let settings = Settings {
            width: 250.0,
            height: 250.0,
            ..Settings::seeded(8)
        };
        let err = GameState::from_settings(&settings).unwrap_err();
        assert!(matches!(err, crate::SimError::InvalidSettings { field: "width", .. }));
    }

    #[test]
    fn test_from_settings_applies_arena_and_seed() {
        let settings = Settings {
            width: 1024.0,
            height: 768.0,
            ..Settings::seeded(9)
        };
        let mut state = GameState::from_settings(&settings).unwrap();
        assert_eq!(state.seed, 9);
        assert_eq!(state.arena.center(), Vec2::new(512.0, 384.0));
        state.start_game();
        assert_eq!(state.asteroids.len(), 5);
    }

    #[test]
    fn test_start_game_spawns_ship_and_first_wave() {
        let mut state = GameState::new(2);
        state.start_game();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.wave, 1);
        assert_eq!(state.asteroids.len(), 5);
        let ship = state.ship.as_ref().unwrap();
        assert_eq!(ship.body.pos, state.arena.center());
        assert!(ship.invulnerable);
        assert!(state.events().contains(&GameEvent::GameStarted));
    }

    #[test]
    fn test_single_threshold_crossing() {
        let mut state = GameState::new(3);
        state.start_game();
        state.add_score(9_990);
        assert_eq!(state.lives, 3);
        state.add_score(20);
        assert_eq!(state.lives, 4);
        assert_eq!(state.next_extra_life, 20_000);
        let sounds = state
            .events()
            .iter()
            .filter(|e| **e == GameEvent::Sound(SoundEvent::ExtraLife))
            .count();
        assert_eq!(sounds, 1);
    }

    #[test]
    fn test_multi_threshold_crossing_in_one_call() {
        let mut state = GameState::new(4);
        state.start_game();
        state.score = 9_000;
        state.add_score(16_000);
        assert_eq!(state.score, 25_000);
        assert_eq!(state.lives, 5);
        assert_eq!(state.next_extra_life, 30_000);
    }

    #[test]
    fn test_destroy_ship_defers_resolution() {
        let mut state = GameState::new(5);
        state.start_game();
        state.destroy_ship();
        assert!(state.ship.is_none());
        assert_eq!(state.lives, 2);
        assert!(state.schedule.is_pending(DeferredAction::ResolveShipLoss));
        assert!(!state.particles.is_empty());

        // Destroying an absent ship is a no-op
        state.destroy_ship();
        assert_eq!(state.lives, 2);
        assert_eq!(state.schedule.len(), 1);
    }

    #[test]
    fn test_wave_size_caps_at_twelve() {
        let mut state = GameState::new(6);
        state.start_game();
        state.asteroids.clear();
        state.wave = 20;
        state.spawn_wave();
        assert_eq!(state.asteroids.len(), 12);
    }

    #[test]
    fn test_sound_names() {
        assert_eq!(SoundEvent::SaucerShoot.name(), "ufoShoot");
        assert_eq!(SoundEvent::ExtraLife.name(), "extraLife");
    }

    #[test]
    fn test_drain_empties_events() {
        let mut state = GameState::new(7);
        state.start_game();
        assert!(!state.drain_events().is_empty());
        assert!(state.events().is_empty());
    }
}
