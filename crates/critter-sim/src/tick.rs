//! The tick driver.
//!
//! [`Simulation`] owns the world, the request inbox and the seeded RNG. Each
//! call to [`Simulation::tick`] executes one tick in a fixed order:
//!
//! 1. leaderboard maintenance
//! 2. queued requests, grouped by [`ActionKind::ORDER`] and in arrival order
//!    within a kind (spawn actions first)
//! 3. energy, hygiene, wellness and health decline
//! 4. activity countdown
//! 5. status advisory
//!
//! Every stage applies its writes before the next one starts, so later
//! stages observe earlier ones within the same tick. With the same seed and
//! the same request script two simulations reach the same
//! [`state_hash`](Simulation::state_hash).
//!
//! # Example
//!
//! ```
//! use critter_sim::prelude::*;
//!
//! let mut sim = Simulation::new(SimConfig::default()).unwrap();
//! sim.submit("ada", Request::CreatePlayer).unwrap();
//! sim.tick();
//! sim.submit("ada", Request::CreatePet { nickname: "Manny".into() }).unwrap();
//! sim.tick();
//!
//! assert_eq!(sim.current_tick(), 2);
//! assert_eq!(sim.pet_energy("Manny").unwrap(), 100);
//! ```

use std::time::{Duration, Instant};

use critter_ecs::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use tracing::{debug, warn};

use crate::actions::{self, ActionContext, ActionError, ActionKind, Reply, Request};
use crate::bootstrap::{init_world, WorldHandles};
use crate::components::{Pet, StoreKind};
use crate::config::{ConfigError, SimConfig};
use crate::events::{EventLog, GameEvent};
use crate::inbox::{Envelope, Inbox, InboxClosed, Submitter};
use crate::queries::{self, ItemListing, PetSummary, QueryError};
use crate::snapshot;
use crate::systems::{activity, advisory, decay, leaderboard, SystemContext, SystemFn};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("world initialization failed: {0}")]
    Init(#[from] EcsError),
}

// ---------------------------------------------------------------------------
// Receipts and diagnostics
// ---------------------------------------------------------------------------

/// Outcome of one processed request.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub request_id: u64,
    pub tick: u64,
    pub persona_tag: String,
    pub kind: ActionKind,
    pub result: Result<Reply, ActionError>,
}

impl Receipt {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Timing diagnostics for the last tick.
#[derive(Debug, Clone, Default)]
pub struct TickDiagnostics {
    /// Wall-clock time per stage, in execution order.
    pub stage_times: Vec<(&'static str, Duration)>,
    pub total_time: Duration,
    pub requests_ok: usize,
    pub requests_failed: usize,
    /// Aggregate of every system command buffer applied this tick.
    pub system_writes: ApplyReport,
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

const DECLINE_SYSTEMS: [(&str, SystemFn); 4] = [
    ("energy_decline", decay::energy_decline),
    ("hygiene_decline", decay::hygiene_decline),
    ("wellness_decline", decay::wellness_decline),
    ("health_decline", decay::health_decline),
];

pub struct Simulation {
    world: World,
    handles: WorldHandles,
    config: SimConfig,
    inbox: Inbox,
    rng: Pcg64,
    events: EventLog,
    tick_counter: u64,
    last_receipts: Vec<Receipt>,
    last_diagnostics: TickDiagnostics,
}

impl Simulation {
    /// Validate `config` and build the initial world.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let (world, handles) = init_world(&config)?;
        Ok(Self {
            world,
            handles,
            rng: Pcg64::seed_from_u64(config.seed),
            config,
            inbox: Inbox::new(),
            events: EventLog::new(),
            tick_counter: 0,
            last_receipts: Vec::new(),
            last_diagnostics: TickDiagnostics::default(),
        })
    }

    /// A handle other threads can use to enqueue requests.
    pub fn submitter(&self) -> Submitter {
        self.inbox.submitter()
    }

    pub fn submit(&self, persona_tag: impl Into<String>, request: Request) -> Result<u64, InboxClosed> {
        self.inbox.submitter().submit(persona_tag, request)
    }

    /// Execute one tick and return the receipts of the requests it processed.
    pub fn tick(&mut self) -> &[Receipt] {
        let tick_start = Instant::now();
        let tick = self.tick_counter;
        let mut diagnostics = TickDiagnostics::default();

        self.run_system("leaderboard", leaderboard::rebuild_leaderboard, &mut diagnostics);

        let stage_start = Instant::now();
        let batch = self.inbox.drain();
        let receipts = self.process_requests(tick, batch);
        diagnostics.requests_ok = receipts.iter().filter(|r| r.is_ok()).count();
        diagnostics.requests_failed = receipts.len() - diagnostics.requests_ok;
        diagnostics.stage_times.push(("actions", stage_start.elapsed()));

        for (name, system) in DECLINE_SYSTEMS {
            self.run_system(name, system, &mut diagnostics);
        }
        self.run_system("activity_countdown", activity::activity_countdown, &mut diagnostics);
        self.run_system("advisory", advisory::think, &mut diagnostics);

        self.tick_counter += 1;
        diagnostics.total_time = tick_start.elapsed();
        if !receipts.is_empty() {
            debug!(
                tick,
                ok = diagnostics.requests_ok,
                failed = diagnostics.requests_failed,
                "tick processed requests"
            );
        }
        self.last_diagnostics = diagnostics;
        self.last_receipts = receipts;
        &self.last_receipts
    }

    /// Run `count` ticks; returns how many requests failed across all of them.
    pub fn run_ticks(&mut self, count: u64) -> usize {
        let mut failed = 0;
        for _ in 0..count {
            self.tick();
            failed += self.last_diagnostics.requests_failed;
        }
        failed
    }

    fn run_system(&mut self, name: &'static str, system: SystemFn, diagnostics: &mut TickDiagnostics) {
        let start = Instant::now();
        let ctx = SystemContext {
            tick: self.tick_counter,
            config: &self.config,
            handles: &self.handles,
        };
        let mut cmds = CommandBuffer::new();
        system(&ctx, &self.world, &mut cmds);
        let report = cmds.apply(&mut self.world);
        if report.failed_count > 0 {
            warn!(system = name, tick = self.tick_counter, failed = report.failed_count, "system writes failed");
        }
        diagnostics.system_writes.absorb(&report);
        diagnostics.stage_times.push((name, start.elapsed()));
    }

    fn process_requests(&mut self, tick: u64, batch: Vec<Envelope>) -> Vec<Receipt> {
        let mut receipts = Vec::with_capacity(batch.len());
        let mut ctx = ActionContext::new(
            &mut self.world,
            tick,
            &self.config,
            &self.handles,
            &mut self.rng,
            &mut self.events,
        );
        for kind in ActionKind::ORDER {
            for envelope in batch.iter().filter(|e| e.request.kind() == kind) {
                let result = actions::execute(&mut ctx, &envelope.persona_tag, &envelope.request);
                receipts.push(Receipt {
                    request_id: envelope.id,
                    tick,
                    persona_tag: envelope.persona_tag.clone(),
                    kind,
                    result,
                });
            }
        }
        receipts
    }

    // -- accessors ----------------------------------------------------------

    /// Number of ticks executed so far, which is also the number of the next
    /// tick to run.
    pub fn current_tick(&self) -> u64 {
        self.tick_counter
    }

    /// Elapsed simulated seconds, computed from the tick count to avoid drift.
    pub fn sim_time(&self) -> f64 {
        self.tick_counter as f64 * self.config.seconds_per_tick
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access for setup and tests. Mutations made here bypass
    /// the action pipeline's checks.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn handles(&self) -> &WorldHandles {
        &self.handles
    }

    pub fn last_receipts(&self) -> &[Receipt] {
        &self.last_receipts
    }

    pub fn last_diagnostics(&self) -> &TickDiagnostics {
        &self.last_diagnostics
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// BLAKE3 hex digest of the world and tick counter.
    pub fn state_hash(&self) -> Result<String, EcsError> {
        snapshot::state_hash(&self.world, self.tick_counter)
    }

    // -- queries ------------------------------------------------------------

    pub fn pet_health(&self, nickname: &str) -> Result<u32, QueryError> {
        queries::pet_health(&self.world, nickname)
    }

    pub fn pet_energy(&self, nickname: &str) -> Result<u32, QueryError> {
        queries::pet_energy(&self.world, nickname)
    }

    pub fn pets(&self) -> Result<Vec<PetSummary>, QueryError> {
        queries::pets(&self.world)
    }

    pub fn store_items(&self, kind: StoreKind) -> Result<Vec<ItemListing>, QueryError> {
        queries::store_items(&self.world, &self.handles, kind)
    }

    pub fn player_items(&self, persona_tag: &str) -> Result<Vec<ItemListing>, QueryError> {
        queries::player_items(&self.world, persona_tag)
    }

    pub fn leaderboard(&self) -> Result<Vec<Pet>, QueryError> {
        queries::leaderboard(&self.world, &self.handles)
    }

    pub fn player_exists(&self, persona_tag: &str) -> bool {
        queries::player_exists(&self.world, persona_tag)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
