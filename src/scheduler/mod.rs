pub mod availability;
mod generator;
mod memory;
pub mod packer;
mod types;

pub use generator::{generate, Generation};
pub use memory::PairingMemory;
pub use packer::{pack, pack_pool, Packing};
pub use types::{GenerateOptions, MemoryPolicy, PackingPolicy, SchedError};

use crate::model::WeekSchedule;
use crate::plan::Plan;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Scheduler : détient le plan, la mémoire des binômes et la source
/// aléatoire, et adopte la mémoire produite par chaque génération.
#[derive(Debug)]
pub struct Scheduler {
    plan: Plan,
    memory: PairingMemory,
    rng: StdRng,
}

impl Scheduler {
    /// Source aléatoire initialisée par le système.
    pub fn new(plan: Plan) -> Self {
        Self {
            plan,
            memory: PairingMemory::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Source aléatoire reproductible.
    pub fn with_seed(plan: Plan, seed: u64) -> Self {
        Self {
            plan,
            memory: PairingMemory::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }
    pub fn plan_mut(&mut self) -> &mut Plan {
        &mut self.plan
    }

    pub fn memory(&self) -> &PairingMemory {
        &self.memory
    }

    pub fn reset_memory(&mut self) {
        self.memory.clear();
    }

    /// Génère une semaine avec les options du plan et adopte la nouvelle
    /// mémoire.
    pub fn generate_week(&mut self, week_start: Option<NaiveDate>) -> WeekSchedule {
        let Generation {
            mut schedule,
            memory,
        } = generate(
            &self.plan.roster,
            &self.plan.targets,
            &self.memory,
            self.plan.options,
            &mut self.rng,
        );
        schedule.week_start = week_start;
        self.memory = memory;
        schedule
    }
}
