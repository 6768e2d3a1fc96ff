#![forbid(unsafe_code)]
//! Binome — répartition hebdomadaire d'une équipe en binômes.
//!
//! - Jours de repos par membre, effectif souhaité par jour.
//! - Tirage aléatoire (injectable), binômes formés en un seul passage.
//! - Un binôme de la génération précédente n'est pas reformé le même jour.
//! - Le moteur est pur : il reçoit l'état complet et retourne la nouvelle
//!   mémoire des binômes, sans E/S.

pub mod io;
pub mod model;
pub mod plan;
pub mod report;
pub mod scheduler;
pub mod storage;
pub mod week;

pub use model::{
    Day, DaySchedule, DayTargets, PairKey, Roster, ScheduleId, ShiftGroup, WeekSchedule, Worker,
    WorkerId,
};
pub use plan::{load_plan_from_file, Plan, Understaffed};
pub use report::{render_workload, workload, ScheduleRenderer, TextSummary, Workload};
pub use scheduler::{
    generate, pack, pack_pool, GenerateOptions, Generation, MemoryPolicy, PackingPolicy, Packing,
    PairingMemory, SchedError, Scheduler,
};
pub use storage::{JsonStorage, Storage};
