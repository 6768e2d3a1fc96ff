use crate::model::{Day, WorkerId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Mémoire des binômes entre deux générations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemoryPolicy {
    /// Seule la dernière génération compte : chaque jour est remplacé en bloc.
    #[default]
    LastGeneration,
    /// Les binômes s'accumulent d'une génération à l'autre.
    Accumulate,
}

/// Comportement quand un membre tiré n'a plus de partenaire inédit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackingPolicy {
    /// Arrête la constitution des binômes pour la journée.
    #[default]
    FailFast,
    /// Met le membre de côté et continue avec les autres.
    BestEffort,
}

impl FromStr for MemoryPolicy {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last" | "last-generation" => Ok(Self::LastGeneration),
            "accumulate" | "all" => Ok(Self::Accumulate),
            other => Err(SchedError::UnknownPolicy(other.to_string())),
        }
    }
}

impl FromStr for PackingPolicy {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-fast" | "strict" => Ok(Self::FailFast),
            "best-effort" => Ok(Self::BestEffort),
            other => Err(SchedError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Options de génération
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    #[serde(default)]
    pub memory_policy: MemoryPolicy,
    #[serde(default)]
    pub packing_policy: PackingPolicy,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid day index: {0} (expected 0..=6)")]
    InvalidDay(u8),
    #[error("invalid target for {day}: {count} (must be at least 1)")]
    InvalidTarget { day: Day, count: u32 },
    #[error("invalid rest day count: {0} (expected at most 7)")]
    InvalidRestDayCount(usize),
    #[error("duplicate worker id: {0}")]
    DuplicateWorker(WorkerId),
    #[error("unknown worker: {0}")]
    UnknownWorker(WorkerId),
    #[error("worker {0} has an empty name")]
    EmptyName(WorkerId),
    #[error("unknown policy: {0}")]
    UnknownPolicy(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
