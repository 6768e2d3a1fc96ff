use crate::model::{Day, DayTargets, Roster, DAYS_PER_WEEK};
use crate::scheduler::{availability, GenerateOptions, SchedError};
use crate::week;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Configuration complète d'un planning : équipe, repos, effectifs, semaine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub roster: Roster,
    #[serde(default)]
    pub targets: DayTargets,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_start: Option<NaiveDate>,
    #[serde(default)]
    pub options: GenerateOptions,
}

/// Jour où les disponibles ne suffisent pas à atteindre l'effectif.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Understaffed {
    pub day: Day,
    pub eligible: usize,
    pub target: u32,
}

impl Plan {
    /// Plan de `workers` membres par défaut, même effectif tous les jours.
    pub fn with_size(workers: usize, target: u32) -> Self {
        let mut targets = DayTargets::uniform(target);
        targets.clamp_to(workers);
        Self {
            roster: Roster::with_size(workers),
            targets,
            week_start: None,
            options: GenerateOptions::default(),
        }
    }

    /// Redimensionne le roster et replafonne les effectifs.
    pub fn resize(&mut self, workers: usize) {
        self.roster.resize(workers);
        self.targets.clamp_to(workers);
    }

    /// Fixe la semaine à partir de n'importe quelle date (ramenée au lundi).
    pub fn select_week(&mut self, date: NaiveDate) -> NaiveDate {
        let start = week::week_start(date);
        self.week_start = Some(start);
        start
    }

    /// Validation en entrée : le moteur de génération suppose un plan valide.
    pub fn validate(&self) -> Result<(), SchedError> {
        let mut seen = HashSet::new();
        for worker in &self.roster.workers {
            if !seen.insert(worker.id) {
                return Err(SchedError::DuplicateWorker(worker.id));
            }
            if worker.name.trim().is_empty() {
                return Err(SchedError::EmptyName(worker.id));
            }
        }
        for (id, days) in &self.roster.rest_days {
            if !seen.contains(id) {
                return Err(SchedError::UnknownWorker(*id));
            }
            if days.len() > DAYS_PER_WEEK {
                return Err(SchedError::InvalidRestDayCount(days.len()));
            }
        }
        for (day, count) in self.targets.iter() {
            if count == 0 {
                return Err(SchedError::InvalidTarget { day, count });
            }
        }
        Ok(())
    }

    /// Jours où le nombre de disponibles est inférieur à l'effectif voulu.
    pub fn understaffed(&self) -> Vec<Understaffed> {
        self.targets
            .iter()
            .filter_map(|(day, target)| {
                let eligible = availability::eligible(day, &self.roster).len();
                let short = u32::try_from(eligible).map_or(false, |n| n < target);
                short.then_some(Understaffed {
                    day,
                    eligible,
                    target,
                })
            })
            .collect()
    }
}

pub fn load_plan_from_file<P: AsRef<Path>>(path: P) -> Result<Plan> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading plan {}", path.display()))?;
    let plan: Plan = serde_json::from_slice(&data)
        .with_context(|| format!("parsing plan {}", path.display()))?;
    plan.validate()?;
    Ok(plan)
}
