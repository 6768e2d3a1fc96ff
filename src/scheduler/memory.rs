use super::MemoryPolicy;
use crate::model::{Day, PairKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

static NO_PAIRS: BTreeSet<PairKey> = BTreeSet::new();

/// Binômes déjà utilisés, par jour de la semaine.
///
/// Avec [`MemoryPolicy::LastGeneration`] chaque jour ne retient que la
/// génération précédente ; avec [`MemoryPolicy::Accumulate`] l'historique
/// complet est conservé.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairingMemory {
    days: BTreeMap<Day, BTreeSet<PairKey>>,
}

impl PairingMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binômes retenus pour `day` (vide si aucune génération encore).
    pub fn get(&self, day: Day) -> &BTreeSet<PairKey> {
        self.days.get(&day).unwrap_or(&NO_PAIRS)
    }

    pub fn contains(&self, day: Day, pair: PairKey) -> bool {
        self.get(day).contains(&pair)
    }

    /// Écrase l'entrée du jour.
    pub fn replace(&mut self, day: Day, pairs: BTreeSet<PairKey>) {
        if pairs.is_empty() {
            self.days.remove(&day);
        } else {
            self.days.insert(day, pairs);
        }
    }

    /// Ajoute des binômes à l'entrée du jour.
    pub fn merge(&mut self, day: Day, pairs: BTreeSet<PairKey>) {
        if pairs.is_empty() {
            return;
        }
        self.days.entry(day).or_default().extend(pairs);
    }

    pub fn record(&mut self, day: Day, pairs: BTreeSet<PairKey>, policy: MemoryPolicy) {
        match policy {
            MemoryPolicy::LastGeneration => self.replace(day, pairs),
            MemoryPolicy::Accumulate => self.merge(day, pairs),
        }
    }

    /// Nombre total de binômes mémorisés, tous jours confondus.
    pub fn len(&self) -> usize {
        self.days.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }
}
