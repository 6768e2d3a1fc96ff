use crate::scheduler::SchedError;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Nombre de jours planifiés par génération.
pub const DAYS_PER_WEEK: usize = 7;

/// Identifiant fort pour Worker (entier, unique dans le roster)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(u32);

impl WorkerId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Jour de la semaine : 0 = lundi … 6 = dimanche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(u8);

const DAY_NAMES: [&str; DAYS_PER_WEEK] = [
    "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi", "Dimanche",
];

impl Day {
    pub const MONDAY: Day = Day(0);
    pub const SUNDAY: Day = Day(6);

    /// Valide un indice de jour (0..=6).
    pub fn new(index: u8) -> Result<Self, SchedError> {
        if usize::from(index) < DAYS_PER_WEEK {
            Ok(Self(index))
        } else {
            Err(SchedError::InvalidDay(index))
        }
    }

    /// Les 7 jours, du lundi au dimanche.
    pub fn all() -> impl Iterator<Item = Day> {
        (0..DAYS_PER_WEEK as u8).map(Day)
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    pub fn name(self) -> &'static str {
        DAY_NAMES[self.index()]
    }

    pub fn weekday(self) -> Weekday {
        match self.0 {
            0 => Weekday::Mon,
            1 => Weekday::Tue,
            2 => Weekday::Wed,
            3 => Weekday::Thu,
            4 => Weekday::Fri,
            5 => Weekday::Sat,
            _ => Weekday::Sun,
        }
    }
}

impl TryFrom<u8> for Day {
    type Error = SchedError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Day::new(index)
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> u8 {
        day.0
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        Day(weekday.num_days_from_monday() as u8)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Membre de l'équipe. Le nom est purement cosmétique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
}

impl Worker {
    pub fn new<N: Into<String>>(id: WorkerId, name: N) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Nom attribué aux membres ajoutés par un agrandissement du roster.
    pub fn default_name(id: WorkerId) -> String {
        format!("Agent {id}")
    }
}

/// Roster : membres et jours de repos de chacun.
///
/// Un membre peut avoir plusieurs fois le même jour de repos dans sa liste ;
/// les lectures (`rest_days`, `is_resting`) le traitent comme un seul jour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub workers: Vec<Worker>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rest_days: BTreeMap<WorkerId, Vec<Day>>,
}

impl Roster {
    /// Roster de `size` membres par défaut, ids `1..=size`.
    pub fn with_size(size: usize) -> Self {
        let mut roster = Self::default();
        roster.resize(size);
        roster
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = WorkerId> + '_ {
        self.workers.iter().map(|w| w.id)
    }

    pub fn find(&self, id: WorkerId) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }

    pub fn name_of(&self, id: WorkerId) -> Option<&str> {
        self.find(id).map(|w| w.name.as_str())
    }

    fn ensure_known(&self, id: WorkerId) -> Result<(), SchedError> {
        if self.find(id).is_some() {
            Ok(())
        } else {
            Err(SchedError::UnknownWorker(id))
        }
    }

    fn next_id(&self) -> WorkerId {
        WorkerId(self.ids().map(WorkerId::get).max().unwrap_or(0) + 1)
    }

    /// Ajoute un membre avec le prochain id libre.
    pub fn add_worker<N: Into<String>>(&mut self, name: N) -> WorkerId {
        let id = self.next_id();
        self.workers.push(Worker::new(id, name));
        id
    }

    /// Insère un membre existant (import) ; refuse un id déjà présent.
    pub fn insert(&mut self, worker: Worker) -> Result<(), SchedError> {
        if self.find(worker.id).is_some() {
            return Err(SchedError::DuplicateWorker(worker.id));
        }
        self.workers.push(worker);
        Ok(())
    }

    /// Ajuste la taille du roster.
    ///
    /// Agrandir ajoute des membres par défaut ; réduire retire d'abord les ids
    /// les plus élevés, avec leurs jours de repos. Les autres membres restent
    /// intacts.
    pub fn resize(&mut self, size: usize) {
        if size < self.len() {
            let mut ids: Vec<WorkerId> = self.ids().collect();
            ids.sort_unstable();
            let removed = ids.split_off(size);
            self.workers.retain(|w| !removed.contains(&w.id));
            for id in removed {
                self.rest_days.remove(&id);
            }
            return;
        }
        while self.len() < size {
            let id = self.next_id();
            self.workers.push(Worker::new(id, Worker::default_name(id)));
        }
    }

    pub fn rename<N: Into<String>>(&mut self, id: WorkerId, name: N) -> Result<(), SchedError> {
        let worker = self
            .workers
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(SchedError::UnknownWorker(id))?;
        worker.name = name.into();
        Ok(())
    }

    /// Remplace la liste des jours de repos d'un membre (0 à 7 entrées).
    pub fn set_rest_days(&mut self, id: WorkerId, days: Vec<Day>) -> Result<(), SchedError> {
        self.ensure_known(id)?;
        if days.len() > DAYS_PER_WEEK {
            return Err(SchedError::InvalidRestDayCount(days.len()));
        }
        if days.is_empty() {
            self.rest_days.remove(&id);
        } else {
            self.rest_days.insert(id, days);
        }
        Ok(())
    }

    /// Fixe l'entrée `slot` de la liste de repos ; ajoute en fin si `slot`
    /// dépasse la longueur actuelle.
    pub fn set_rest_day(&mut self, id: WorkerId, slot: usize, day: Day) -> Result<(), SchedError> {
        self.ensure_known(id)?;
        if slot >= DAYS_PER_WEEK {
            return Err(SchedError::InvalidRestDayCount(slot + 1));
        }
        let days = self.rest_days.entry(id).or_default();
        match days.get_mut(slot) {
            Some(existing) => *existing = day,
            None => days.push(day),
        }
        Ok(())
    }

    /// Réduit le nombre de jours de repos d'un membre ; `count` est ramené
    /// dans 1..=7. Retourne le nombre effectivement retenu.
    pub fn truncate_rest_days(&mut self, id: WorkerId, count: usize) -> Result<usize, SchedError> {
        self.ensure_known(id)?;
        let count = count.clamp(1, DAYS_PER_WEEK);
        if let Some(days) = self.rest_days.get_mut(&id) {
            days.truncate(count);
        }
        Ok(count)
    }

    /// Jours de repos d'un membre, triés et sans doublon.
    pub fn rest_days(&self, id: WorkerId) -> Vec<Day> {
        let mut days = self.rest_days.get(&id).cloned().unwrap_or_default();
        days.sort_unstable();
        days.dedup();
        days
    }

    pub fn is_resting(&self, id: WorkerId, day: Day) -> bool {
        self.rest_days
            .get(&id)
            .is_some_and(|days| days.contains(&day))
    }
}

/// Effectif souhaité pour chaque jour de la semaine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayTargets([u32; DAYS_PER_WEEK]);

impl Default for DayTargets {
    fn default() -> Self {
        Self::uniform(4)
    }
}

impl DayTargets {
    pub fn uniform(count: u32) -> Self {
        Self([count; DAYS_PER_WEEK])
    }

    pub fn get(&self, day: Day) -> u32 {
        self.0[day.index()]
    }

    /// Fixe l'effectif d'un jour, plafonné à la taille du roster.
    /// Retourne la valeur retenue.
    pub fn set(&mut self, day: Day, count: u32, roster_size: usize) -> Result<u32, SchedError> {
        if count == 0 {
            return Err(SchedError::InvalidTarget { day, count });
        }
        let count = count.min(ceiling(roster_size));
        self.0[day.index()] = count;
        Ok(count)
    }

    /// Ramène tous les effectifs sous la taille du roster (après un resize).
    pub fn clamp_to(&mut self, roster_size: usize) {
        let max = ceiling(roster_size);
        for count in self.0.iter_mut() {
            *count = (*count).min(max);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, u32)> + '_ {
        Day::all().map(move |day| (day, self.get(day)))
    }
}

fn ceiling(roster_size: usize) -> u32 {
    u32::try_from(roster_size).unwrap_or(u32::MAX).max(1)
}

/// Paire non ordonnée de membres : `(a, b)` et `(b, a)` donnent la même clé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(WorkerId, WorkerId)", into = "(WorkerId, WorkerId)")]
pub struct PairKey {
    low: WorkerId,
    high: WorkerId,
}

impl PairKey {
    pub fn new(a: WorkerId, b: WorkerId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn members(self) -> (WorkerId, WorkerId) {
        (self.low, self.high)
    }

    pub fn contains(self, id: WorkerId) -> bool {
        self.low == id || self.high == id
    }
}

impl From<(WorkerId, WorkerId)> for PairKey {
    fn from((a, b): (WorkerId, WorkerId)) -> Self {
        PairKey::new(a, b)
    }
}

impl From<PairKey> for (WorkerId, WorkerId) {
    fn from(pair: PairKey) -> Self {
        pair.members()
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Équipe d'un jour : un binôme, ou un membre seul.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftGroup {
    workers: Vec<WorkerId>,
    solo: bool,
}

impl ShiftGroup {
    pub fn pair(a: WorkerId, b: WorkerId) -> Self {
        Self {
            workers: vec![a, b],
            solo: false,
        }
    }

    pub fn solo(id: WorkerId) -> Self {
        Self {
            workers: vec![id],
            solo: true,
        }
    }

    pub fn workers(&self) -> &[WorkerId] {
        &self.workers
    }

    pub fn is_solo(&self) -> bool {
        self.solo
    }

    pub fn contains(&self, id: WorkerId) -> bool {
        self.workers.contains(&id)
    }

    pub fn pair_key(&self) -> Option<PairKey> {
        match self.workers.as_slice() {
            [a, b] => Some(PairKey::new(*a, *b)),
            _ => None,
        }
    }
}

/// Planning d'un jour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: Day,
    pub target: u32,
    pub groups: Vec<ShiftGroup>,
    /// Membres disponibles mais non placés ce jour-là (hors repos).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unassigned: Vec<WorkerId>,
}

impl DaySchedule {
    pub fn empty(day: Day, target: u32) -> Self {
        Self {
            day,
            target,
            groups: Vec::new(),
            unassigned: Vec::new(),
        }
    }

    pub fn assigned(&self) -> impl Iterator<Item = WorkerId> + '_ {
        self.groups.iter().flat_map(|g| g.workers().iter().copied())
    }

    pub fn assigned_count(&self) -> usize {
        self.groups.iter().map(|g| g.workers().len()).sum()
    }

    pub fn contains(&self, id: WorkerId) -> bool {
        self.groups.iter().any(|g| g.contains(id))
    }

    /// Écart entre l'effectif souhaité et l'effectif placé.
    pub fn shortfall(&self) -> u32 {
        let assigned = u32::try_from(self.assigned_count()).unwrap_or(u32::MAX);
        self.target.saturating_sub(assigned)
    }
}

/// Identifiant fort d'une génération de planning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleId(Uuid);

impl ScheduleId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Planning complet d'une semaine, recréé à chaque génération.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule {
    pub id: ScheduleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_start: Option<NaiveDate>,
    pub days: Vec<DaySchedule>,
}

impl WeekSchedule {
    pub fn new(days: Vec<DaySchedule>) -> Self {
        Self {
            id: ScheduleId::random(),
            week_start: None,
            days,
        }
    }

    pub fn day(&self, day: Day) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.day == day)
    }

    /// Nombre de jours où `id` figure dans une équipe.
    pub fn days_worked(&self, id: WorkerId) -> usize {
        self.days.iter().filter(|d| d.contains(id)).count()
    }

    /// Jours dont l'effectif placé reste sous l'objectif.
    pub fn shortfalls(&self) -> Vec<(Day, u32)> {
        self.days
            .iter()
            .filter(|d| d.shortfall() > 0)
            .map(|d| (d.day, d.shortfall()))
            .collect()
    }
}
