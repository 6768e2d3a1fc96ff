use crate::model::{Day, Roster, Worker, WorkerId};

/// Membres disponibles ce jour-là : tous ceux dont la liste de repos ne
/// contient pas `day`. L'ordre n'a pas de signification.
pub fn eligible(day: Day, roster: &Roster) -> Vec<WorkerId> {
    roster
        .workers
        .iter()
        .filter(|w| !roster.is_resting(w.id, day))
        .map(|w| w.id)
        .collect()
}

/// Membres au repos ce jour-là, dans l'ordre du roster.
pub fn resting(day: Day, roster: &Roster) -> Vec<&Worker> {
    roster
        .workers
        .iter()
        .filter(|w| roster.is_resting(w.id, day))
        .collect()
}
