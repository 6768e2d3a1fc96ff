use super::{availability, packer, GenerateOptions, PairingMemory};
use crate::model::{Day, DaySchedule, DayTargets, Roster, WeekSchedule, DAYS_PER_WEEK};
use rand::Rng;
use tracing::{debug, info, warn};

/// Planning de la semaine et mémoire à adopter pour la génération suivante.
#[derive(Debug, Clone)]
pub struct Generation {
    pub schedule: WeekSchedule,
    pub memory: PairingMemory,
}

/// Génère les 7 jours, du lundi au dimanche.
///
/// Ne modifie rien : la mémoire mise à jour est retournée avec le planning
/// et c'est à l'appelant de l'adopter. Un roster vide, un effectif nul ou un
/// jour sans disponible donnent simplement un jour vide.
pub fn generate<R: Rng + ?Sized>(
    roster: &Roster,
    targets: &DayTargets,
    memory: &PairingMemory,
    opts: GenerateOptions,
    rng: &mut R,
) -> Generation {
    let mut next = memory.clone();
    let mut days = Vec::with_capacity(DAYS_PER_WEEK);

    for day in Day::all() {
        let target = targets.get(day);
        let eligible = availability::eligible(day, roster);
        let packing = packer::pack(&eligible, target, memory.get(day), opts.packing_policy, rng);

        debug!(
            day = day.name(),
            eligible = eligible.len(),
            target,
            groups = packing.groups.len(),
            dead_end = packing.dead_end,
            "day packed"
        );

        next.record(day, packing.used, opts.memory_policy);

        let schedule = DaySchedule {
            day,
            target,
            groups: packing.groups,
            unassigned: packing.unassigned,
        };
        if schedule.shortfall() > 0 {
            warn!(
                day = day.name(),
                target,
                assigned = schedule.assigned_count(),
                "day below target"
            );
        }
        days.push(schedule);
    }

    let schedule = WeekSchedule::new(days);
    info!(
        schedule = %schedule.id,
        remembered_pairs = next.len(),
        "week generated"
    );
    Generation {
        schedule,
        memory: next,
    }
}
