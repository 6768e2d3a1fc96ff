use super::PackingPolicy;
use crate::model::{PairKey, ShiftGroup, WorkerId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeSet, VecDeque};

/// Résultat de la constitution des équipes d'une journée.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Packing {
    pub groups: Vec<ShiftGroup>,
    /// Binômes formés par cet appel.
    pub used: BTreeSet<PairKey>,
    /// Membres disponibles restés sans équipe.
    pub unassigned: Vec<WorkerId>,
    /// Un membre tiré n'avait plus aucun partenaire inédit.
    pub dead_end: bool,
}

/// Nombre maximal d'équipes pour un effectif donné : ⌈target / 2⌉.
pub fn pair_capacity(target: u32) -> usize {
    usize::try_from(target.div_ceil(2)).unwrap_or(usize::MAX)
}

/// Mélange les disponibles puis les répartit en équipes.
pub fn pack<R: Rng + ?Sized>(
    eligible: &[WorkerId],
    target: u32,
    used_pairs: &BTreeSet<PairKey>,
    policy: PackingPolicy,
    rng: &mut R,
) -> Packing {
    let mut order = eligible.to_vec();
    order.shuffle(rng);
    pack_pool(order, target, used_pairs, policy)
}

/// Répartit les membres dans l'ordre fourni (le tirage se fait en fin de
/// liste), sans mélange préalable.
///
/// Au-delà de `target`, les membres ne sont pas planifiés. Un binôme présent
/// dans `used_pairs` n'est jamais reformé.
pub fn pack_pool(
    mut order: Vec<WorkerId>,
    target: u32,
    used_pairs: &BTreeSet<PairKey>,
    policy: PackingPolicy,
) -> Packing {
    let limit = usize::try_from(target).unwrap_or(usize::MAX);
    let overflow = if order.len() > limit {
        order.split_off(limit)
    } else {
        Vec::new()
    };
    let capacity = pair_capacity(target);

    let mut pool: VecDeque<WorkerId> = order.into();
    let mut set_aside: Vec<WorkerId> = Vec::new();
    let mut packing = Packing::default();

    while pool.len() >= 2 && packing.groups.len() < capacity {
        let Some(a) = pool.pop_back() else { break };
        let partner = pool
            .iter()
            .position(|&b| !used_pairs.contains(&PairKey::new(a, b)))
            .and_then(|pos| pool.remove(pos));

        match partner {
            Some(b) => {
                packing.groups.push(ShiftGroup::pair(a, b));
                packing.used.insert(PairKey::new(a, b));
            }
            None => {
                packing.dead_end = true;
                match policy {
                    PackingPolicy::FailFast => {
                        pool.push_front(a);
                        break;
                    }
                    PackingPolicy::BestEffort => set_aside.push(a),
                }
            }
        }
    }

    if packing.groups.len() < capacity {
        let solo = match policy {
            PackingPolicy::FailFast if pool.len() == 1 => pool.pop_back(),
            PackingPolicy::FailFast => None,
            PackingPolicy::BestEffort => {
                if set_aside.is_empty() {
                    pool.pop_back()
                } else {
                    Some(set_aside.remove(0))
                }
            }
        };
        if let Some(id) = solo {
            packing.groups.push(ShiftGroup::solo(id));
        }
    }

    packing.unassigned.extend(set_aside);
    packing.unassigned.extend(pool);
    packing.unassigned.extend(overflow);
    packing
}
