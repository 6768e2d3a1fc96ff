#![forbid(unsafe_code)]
use binome::scheduler::availability;
use binome::{
    generate, Day, DayTargets, GenerateOptions, MemoryPolicy, PackingPolicy, PairKey,
    PairingMemory, Plan, Roster, Scheduler, WorkerId,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;

fn w(id: u32) -> WorkerId {
    WorkerId::new(id)
}

fn day(index: u8) -> Day {
    Day::new(index).unwrap()
}

fn day_pairs(schedule: &binome::WeekSchedule, d: Day) -> BTreeSet<PairKey> {
    schedule
        .day(d)
        .unwrap()
        .groups
        .iter()
        .filter_map(|g| g.pair_key())
        .collect()
}

#[test]
fn four_workers_make_two_pairs_on_monday() {
    let mut roster = Roster::default();
    for name in ["A", "B", "C", "D"] {
        roster.add_worker(name);
    }
    let targets = DayTargets::uniform(4);
    let mut rng = StdRng::seed_from_u64(1);

    let out = generate(
        &roster,
        &targets,
        &PairingMemory::new(),
        GenerateOptions::default(),
        &mut rng,
    );

    assert_eq!(out.schedule.days.len(), 7);
    let monday = out.schedule.day(Day::MONDAY).unwrap();
    assert_eq!(monday.groups.len(), 2);
    assert!(monday.groups.iter().all(|g| !g.is_solo()));
    let mut covered: Vec<WorkerId> = monday.assigned().collect();
    covered.sort_unstable();
    assert_eq!(covered, vec![w(1), w(2), w(3), w(4)]);
    assert_eq!(
        out.memory.get(Day::MONDAY),
        &day_pairs(&out.schedule, Day::MONDAY)
    );
    assert_eq!(out.memory.get(Day::MONDAY).len(), 2);
}

#[test]
fn target_above_roster_size_gives_pair_and_solo() {
    let roster = Roster::with_size(3);
    let targets = DayTargets::uniform(4);
    let mut rng = StdRng::seed_from_u64(3);

    let out = generate(
        &roster,
        &targets,
        &PairingMemory::new(),
        GenerateOptions::default(),
        &mut rng,
    );

    for d in &out.schedule.days {
        assert_eq!(d.groups.len(), 2, "{}", d.day);
        assert_eq!(d.groups.iter().filter(|g| g.is_solo()).count(), 1);
        assert_eq!(d.assigned_count(), 3);
        assert_eq!(d.shortfall(), 1);
    }
}

#[test]
fn rest_days_are_respected() {
    let mut roster = Roster::with_size(5);
    roster
        .set_rest_days(w(1), vec![Day::MONDAY, Day::MONDAY, Day::SUNDAY])
        .unwrap();
    roster.set_rest_days(w(2), vec![day(2)]).unwrap();

    assert_eq!(availability::eligible(Day::MONDAY, &roster).len(), 4);
    let resting: Vec<WorkerId> = availability::resting(Day::SUNDAY, &roster)
        .into_iter()
        .map(|wk| wk.id)
        .collect();
    assert_eq!(resting, vec![w(1)]);

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let out = generate(
            &roster,
            &DayTargets::uniform(5),
            &PairingMemory::new(),
            GenerateOptions::default(),
            &mut rng,
        );
        assert!(!out.schedule.day(Day::MONDAY).unwrap().contains(w(1)));
        assert!(!out.schedule.day(Day::SUNDAY).unwrap().contains(w(1)));
        assert!(!out.schedule.day(day(2)).unwrap().contains(w(2)));
        assert!(out.schedule.day(day(1)).unwrap().contains(w(1)));
    }
}

#[test]
fn consecutive_generations_never_repeat_a_pair() {
    let roster = Roster::with_size(6);
    let targets = DayTargets::uniform(4);
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let first = generate(
            &roster,
            &targets,
            &PairingMemory::new(),
            GenerateOptions::default(),
            &mut rng,
        );
        let second = generate(
            &roster,
            &targets,
            &first.memory,
            GenerateOptions::default(),
            &mut rng,
        );
        for d in Day::all() {
            let repeated: Vec<_> = day_pairs(&second.schedule, d)
                .intersection(first.memory.get(d))
                .copied()
                .collect();
            assert!(repeated.is_empty(), "seed {seed}, {d}: {repeated:?}");
        }
    }
}

#[test]
fn last_generation_memory_is_replaced_not_merged() {
    let roster = Roster::with_size(6);
    let targets = DayTargets::uniform(4);
    let mut rng = StdRng::seed_from_u64(11);
    let opts = GenerateOptions::default();

    let first = generate(&roster, &targets, &PairingMemory::new(), opts, &mut rng);
    let second = generate(&roster, &targets, &first.memory, opts, &mut rng);

    for d in Day::all() {
        assert_eq!(second.memory.get(d), &day_pairs(&second.schedule, d));
    }
}

#[test]
fn accumulate_keeps_older_pairs() {
    let roster = Roster::with_size(8);
    let targets = DayTargets::uniform(4);
    let mut rng = StdRng::seed_from_u64(5);
    let opts = GenerateOptions {
        memory_policy: MemoryPolicy::Accumulate,
        packing_policy: PackingPolicy::BestEffort,
    };

    let first = generate(&roster, &targets, &PairingMemory::new(), opts, &mut rng);
    let second = generate(&roster, &targets, &first.memory, opts, &mut rng);

    for d in Day::all() {
        assert!(second.memory.get(d).is_superset(first.memory.get(d)));
        assert!(second.memory.get(d).is_superset(&day_pairs(&second.schedule, d)));
    }
    assert!(second.memory.len() >= first.memory.len());
}

#[test]
fn input_memory_is_left_untouched() {
    let roster = Roster::with_size(4);
    let mut memory = PairingMemory::new();
    memory.replace(Day::MONDAY, [PairKey::new(w(1), w(2))].into_iter().collect());
    assert!(memory.contains(Day::MONDAY, PairKey::new(w(2), w(1))));
    let before = memory.clone();
    let mut rng = StdRng::seed_from_u64(2);

    let _ = generate(
        &roster,
        &DayTargets::uniform(4),
        &memory,
        GenerateOptions::default(),
        &mut rng,
    );
    assert_eq!(memory, before);
}

#[test]
fn degenerate_inputs_give_empty_days() {
    let mut rng = StdRng::seed_from_u64(0);
    let out = generate(
        &Roster::default(),
        &DayTargets::uniform(4),
        &PairingMemory::new(),
        GenerateOptions::default(),
        &mut rng,
    );
    assert!(out.schedule.days.iter().all(|d| d.groups.is_empty()));
    assert!(out.memory.is_empty());

    let mut roster = Roster::with_size(2);
    roster.set_rest_days(w(1), vec![Day::SUNDAY]).unwrap();
    roster.set_rest_days(w(2), vec![Day::SUNDAY]).unwrap();
    let out = generate(
        &roster,
        &DayTargets::uniform(2),
        &PairingMemory::new(),
        GenerateOptions::default(),
        &mut rng,
    );
    let sunday = out.schedule.day(Day::SUNDAY).unwrap();
    assert!(sunday.groups.is_empty());
    assert_eq!(sunday.shortfall(), 2);
    assert_eq!(out.schedule.shortfalls(), vec![(Day::SUNDAY, 2)]);
}

#[test]
fn scheduler_adopts_memory_and_is_reproducible() {
    let plan = Plan::with_size(6, 4);
    let mut a = Scheduler::with_seed(plan.clone(), 42);
    let mut b = Scheduler::with_seed(plan, 42);

    let week_a = a.generate_week(None);
    let week_b = b.generate_week(None);
    assert_eq!(week_a.days, week_b.days);
    assert_ne!(week_a.id, week_b.id);

    for d in Day::all() {
        assert_eq!(a.memory().get(d), &day_pairs(&week_a, d));
    }

    let next = a.generate_week(None);
    for d in Day::all() {
        assert!(day_pairs(&next, d).is_disjoint(&day_pairs(&week_a, d)));
    }

    a.reset_memory();
    assert!(a.memory().is_empty());
}
