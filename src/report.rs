use crate::model::{DaySchedule, Roster, ShiftGroup, WeekSchedule, WorkerId};
use crate::scheduler::availability;
use crate::week;
use std::fmt::Write;

/// Permet de customiser le rendu du planning (texte, message, etc.).
pub trait ScheduleRenderer {
    fn render(&self, roster: &Roster, schedule: &WeekSchedule) -> String;
}

/// Résumé texte destiné à être copié tel quel dans un message.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextSummary;

impl ScheduleRenderer for TextSummary {
    fn render(&self, roster: &Roster, schedule: &WeekSchedule) -> String {
        let mut out = String::from("Planning de la semaine");
        if let Some(start) = schedule.week_start {
            let _ = write!(
                out,
                " (du {} au {})",
                week::format_date(start),
                week::format_date(week::week_end(start))
            );
        }
        out.push_str("\n\n");

        for day in &schedule.days {
            let _ = writeln!(out, "{}:", day.day);
            let _ = writeln!(out, "Équipes: {}", render_groups(roster, day));
            if day.shortfall() > 0 {
                let _ = writeln!(out, "Effectif: {}/{}", day.assigned_count(), day.target);
            }
            let resting: Vec<&str> = availability::resting(day.day, roster)
                .into_iter()
                .map(|w| w.name.as_str())
                .collect();
            let resting = if resting.is_empty() {
                "Personne".to_string()
            } else {
                resting.join(", ")
            };
            let _ = writeln!(out, "Repos: {resting}");
            out.push('\n');
        }

        let has_solo = schedule
            .days
            .iter()
            .any(|d| d.groups.iter().any(ShiftGroup::is_solo));
        if has_solo {
            out.push_str("* travaille seul(e) sur ce créneau.\n");
        }
        out
    }
}

fn render_groups(roster: &Roster, day: &DaySchedule) -> String {
    if day.groups.is_empty() {
        return "Aucune équipe affectée".to_string();
    }
    day.groups
        .iter()
        .map(|group| {
            let names = group
                .workers()
                .iter()
                .map(|id| display_name(roster, *id))
                .collect::<Vec<_>>()
                .join(" et ");
            if group.is_solo() {
                format!("{names}*")
            } else {
                names
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_name(roster: &Roster, id: WorkerId) -> String {
    roster
        .name_of(id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{id}"))
}

/// Jours travaillés par membre sur la semaine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    pub id: WorkerId,
    pub name: String,
    pub days: usize,
}

pub fn workload(roster: &Roster, schedule: &WeekSchedule) -> Vec<Workload> {
    roster
        .workers
        .iter()
        .map(|w| Workload {
            id: w.id,
            name: w.name.clone(),
            days: schedule.days_worked(w.id),
        })
        .collect()
}

pub fn render_workload(rows: &[Workload]) -> String {
    let mut out = String::new();
    for row in rows {
        let unit = if row.days > 1 { "jours travaillés" } else { "jour travaillé" };
        let _ = writeln!(out, "{}: {} {unit}", row.name, row.days);
    }
    out
}
