use crate::model::{Day, Roster, WeekSchedule, Worker, WorkerId};
use crate::week;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Membre lu depuis un CSV, avec ses jours de repos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedWorker {
    pub worker: Worker,
    pub rest_days: Vec<Day>,
}

/// Import de membres depuis CSV: header `id,name[,rest_days]`
///
/// `rest_days` liste des indices de jour séparés par `;` (0 = lundi).
pub fn import_workers_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ImportedWorker>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        if id.is_empty() || name.is_empty() {
            bail!("invalid worker row (empty)");
        }
        let id: u32 = id
            .parse()
            .with_context(|| format!("invalid worker id: {id}"))?;
        let rest_days = match rec.get(2).map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_rest_days(raw)
                .with_context(|| format!("invalid rest_days value for worker {id}"))?,
            _ => Vec::new(),
        };
        out.push(ImportedWorker {
            worker: Worker::new(WorkerId::new(id), name),
            rest_days,
        });
    }
    Ok(out)
}

/// Indices de jour séparés par `;` ou `,` : `0;5`.
pub fn parse_rest_days(raw: &str) -> anyhow::Result<Vec<Day>> {
    raw.split([';', ','])
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| -> anyhow::Result<Day> {
            let index: u8 = chunk
                .parse()
                .with_context(|| format!("invalid day index: {chunk}"))?;
            Ok(Day::new(index)?)
        })
        .collect()
}

/// Export JSON des semaines générées (jolie mise en forme)
pub fn export_schedules_json<P: AsRef<Path>>(
    path: P,
    schedules: &[WeekSchedule],
) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedules)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des semaines: header `week,day,date,group,worker_ids,names,solo`
pub fn export_schedules_csv<P: AsRef<Path>>(
    path: P,
    schedules: &[WeekSchedule],
    roster: &Roster,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["week", "day", "date", "group", "worker_ids", "names", "solo"])?;
    for (week_no, schedule) in schedules.iter().enumerate() {
        write_week(&mut w, week_no + 1, schedule, roster)?;
    }
    w.flush()?;
    Ok(())
}

fn write_week<W: std::io::Write>(
    w: &mut csv::Writer<W>,
    week_no: usize,
    schedule: &WeekSchedule,
    roster: &Roster,
) -> anyhow::Result<()> {
    let week_no = week_no.to_string();
    for day in &schedule.days {
        let date = schedule
            .week_start
            .map(|start| week::day_date(start, day.day).to_string())
            .unwrap_or_default();
        for (index, group) in day.groups.iter().enumerate() {
            let ids = group
                .workers()
                .iter()
                .map(WorkerId::to_string)
                .collect::<Vec<_>>()
                .join(";");
            let names = group
                .workers()
                .iter()
                .map(|id| roster.name_of(*id).unwrap_or(""))
                .collect::<Vec<_>>()
                .join(";");
            let group_no = (index + 1).to_string();
            w.write_record([
                week_no.as_str(),
                day.day.name(),
                date.as_str(),
                group_no.as_str(),
                ids.as_str(),
                names.as_str(),
                if group.is_solo() { "true" } else { "false" },
            ])?;
        }
    }
    Ok(())
}
