#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use binome::{
    io,
    model::{Day, WorkerId},
    plan::Plan,
    report::{self, ScheduleRenderer, TextSummary},
    scheduler::{MemoryPolicy, PackingPolicy, Scheduler},
    storage::{JsonStorage, Storage},
    week,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de répartition hebdomadaire en binômes
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du plan
    #[arg(long, global = true, default_value = "plan.json")]
    plan: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer un plan avec des membres par défaut
    Init {
        #[arg(long, default_value_t = 6)]
        workers: usize,
        /// Effectif par jour (plafonné au nombre de membres)
        #[arg(long, default_value_t = 4)]
        target: u32,
        /// Écraser un plan existant
        #[arg(long)]
        force: bool,
    },

    /// Changer le nombre de membres
    Resize {
        #[arg(long)]
        workers: usize,
    },

    /// Renommer un membre
    Rename {
        #[arg(long)]
        id: u32,
        #[arg(long)]
        name: String,
    },

    /// Jours de repos d'un membre
    Rest {
        #[arg(long)]
        id: u32,
        /// liste "0,5" (0 = lundi) ; vide pour effacer
        #[arg(long, conflicts_with = "count")]
        days: Option<String>,
        /// réduire la liste à `count` jours (1..=7)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Effectif souhaité
    Target {
        /// Jour 0..=6 (0 = lundi)
        #[arg(long, required_unless_present = "all")]
        day: Option<u8>,
        /// Appliquer à tous les jours
        #[arg(long)]
        all: bool,
        #[arg(long)]
        count: u32,
    },

    /// Importer des membres depuis un CSV
    ImportWorkers {
        #[arg(long)]
        csv: String,
    },

    /// Choisir la semaine à partir d'une date quelconque (YYYY-MM-DD)
    Week {
        #[arg(long)]
        date: String,
    },

    /// Générer le planning
    Generate {
        /// Nombre de semaines consécutives (mémoire conservée entre elles)
        #[arg(long, default_value_t = 1)]
        weeks: usize,
        /// Graine pour un tirage reproductible
        #[arg(long)]
        seed: Option<u64>,
        /// last | accumulate
        #[arg(long)]
        memory: Option<MemoryPolicy>,
        /// fail-fast | best-effort
        #[arg(long)]
        packing: Option<PackingPolicy>,
        /// Résumé texte (fichier)
        #[arg(long)]
        out: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vérifier le plan
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.plan)?;

    if let Commands::Init {
        workers,
        target,
        force,
    } = cli.cmd
    {
        if storage.exists() && !force {
            bail!("{} existe déjà (utiliser --force)", storage.path().display());
        }
        if target == 0 {
            bail!("target must be at least 1");
        }
        storage.save(&Plan::with_size(workers, target))?;
        println!("Plan créé: {} ({} membres)", storage.path().display(), workers);
        std::process::exit(0);
    }

    let mut plan = storage
        .load()
        .context("loading plan (run `init` first?)")?;

    let code = match cli.cmd {
        Commands::Init { .. } => 0,
        Commands::Resize { workers } => {
            plan.resize(workers);
            storage.save(&plan)?;
            0
        }
        Commands::Rename { id, name } => {
            if name.trim().is_empty() {
                bail!("name cannot be empty");
            }
            plan.roster.rename(WorkerId::new(id), name)?;
            storage.save(&plan)?;
            0
        }
        Commands::Rest { id, days, count } => {
            let id = WorkerId::new(id);
            if let Some(raw) = days {
                let days = io::parse_rest_days(&raw)?;
                plan.roster.set_rest_days(id, days)?;
            }
            if let Some(count) = count {
                plan.roster.truncate_rest_days(id, count)?;
            }
            storage.save(&plan)?;
            let days: Vec<&str> = plan.roster.rest_days(id).into_iter().map(Day::name).collect();
            println!("{id}: repos {}", if days.is_empty() { "-".to_string() } else { days.join(", ") });
            0
        }
        Commands::Target { day, all, count } => {
            let size = plan.roster.len();
            let days: Vec<Day> = if all {
                Day::all().collect()
            } else {
                let day = day.context("--day or --all required")?;
                vec![Day::new(day)?]
            };
            for day in days {
                let kept = plan.targets.set(day, count, size)?;
                if kept != count {
                    eprintln!("{day}: effectif plafonné à {kept}");
                }
            }
            storage.save(&plan)?;
            0
        }
        Commands::ImportWorkers { csv } => {
            let imported = io::import_workers_csv(csv)?;
            let n = imported.len();
            for entry in imported {
                let id = entry.worker.id;
                plan.roster.insert(entry.worker)?;
                plan.roster.set_rest_days(id, entry.rest_days)?;
            }
            storage.save(&plan)?;
            println!("{n} membre(s) importé(s)");
            0
        }
        Commands::Week { date } => {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("invalid date: {date}"))?;
            let start = plan.select_week(date);
            storage.save(&plan)?;
            println!(
                "Semaine du {} au {}",
                week::format_date(start),
                week::format_date(week::week_end(start))
            );
            0
        }
        Commands::Generate {
            weeks,
            seed,
            memory,
            packing,
            out,
            out_json,
            out_csv,
        } => {
            if weeks == 0 {
                bail!("weeks must be at least 1");
            }
            if let Some(policy) = memory {
                plan.options.memory_policy = policy;
            }
            if let Some(policy) = packing {
                plan.options.packing_policy = policy;
            }
            let mut week_start = plan.week_start;
            let mut scheduler = match seed {
                Some(seed) => Scheduler::with_seed(plan, seed),
                None => Scheduler::new(plan),
            };

            let renderer = TextSummary;
            let mut schedules = Vec::with_capacity(weeks);
            let mut text = String::new();
            for _ in 0..weeks {
                let schedule = scheduler.generate_week(week_start);
                text.push_str(&renderer.render(&scheduler.plan().roster, &schedule));
                text.push('\n');
                text.push_str(&report::render_workload(&report::workload(
                    &scheduler.plan().roster,
                    &schedule,
                )));
                text.push('\n');
                week_start = week_start.map(week::next_week);
                schedules.push(schedule);
            }

            print!("{text}");
            if let Some(path) = out {
                std::fs::write(&path, &text).with_context(|| format!("writing {path}"))?;
            }
            if let Some(path) = out_json {
                io::export_schedules_json(path, &schedules)?;
            }
            if let Some(path) = out_csv {
                io::export_schedules_csv(path, &schedules, &scheduler.plan().roster)?;
            }

            let short: usize = schedules.iter().map(|s| s.shortfalls().len()).sum();
            if short > 0 {
                eprintln!("{short} jour(s) sous l'effectif demandé");
            }
            0
        }
        Commands::Check => {
            let under = plan.understaffed();
            if under.is_empty() {
                println!("OK: plan valide");
                0
            } else {
                for u in &under {
                    eprintln!(
                        "{}: {} disponible(s) pour un effectif de {}",
                        u.day, u.eligible, u.target
                    );
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
    };

    std::process::exit(code);
}
