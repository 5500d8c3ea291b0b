//! Command-line surface for the AI lifting coach.

use std::{
    io::{IsTerminal, Read},
    path::PathBuf,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use liftcoach_domain::{
    GeneratedPlan, Lift, PlanSource, Service, Session, Settings, Weight,
};
use liftcoach_generation::GeneratorChain;
use liftcoach_storage::FileStorage;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Percentage-based training planner with an AI-generated menu.
#[derive(Parser, Debug)]
#[command(name = "liftcoach")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API key for the hosted generator; without it the fallback plan is
    /// used.
    #[arg(long, global = true, env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Directory holding settings and the workout log.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate today's menu and print it.
    Plan {
        /// Main lift of the session (bench, squat or deadlift).
        #[arg(long, value_parser = parse_lift, default_value = "bench")]
        lift: Lift,

        /// Body parts to train, e.g. --parts chest --parts triceps.
        #[arg(long = "parts")]
        parts: Vec<String>,

        /// Skip the generator and use the prescription line directly.
        #[arg(long)]
        offline: bool,
    },

    /// Append a session to the workout log and advance the cycle.
    ///
    /// Reads a plan text from stdin when piped; otherwise logs the
    /// prescription line for the given lift.
    Log {
        #[arg(long, value_parser = parse_lift, default_value = "bench")]
        lift: Lift,
    },

    /// Show the most recent workout log rows.
    History {
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },

    /// Show or update the one-rep maxes and the session counter.
    Settings {
        #[arg(long, value_parser = parse_weight)]
        bench_max: Option<Weight>,
        #[arg(long, value_parser = parse_weight)]
        squat_max: Option<Weight>,
        #[arg(long, value_parser = parse_weight)]
        deadlift_max: Option<Weight>,
        #[arg(long)]
        counter: Option<u32>,
        #[arg(long)]
        knowledge_base: Option<String>,
        #[arg(long)]
        constraints: Option<String>,
    },
}

fn parse_lift(value: &str) -> Result<Lift, String> {
    Lift::try_from(value).map_err(|err| err.to_string())
}

fn parse_weight(value: &str) -> Result<Weight, String> {
    Weight::try_from(value).map_err(|err| err.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let data_dir = match cli.data_dir.clone() {
        Some(dir) => dir,
        None => FileStorage::default_dir().context("no usable data directory")?,
    };
    let storage = FileStorage::new(data_dir);

    match cli.command {
        Commands::Plan {
            lift,
            parts,
            offline,
        } => {
            let chain = build_chain(cli.api_key.as_deref(), offline)?;
            let service = Service::new(storage, chain);
            let session = service.plan_session(lift, &parts).await?;
            print_session(&session);
        }
        Commands::Log { lift } => {
            let service = Service::new(storage, GeneratorChain::offline());
            let session = if std::io::stdin().is_terminal() {
                service.plan_session(lift, &[]).await?
            } else {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read plan text from stdin")?;
                Session::new(GeneratedPlan {
                    text,
                    source: PlanSource::Fallback,
                })
            };
            let rows = session.entries().len();
            let counter = service.log_session(&session).await?;
            println!("logged {rows} row(s), session counter is now {counter}");
        }
        Commands::History { limit } => {
            let service = Service::new(storage, GeneratorChain::offline());
            let rows = service.recent_history(limit).await?;
            if rows.is_empty() {
                println!("no logged sessions yet");
            }
            for row in rows {
                println!(
                    "{}  {}  {}kg x {} reps x {} sets",
                    row.time.format("%Y-%m-%d %H:%M"),
                    row.exercise,
                    row.weight,
                    row.reps,
                    row.sets
                );
            }
        }
        Commands::Settings {
            bench_max,
            squat_max,
            deadlift_max,
            counter,
            knowledge_base,
            constraints,
        } => {
            let service = Service::new(storage, GeneratorChain::offline());
            let mut settings = service.get_settings().await?;
            let changed = [
                apply(&mut settings.bench_max, bench_max),
                apply(&mut settings.squat_max, squat_max),
                apply(&mut settings.deadlift_max, deadlift_max),
                apply(&mut settings.session_counter, counter),
                apply(&mut settings.knowledge_base, knowledge_base),
                apply(&mut settings.custom_constraints, constraints),
            ]
            .iter()
            .any(|changed| *changed);

            if changed {
                service.set_settings(settings.clone()).await?;
            }
            print_settings(&settings);
        }
    }

    Ok(())
}

fn build_chain(api_key: Option<&str>, offline: bool) -> anyhow::Result<GeneratorChain> {
    if offline {
        return Ok(GeneratorChain::offline());
    }
    match api_key {
        Some(api_key) => Ok(GeneratorChain::gemini(api_key)?),
        None => {
            tracing::warn!("no API key configured, using the fallback plan");
            Ok(GeneratorChain::offline())
        }
    }
}

fn apply<T>(target: &mut T, value: Option<T>) -> bool {
    match value {
        Some(value) => {
            *target = value;
            true
        }
        None => false,
    }
}

fn print_session(session: &Session) {
    match session.source() {
        PlanSource::Generated { model } => println!("plan generated by {model}"),
        PlanSource::Fallback => println!("plan from built-in fallback"),
    }
    if session.is_empty() {
        println!("no exercises found in the generated plan");
        return;
    }
    for (index, entry) in session.entries().iter().enumerate() {
        println!("{}. {entry}", index + 1);
    }
}

fn print_settings(settings: &Settings) {
    println!("bench max:       {} kg", settings.bench_max);
    println!("squat max:       {} kg", settings.squat_max);
    println!("deadlift max:    {} kg", settings.deadlift_max);
    println!("session counter: {}", settings.session_counter);
    println!("knowledge base:  {}", settings.knowledge_base);
    println!("constraints:     {}", settings.custom_constraints);
}
