// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Cadence habit tracker binary.

use anyhow::{anyhow, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use cadence_analytics::Analytics;
use cadence_core::{Habit, Periodicity};
use cadence_store::{HabitStore, SqliteHabitStore};

/// Cadence - track recurring habits and their streaks.
#[derive(Parser, Debug)]
#[command(
	name = "cadence",
	about = "Track recurring habits, streaks and completion ratios",
	version
)]
struct Args {
	/// Path to the SQLite database file
	#[arg(long, env = "CADENCE_DB", default_value = "habits.db", global = true)]
	db: PathBuf,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Register a new habit
	Add {
		/// Habit name, 3 to 20 characters
		name: String,
		/// daily or weekly
		#[arg(long)]
		periodicity: Periodicity,
	},
	/// Delete a habit and its completion history
	Remove {
		name: String,
	},
	/// Log a completion for a habit
	Done {
		name: String,
		/// Completion date, defaults to today
		#[arg(long)]
		date: Option<NaiveDate>,
	},
	/// Remove a logged completion
	Undone {
		name: String,
		#[arg(long)]
		date: NaiveDate,
	},
	/// List habits
	Habits {
		/// Only habits of this periodicity
		#[arg(long)]
		periodicity: Option<Periodicity>,
		#[arg(long)]
		json: bool,
	},
	/// List a habit's completion dates
	Dates {
		name: String,
	},
	/// Longest streak for one habit
	Streak {
		name: String,
		#[arg(long)]
		json: bool,
	},
	/// Longest-streak holder among daily and among weekly habits
	Leaders {
		#[arg(long)]
		json: bool,
	},
	/// Completion ratios for habits of one periodicity
	Ratio {
		#[arg(long)]
		periodicity: Periodicity,
		#[arg(long)]
		json: bool,
	},
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cadence=info")),
		)
		.compact()
		.init();

	// The store handle is resolved exactly once, here; nothing downstream
	// carries a default database path.
	let database_url = format!("sqlite:{}", args.db.display());
	let pool = cadence_store::create_pool(&database_url).await?;
	cadence_store::init_schema(&pool).await?;

	let store = Arc::new(SqliteHabitStore::new(pool));
	let analytics = Analytics::new(store.clone());

	match args.command {
		Command::Add { name, periodicity } => add(&*store, &name, periodicity).await,
		Command::Remove { name } => remove(&*store, &name).await,
		Command::Done { name, date } => done(&*store, &analytics, &name, date).await,
		Command::Undone { name, date } => undone(&*store, &name, date).await,
		Command::Habits { periodicity, json } => habits(&*store, periodicity, json).await,
		Command::Dates { name } => dates(&*store, &name).await,
		Command::Streak { name, json } => streak(&*store, &analytics, &name, json).await,
		Command::Leaders { json } => leaders(&analytics, json).await,
		Command::Ratio { periodicity, json } => ratio(&analytics, periodicity, json).await,
	}
}

async fn add(store: &dyn HabitStore, name: &str, periodicity: Periodicity) -> anyhow::Result<()> {
	if store.habit_exists(name).await? {
		bail!("habit {name:?} already exists");
	}

	let habit = Habit::new(name, periodicity, Local::now().date_naive())?;
	store.insert_habit(&habit).await?;

	tracing::info!(habit = %habit.name, periodicity = %habit.periodicity, "habit added");
	println!("added {periodicity} habit {habit}");
	Ok(())
}

async fn remove(store: &dyn HabitStore, name: &str) -> anyhow::Result<()> {
	if !store.delete_habit(name).await? {
		bail!("habit {name:?} not found");
	}

	tracing::info!(habit = %name, "habit removed");
	println!("removed {name} and its completion history");
	Ok(())
}

async fn done(
	store: &dyn HabitStore,
	analytics: &Analytics,
	name: &str,
	date: Option<NaiveDate>,
) -> anyhow::Result<()> {
	let date = date.unwrap_or_else(|| Local::now().date_naive());
	let habit = store
		.fetch_habit(name)
		.await?
		.ok_or_else(|| anyhow!("habit {name:?} not found"))?;

	if analytics.period_already_satisfied(name, date).await? {
		match habit.periodicity {
			Periodicity::Daily => println!("{name} is already completed on {date}"),
			Periodicity::Weekly => println!("{name} is already completed in the week of {date}"),
		}
		return Ok(());
	}

	store.insert_completion(name, date).await?;
	tracing::info!(habit = %name, date = %date, "completion logged");
	println!("completed {name} on {date}");
	Ok(())
}

async fn undone(store: &dyn HabitStore, name: &str, date: NaiveDate) -> anyhow::Result<()> {
	if !store.delete_completion(name, date).await? {
		println!("no completion of {name} on {date}");
		return Ok(());
	}

	tracing::info!(habit = %name, date = %date, "completion removed");
	println!("removed completion of {name} on {date}");
	Ok(())
}

async fn habits(
	store: &dyn HabitStore,
	periodicity: Option<Periodicity>,
	json: bool,
) -> anyhow::Result<()> {
	let habits = match periodicity {
		Some(periodicity) => store.list_habits_by_periodicity(periodicity).await?,
		None => store.list_habits().await?,
	};

	if json {
		println!("{}", serde_json::to_string_pretty(&habits)?);
		return Ok(());
	}

	if habits.is_empty() {
		println!("no habits yet");
		return Ok(());
	}
	for habit in habits {
		println!(
			"{} [{}] created {}",
			habit.name, habit.periodicity, habit.created_on
		);
	}
	Ok(())
}

async fn dates(store: &dyn HabitStore, name: &str) -> anyhow::Result<()> {
	if !store.habit_exists(name).await? {
		bail!("habit {name:?} not found");
	}

	let dates = store.completion_dates(name).await?;
	if dates.is_empty() {
		println!("no completions of {name} yet");
		return Ok(());
	}
	for date in dates {
		println!("{date}");
	}
	Ok(())
}

async fn streak(
	store: &dyn HabitStore,
	analytics: &Analytics,
	name: &str,
	json: bool,
) -> anyhow::Result<()> {
	let habit = store
		.fetch_habit(name)
		.await?
		.ok_or_else(|| anyhow!("habit {name:?} not found"))?;
	let length = analytics.habit_longest_streak(name).await?;

	if json {
		println!(
			"{}",
			serde_json::json!({
				"habit": habit.name,
				"periodicity": habit.periodicity,
				"length": length,
			})
		);
		return Ok(());
	}

	println!(
		"{name}: longest streak of {length} {}",
		pluralize(habit.periodicity.unit(), length)
	);
	Ok(())
}

async fn leaders(analytics: &Analytics, json: bool) -> anyhow::Result<()> {
	let daily = analytics.longest_streak_holder(Periodicity::Daily).await?;
	let weekly = analytics.longest_streak_holder(Periodicity::Weekly).await?;

	if json {
		println!(
			"{}",
			serde_json::to_string_pretty(&serde_json::json!({
				"daily": daily,
				"weekly": weekly,
			}))?
		);
		return Ok(());
	}

	for (periodicity, leader) in [(Periodicity::Daily, daily), (Periodicity::Weekly, weekly)] {
		if leader.habit.is_empty() {
			println!("{periodicity}: no streak yet");
		} else {
			println!(
				"{periodicity}: {} ({} {})",
				leader.habit,
				leader.length,
				pluralize(periodicity.unit(), leader.length)
			);
		}
	}
	Ok(())
}

async fn ratio(analytics: &Analytics, periodicity: Periodicity, json: bool) -> anyhow::Result<()> {
	let ratios = analytics.completion_ratios(periodicity).await?;

	if json {
		println!("{}", serde_json::to_string_pretty(&ratios)?);
		return Ok(());
	}

	if ratios.is_empty() {
		println!("no {periodicity} habits yet");
		return Ok(());
	}
	for entry in ratios {
		println!("{}: {:.2}%", entry.habit, entry.ratio * 100.0);
	}
	Ok(())
}

fn pluralize(unit: &str, count: u32) -> String {
	if count == 1 {
		unit.to_string()
	} else {
		format!("{unit}s")
	}
}
