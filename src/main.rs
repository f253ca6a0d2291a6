use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fitzone_client::catalog::{BodyPartFilter, ExerciseDbClient, ExerciseFilter};
use fitzone_client::config::{AppConfig, CliConfig, FileConfig};
use fitzone_client::identity::Identity;
use fitzone_client::store::{MemoryScopedStore, ScopedStore, SqliteScopedStore};
use fitzone_client::user_content::{Weekday, WorkoutPlan};
use fitzone_client::{Exercise, Session};

#[derive(Parser, Debug)]
#[clap(name = "fitzone", about = "FitZone fitness catalog client")]
struct CliArgs {
    /// Path to a TOML config file. File values override CLI values.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Path to the SQLite file backing the local store.
    #[clap(long)]
    db: Option<PathBuf>,

    /// Use an in-memory store instead of a database file.
    #[clap(long)]
    ephemeral: bool,

    /// The authenticated user id for this session. Omit to run logged out.
    #[clap(long)]
    user: Option<String>,

    /// Display name for the session identity. Defaults to the user id.
    #[clap(long)]
    display_name: Option<String>,

    /// Catalog API credential. Falls back to the FITZONE_API_KEY env var.
    #[clap(long)]
    api_key: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a catalog page and filter it client-side.
    Exercises {
        /// Case-insensitive search over name, target, equipment and body part.
        #[clap(long)]
        search: Option<String>,

        /// Body part category, or "all".
        #[clap(long, default_value = "all")]
        body_part: String,

        #[clap(long)]
        limit: Option<usize>,

        #[clap(long, default_value_t = 0)]
        offset: usize,
    },

    /// Show one exercise by catalog id.
    Show { id: String },

    /// Manage the favorites collection of the session user.
    Favorites {
        #[clap(subcommand)]
        action: FavoritesAction,
    },

    /// Manage the workout plans of the session user.
    Plans {
        #[clap(subcommand)]
        action: PlansAction,
    },
}

#[derive(Subcommand, Debug)]
enum FavoritesAction {
    /// List the current favorites.
    List,
    /// Fetch the exercise by id and add it to favorites.
    Add { id: String },
    /// Remove an exercise from favorites.
    Remove { id: String },
    /// Toggle the favorite status of an exercise.
    Toggle { id: String },
    /// Empty the favorites collection and erase its stored value.
    Clear,
}

#[derive(Subcommand, Debug)]
enum PlansAction {
    /// List workout plans, optionally only those scheduled on a day.
    List {
        #[clap(long, value_enum)]
        day: Option<Weekday>,
    },
    /// Create a workout plan from favorited exercises.
    Create {
        #[clap(long)]
        name: String,

        /// May be given multiple times; at least one is required.
        #[clap(long = "day", value_enum)]
        days: Vec<Weekday>,

        /// Favorite exercise ids to include; may be given multiple times.
        #[clap(long = "exercise")]
        exercises: Vec<String>,
    },
    /// Replace name, days and exercises of an existing plan.
    Update {
        plan_id: String,

        #[clap(long)]
        name: String,

        #[clap(long = "day", value_enum)]
        days: Vec<Weekday>,

        #[clap(long = "exercise")]
        exercises: Vec<String>,
    },
    /// Delete a workout plan.
    Delete { plan_id: String },
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;

    let config = AppConfig::resolve(
        &CliConfig {
            db_path: cli_args.db.clone(),
            ephemeral: cli_args.ephemeral,
            api_key: cli_args.api_key.clone(),
        },
        file_config,
    )?;

    let store: Arc<dyn ScopedStore> = match &config.db_path {
        Some(path) => Arc::new(SqliteScopedStore::new(path)?),
        None => Arc::new(MemoryScopedStore::new()),
    };

    let session = Session::new(store);
    session
        .identity
        .resolve(cli_args.user.as_ref().map(|user_id| Identity {
            user_id: user_id.clone(),
            display_name: cli_args
                .display_name
                .clone()
                .unwrap_or_else(|| user_id.clone()),
            created_at: Utc::now(),
        }));

    match cli_args.command {
        Command::Exercises {
            search,
            body_part,
            limit,
            offset,
        } => {
            let client = catalog_client(&config)?;
            let page = client
                .fetch_page(limit.unwrap_or(config.page_size), offset)
                .context("Failed to fetch exercises")?;

            let filter = ExerciseFilter {
                search,
                body_part: BodyPartFilter::parse(&body_part),
            };
            let exercises = filter.filter(page);

            if exercises.is_empty() {
                println!("No exercises matched.");
            }
            for exercise in &exercises {
                print_exercise_row(exercise);
            }
        }

        Command::Show { id } => {
            let client = catalog_client(&config)?;
            let exercise = client.fetch_by_id(&id).context("Failed to fetch exercise")?;

            print_exercise_row(&exercise);
            if !exercise.secondary_muscles.is_empty() {
                println!("  secondary: {}", exercise.secondary_muscles.join(", "));
            }
            for (i, instruction) in exercise.instructions.iter().enumerate() {
                println!("  {}. {}", i + 1, instruction);
            }
        }

        Command::Favorites { action } => match action {
            FavoritesAction::List => {
                let favorites = session.favorites.favorites();
                println!("{} favorite(s)", favorites.len());
                for exercise in &favorites {
                    print_exercise_row(exercise);
                }
            }
            FavoritesAction::Add { id } => {
                let exercise = catalog_client(&config)?
                    .fetch_by_id(&id)
                    .context("Failed to fetch exercise")?;
                let name = exercise.name.clone();
                session.favorites.add(exercise)?;
                println!("Added \"{}\" to favorites.", name);
            }
            FavoritesAction::Remove { id } => {
                session.favorites.remove(&id);
                println!("Removed {} from favorites.", id);
            }
            FavoritesAction::Toggle { id } => {
                let exercise = catalog_client(&config)?
                    .fetch_by_id(&id)
                    .context("Failed to fetch exercise")?;
                session.favorites.toggle(exercise)?;
                let status = if session.favorites.is_favorite(&id) {
                    "now a favorite"
                } else {
                    "no longer a favorite"
                };
                println!("{} is {}.", id, status);
            }
            FavoritesAction::Clear => {
                session.favorites.clear();
                println!("Favorites cleared.");
            }
        },

        Command::Plans { action } => match action {
            PlansAction::List { day } => {
                let plans = match day {
                    Some(day) => session.plans.list_by_day(day),
                    None => session.plans.plans(),
                };
                println!("{} plan(s)", plans.len());
                for plan in &plans {
                    print_plan(plan);
                }
            }
            PlansAction::Create {
                name,
                days,
                exercises,
            } => {
                let snapshots = resolve_from_favorites(&session, &exercises)?;
                let plan = session.plans.create(&name, &days, snapshots)?;
                println!("Created plan \"{}\" (id {}).", plan.name, plan.id);
            }
            PlansAction::Update {
                plan_id,
                name,
                days,
                exercises,
            } => {
                let snapshots = resolve_from_favorites(&session, &exercises)?;
                let plan = session.plans.update(&plan_id, &name, &days, snapshots)?;
                println!("Updated plan \"{}\" (id {}).", plan.name, plan.id);
            }
            PlansAction::Delete { plan_id } => {
                session.plans.delete(&plan_id)?;
                println!("Deleted plan {}.", plan_id);
            }
        },
    }

    Ok(())
}

fn catalog_client(config: &AppConfig) -> Result<ExerciseDbClient> {
    let Some(api_key) = &config.api_key else {
        bail!(
            "No catalog API key configured; pass --api-key or set {}",
            fitzone_client::config::API_KEY_ENV_VAR
        );
    };
    Ok(ExerciseDbClient::new(
        &config.api_base_url,
        &config.api_host,
        api_key,
        Duration::from_secs(config.fetch_timeout_sec),
    )?)
}

/// Plans are composed from favorites: every requested id must be in the
/// current favorites collection, mirroring the selection form of the app.
fn resolve_from_favorites(session: &Session, exercise_ids: &[String]) -> Result<Vec<Exercise>> {
    let favorites = session.favorites.favorites();
    let mut snapshots = Vec::with_capacity(exercise_ids.len());
    for id in exercise_ids {
        match favorites.iter().find(|favorite| &favorite.id == id) {
            Some(favorite) => snapshots.push(favorite.clone()),
            None => bail!("Exercise {} is not in favorites; favorite it first", id),
        }
    }
    Ok(snapshots)
}

fn print_exercise_row(exercise: &Exercise) {
    println!(
        "{}  {}  [{} / {} / {}]",
        exercise.id, exercise.name, exercise.body_part, exercise.target, exercise.equipment
    );
}

fn print_plan(plan: &WorkoutPlan) {
    let days: Vec<&str> = plan.days.iter().map(|day| day.as_str()).collect();
    println!(
        "{}  {}  [{}]  {} exercise(s)",
        plan.id,
        plan.name,
        days.join(", "),
        plan.exercises.len()
    );
    for exercise in &plan.exercises {
        println!("    - {} ({})", exercise.name, exercise.id);
    }
}
