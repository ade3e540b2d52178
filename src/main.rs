// Copyright 2023 Remi Bernotavicius

use clap::Parser;
use clap::Subcommand;
use diet_planner::config::{self, Config};
use diet_planner::database::models::{
    CategoryForm, CategoryId, IngredientForm, IngredientId, ProfileForm, ProfileId, UserForm, UserId,
};
use diet_planner::store::DeleteReport;
use diet_planner::{database, generation, store};
use std::path::PathBuf;
use std::process::ExitCode;
use thousands::Separable as _;

type Error = Box<dyn std::error::Error + Send + Sync + 'static>;
type Result<T> = std::result::Result<T, Error>;

#[derive(Parser, Debug)]
struct Args {
    /// The SQLite database to use. Defaults to one in the user data directory.
    #[arg(long, env = config::DATABASE_ENV)]
    database: Option<PathBuf>,

    #[arg(long, env = config::LOG_ENV, default_value_t = log::LevelFilter::Info)]
    log_level: log::LevelFilter,

    #[command(subcommand)]
    commands: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    AddCategory {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    ListCategories,
    DeleteCategory {
        id: i32,
    },
    AddIngredient {
        name: String,
        calories: i32,
        #[arg(long)]
        category: Option<i32>,
    },
    ListIngredients,
    DeleteIngredient {
        id: i32,
    },
    AddProfile {
        kind: String,
    },
    AddUser {
        username: String,
        #[arg(long)]
        profile: i32,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
    DeleteUser {
        id: i32,
    },
    /// Stores a recipe the generator produced for `prompt`, read from `path` as JSON.
    ImportGeneratedRecipe {
        #[arg(long)]
        prompt: String,
        path: PathBuf,
    },
}

fn print_report(report: &DeleteReport) {
    for (table, ids) in &report.deleted {
        println!("deleted {} {table}", ids.len());
    }
    if report.nullified > 0 {
        println!("cleared {} references", report.nullified);
    }
}

fn run(conn: &mut database::Connection, command: Commands) -> Result<()> {
    match command {
        Commands::AddCategory { name, description } => {
            let category = store::create_category(conn, &CategoryForm { name, description })?;
            println!("{}\t{}", category.id, category.name);
        }
        Commands::ListCategories => {
            for category in store::list_categories(conn)? {
                println!(
                    "{}\t{}\t{}",
                    category.id,
                    category.name,
                    category.description.unwrap_or_default()
                );
            }
        }
        Commands::DeleteCategory { id } => {
            print_report(&store::delete_category(conn, CategoryId::new(id))?);
        }
        Commands::AddIngredient {
            name,
            calories,
            category,
        } => {
            let ingredient = store::create_ingredient(
                conn,
                &IngredientForm {
                    name,
                    calories,
                    category_id: category.map(CategoryId::new),
                },
            )?;
            println!("{}\t{}", ingredient.id, ingredient.name);
        }
        Commands::ListIngredients => {
            for ingredient in store::list_ingredients(conn)? {
                let category = match ingredient.category_id {
                    Some(id) => store::get_category(conn, id)?.name,
                    None => String::new(),
                };
                println!(
                    "{}\t{}\t{} kcal\t{category}",
                    ingredient.id,
                    ingredient.name,
                    ingredient.calories.separate_with_commas()
                );
            }
        }
        Commands::DeleteIngredient { id } => {
            print_report(&store::delete_ingredient(conn, IngredientId::new(id))?);
        }
        Commands::AddProfile { kind } => {
            let profile = store::create_profile(conn, &ProfileForm { kind })?;
            println!("{}\t{}", profile.id, profile.kind);
        }
        Commands::AddUser {
            username,
            profile,
            email,
            first_name,
            last_name,
        } => {
            let user = store::create_user(
                conn,
                &UserForm {
                    email,
                    first_name,
                    last_name,
                    ..UserForm::new(username, ProfileId::new(profile))
                },
            )?;
            println!("{}\t{}", user.id, user.username);
        }
        Commands::DeleteUser { id } => {
            print_report(&store::delete_user(conn, UserId::new(id))?);
        }
        Commands::ImportGeneratedRecipe { prompt, path } => {
            let raw = std::fs::read_to_string(&path)?;
            let recipe = generation::store_generated_recipe(conn, &prompt, &raw)?;
            println!("{}\t{}", recipe.id, recipe.title);
        }
    }
    Ok(())
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    let config = Config::new(args.database, args.log_level)?;
    config.init_logging()?;
    config.create_data_dir()?;
    let mut conn = database::establish_connection(&config.database_path)?;
    run(&mut conn, args.commands)
}

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
