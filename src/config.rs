// Copyright 2023 Remi Bernotavicius

use std::path::PathBuf;

pub const DATABASE_ENV: &str = "DIET_PLANNER_DATABASE";
pub const LOG_ENV: &str = "DIET_PLANNER_LOG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to find the user home directory")]
    NoHomeDirectory,

    #[error("failed to create {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to initialize logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    pub log_level: log::LevelFilter,
}

/// This is where the database lives on-disk when no path is given. On Linux it should be like:
/// `~/.local/share/diet_planner/`
pub fn data_path() -> Result<PathBuf, ConfigError> {
    let dirs = directories::BaseDirs::new().ok_or(ConfigError::NoHomeDirectory)?;
    Ok(dirs.data_dir().join("diet_planner"))
}

impl Config {
    /// `database` is the explicitly requested path, if any. The command line fills it from the
    /// flag or [`DATABASE_ENV`].
    pub fn new(database: Option<PathBuf>, log_level: log::LevelFilter) -> Result<Self, ConfigError> {
        let database_path = match database {
            Some(path) => path,
            None => data_path()?.join("data.sqlite"),
        };
        Ok(Self {
            database_path,
            log_level,
        })
    }

    /// Creates the directory the database goes in.
    pub fn create_data_dir(&self) -> Result<(), ConfigError> {
        let Some(parent) = self.database_path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDirectory {
            path: parent.to_owned(),
            source,
        })
    }

    pub fn init_logging(&self) -> Result<(), ConfigError> {
        simple_logger::SimpleLogger::new()
            .with_level(self.log_level)
            .init()?;
        Ok(())
    }
}

#[test]
fn explicit_database_path() {
    let config = Config::new(Some("/tmp/meals.sqlite".into()), log::LevelFilter::Debug).unwrap();
    assert_eq!(config.database_path, PathBuf::from("/tmp/meals.sqlite"));
    assert_eq!(config.log_level, log::LevelFilter::Debug);
}

#[test]
fn default_database_path() {
    if directories::BaseDirs::new().is_none() {
        return;
    }
    let config = Config::new(None, log::LevelFilter::Info).unwrap();
    assert!(config.database_path.ends_with("diet_planner/data.sqlite"));
}

#[test]
fn data_dir_is_created() {
    let dir = std::env::temp_dir().join(format!("diet-planner-config-{}", std::process::id()));
    let config = Config::new(
        Some(dir.join("nested").join("data.sqlite")),
        log::LevelFilter::Off,
    )
    .unwrap();
    config.create_data_dir().unwrap();
    assert!(dir.join("nested").is_dir());
    std::fs::remove_dir_all(&dir).unwrap();

    // A bare file name goes in the working directory.
    let config = Config::new(Some("data.sqlite".into()), log::LevelFilter::Off).unwrap();
    config.create_data_dir().unwrap();
}
