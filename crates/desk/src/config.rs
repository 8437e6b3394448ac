use std::time::Duration;

use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::{Args as ClapArgs, Parser, Subcommand};
use engine::{AddOn, Money};
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/glamp_desk.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// IANA name; "today" for the check-in rule is taken in this zone.
    pub timezone: String,
    pub debounce_ms: u64,
    pub request_timeout_secs: u64,
    /// Guest ceiling while the selected glamp reports no capacity.
    pub default_max_guests: u32,
    pub level: String,
    pub add_ons: Vec<AddOnConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddOnConfig {
    pub id: String,
    pub name: String,
    /// Price in major units, e.g. `"25"` or `"12.50"`.
    pub price: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000/api".to_string(),
            timezone: "Europe/Rome".to_string(),
            debounce_ms: 400,
            request_timeout_secs: 10,
            default_max_guests: 10,
            level: "info".to_string(),
            add_ons: vec![
                AddOnConfig {
                    id: "breakfast".to_string(),
                    name: "Breakfast basket".to_string(),
                    price: "25".to_string(),
                },
                AddOnConfig {
                    id: "firewood".to_string(),
                    name: "Firewood bundle".to_string(),
                    price: "15".to_string(),
                },
            ],
        }
    }
}

impl AppConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|err| AppError::Setting(format!("timezone {:?}: {err}", self.timezone)))
    }

    /// Current calendar date in the configured timezone.
    pub fn today(&self) -> Result<NaiveDate> {
        let tz = self.timezone()?;
        Ok(chrono::Utc::now().with_timezone(&tz).date_naive())
    }

    pub fn add_on_catalog(&self) -> Result<Vec<AddOn>> {
        self.add_ons
            .iter()
            .map(|entry| {
                let price = entry
                    .price
                    .parse::<Money>()
                    .map_err(|err| AppError::Setting(format!("add-on {}: {err}", entry.id)))?;
                Ok(AddOn {
                    id: entry.id.clone(),
                    name: entry.name.clone(),
                    price,
                })
            })
            .collect()
    }
}

#[derive(Debug, Parser)]
#[command(name = "glamp_desk", disable_version_flag = true)]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000/api).
    #[arg(long)]
    pub base_url: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    pub timezone: Option<String>,
    /// Override log level.
    #[arg(long)]
    pub level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List bookable glamps.
    Catalog,
    /// Check whether a glamp is free for a stay.
    Check(StayArgs),
    /// Create a booking.
    Book(BookArgs),
}

#[derive(Debug, Clone, ClapArgs)]
pub struct StayArgs {
    #[arg(long)]
    pub glamp: String,
    /// Check-in date (YYYY-MM-DD).
    #[arg(long)]
    pub check_in: NaiveDate,
    /// Check-out date (YYYY-MM-DD).
    #[arg(long)]
    pub check_out: NaiveDate,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct BookArgs {
    #[command(flatten)]
    pub stay: StayArgs,
    /// Out-of-range values are clamped to the glamp capacity.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub guests: i64,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    /// Add-on id; repeat for more than one.
    #[arg(long = "add-on")]
    pub add_ons: Vec<String>,
    #[arg(long)]
    pub requests: Option<String>,
}

/// Layers the TOML file, `GLAMP_DESK_*` variables and CLI flags, later
/// sources winning.
pub fn load(args: &Args) -> Result<AppConfig> {
    load_with_env(args, None)
}

/// `env` replaces the process environment when given.
fn load_with_env(args: &Args, env: Option<config::Map<String, String>>) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("GLAMP_DESK").source(env));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = &args.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(timezone) = &args.timezone {
        settings.timezone = timezone.clone();
    }
    if let Some(level) = &args.level {
        settings.level = level.clone();
    }

    Ok(settings)
}
