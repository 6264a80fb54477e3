use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Template with `${plant}`, `${start}`, `${end}`.
    pub daily_energy_path: String,
    /// Template with `${plant}`, `${device}`, `${variable}`, `${start}`, `${end}`.
    pub measures_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    #[serde(default = "default_days")]
    pub default_days: u32,
    /// Longest window a request may ask for, in days.
    #[serde(default = "default_max_days")]
    pub max_days: u32,
    #[serde(default = "default_interval_minutes")]
    pub default_interval_minutes: u32,
    #[serde(default = "default_device_energy_variable")]
    pub device_energy_variable: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            default_days: default_days(),
            max_days: default_max_days(),
            default_interval_minutes: default_interval_minutes(),
            device_energy_variable: default_device_energy_variable(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_days() -> u32 {
    7
}

fn default_max_days() -> u32 {
    366
}

fn default_interval_minutes() -> u32 {
    10
}

fn default_device_energy_variable() -> String {
    "dailyEnergy".to_string()
}

/// Static plant/device catalog and chart metadata.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub palette: Vec<String>,
    #[serde(default)]
    pub plants: Vec<PlantConfig>,
    #[serde(default)]
    pub variables: Vec<VariableConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlantConfig {
    pub id: String,
    pub name: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DeviceConfig {
    pub id: String,
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VariableConfig {
    pub name: String,
    pub title: String,
    pub unit: Option<String>,
}

/// `config/solar.*`, overridable with `SOLAR__SECTION__KEY` environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/solar"))
        .add_source(config::Environment::with_prefix("SOLAR").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_catalog_config() -> anyhow::Result<CatalogConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/catalog"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Replace template variables in an endpoint path
pub fn prepare_query(query: &str, vars: &HashMap<String, String>) -> String {
    let mut result = query.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}
