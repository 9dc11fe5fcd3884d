//! Runtime configuration shared by the daemon and admin subcommands.
//!
//! Resolution order: built-in defaults, then `.quilld.toml`, then `QUILLD_`
//! environment variables, then CLI flags.

use std::ffi::OsString;

use clap::{Args, Parser, Subcommand};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "QUILLD_";
/// Optional configuration dotfile, resolved against the working directory.
pub const CONFIG_FILE: &str = ".quilld.toml";

/// Failure while resolving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Figment(#[from] figment::Error),
    #[error(transparent)]
    Cli(#[from] clap::Error),
}

/// Fully resolved runtime configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Server bind address.
    pub bind: String,
    /// Database connection string or path.
    pub database: String,
    /// Platform base domain that public sites hang off.
    pub base_domain: String,
    /// Reserved host key for the dashboard subdomain.
    pub dashboard_host: String,
    /// Base language of untranslated content.
    pub default_lang: String,
    /// Language codes published on public sites.
    pub languages: Vec<String>,
    /// Cache-invalidation hook endpoint; revalidation is a logged no-op when
    /// unset.
    pub revalidate_endpoint: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_owned(),
            database: "quilld.db".to_owned(),
            base_domain: "localhost".to_owned(),
            dashboard_host: "app".to_owned(),
            default_lang: "en".to_owned(),
            languages: vec!["en".to_owned()],
            revalidate_endpoint: None,
        }
    }
}

impl AppConfig {
    /// Resolve the configuration from defaults, dotfile, environment, and
    /// CLI overrides.
    ///
    /// # Errors
    /// Returns an error when a layer fails to parse or deserialize.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;
        overrides.apply(&mut config);
        Ok(config)
    }

    /// Resolve the configuration from an explicit argument list.
    ///
    /// # Errors
    /// Returns an error when argument parsing or a configuration layer fails.
    pub fn load_from_iter<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        Self::load(&cli.config)
    }
}

/// CLI-level configuration flags; unset flags defer to the other layers.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Server bind address.
    #[arg(long)]
    pub bind: Option<String>,
    /// Database connection string or path.
    #[arg(long)]
    pub database: Option<String>,
    /// Platform base domain that public sites hang off.
    #[arg(long)]
    pub base_domain: Option<String>,
    /// Reserved host key for the dashboard subdomain.
    #[arg(long)]
    pub dashboard_host: Option<String>,
    /// Base language of untranslated content.
    #[arg(long)]
    pub default_lang: Option<String>,
    /// Published language code; repeat for several.
    #[arg(long = "language")]
    pub languages: Vec<String>,
    /// Cache-invalidation hook endpoint.
    #[arg(long)]
    pub revalidate_endpoint: Option<String>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }
        if let Some(database) = &self.database {
            config.database = database.clone();
        }
        if let Some(base_domain) = &self.base_domain {
            config.base_domain = base_domain.clone();
        }
        if let Some(dashboard_host) = &self.dashboard_host {
            config.dashboard_host = dashboard_host.clone();
        }
        if let Some(default_lang) = &self.default_lang {
            config.default_lang = default_lang.clone();
        }
        if !self.languages.is_empty() {
            config.languages = self.languages.clone();
        }
        if let Some(endpoint) = &self.revalidate_endpoint {
            config.revalidate_endpoint = Some(endpoint.clone());
        }
    }
}

/// Arguments for the `create-site` administrative subcommand.
#[derive(Args, Debug, Clone)]
pub struct CreateSiteArgs {
    /// Display name for the new site.
    pub name: String,
    /// Subdomain key under the platform base domain.
    #[arg(long)]
    pub subdomain: Option<String>,
    /// Dedicated custom domain.
    #[arg(long)]
    pub custom_domain: Option<String>,
}

/// Arguments for the `paths` administrative subcommand.
#[derive(Args, Debug, Clone)]
pub struct PathsArgs {
    /// Host key (subdomain) or custom domain of the site.
    pub host: String,
}

/// Arguments for the `revalidate` administrative subcommand.
#[derive(Args, Debug, Clone)]
pub struct RevalidateArgs {
    /// Host key (subdomain) or custom domain of the site.
    pub host: String,
    /// Slug path of the mutated category, e.g. `/shoes/running`.
    pub category_path: String,
}

/// CLI subcommands exposed by `quilld`.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a new tenant site.
    #[command(name = "create-site")]
    CreateSite(CreateSiteArgs),
    /// List every tenant site.
    Sites,
    /// Print a site's enumerated content paths.
    Paths(PathsArgs),
    /// Fire cache revalidation for a mutated category.
    Revalidate(RevalidateArgs),
}

/// Top-level CLI entry point consumed by the binary.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Cli {
    /// Configuration flags.
    #[command(flatten)]
    pub config: ConfigOverrides,
    /// Optional administrative subcommand.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
