use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use lugat_config::Config;
use serde::{Deserialize, Serialize};

const REPO_DEFAULT_CONFIG: &str = "config.json";

/// Load `config.json` from the working directory, or the built-in defaults
fn load_repo_default_config() -> anyhow::Result<Config> {
    let path = Path::new(REPO_DEFAULT_CONFIG);
    if !path.exists() {
        tracing::debug!("No {REPO_DEFAULT_CONFIG}, using built-in defaults");
        return Ok(Config::new());
    }

    tracing::info!("Loading repo default config...");
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse {REPO_DEFAULT_CONFIG}"))?;
    Ok(config)
}

/// Root of per-user configuration
fn lugat_root() -> anyhow::Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("lugat"))
        .context("Failed to locate the user config directory")
}

fn profiles_dir() -> anyhow::Result<PathBuf> {
    Ok(lugat_root()?.join("profiles"))
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Profiles stored as `<name>.json` in one directory
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store under the user config directory
    pub fn user() -> anyhow::Result<Self> {
        Ok(Self::new(profiles_dir()?))
    }

    fn profile_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Create the profiles folder and main profile if missing
    pub fn init(
        &self,
        default_config: impl FnOnce() -> anyhow::Result<Config>,
    ) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let main_profile = self.profile_path("main");

        if !main_profile.exists() {
            let profile = Profile {
                name: "main".into(),
                value: default_config()?,
            };
            fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
            tracing::info!("Created main profile at {}", main_profile.display());
        }

        Ok(())
    }

    fn read(&self, path: &Path) -> anyhow::Result<Config> {
        let data = fs::read_to_string(path)?;
        let profile: Profile = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse profile {}", path.display()))?;
        Ok(profile.value)
    }

    /// Load a profile by name, defaulting to main if name not found
    pub fn load(&self, name: &str) -> anyhow::Result<Config> {
        let profile_file = self.profile_path(name);

        if profile_file.exists() {
            self.read(&profile_file)
        } else {
            tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
            let main_file = self.profile_path("main");
            if main_file.exists() {
                self.read(&main_file)
            } else {
                load_repo_default_config()
            }
        }
    }

    /// Add a new profile cloned from main
    pub fn add_from_main(&self, new_name: &str) -> anyhow::Result<PathBuf> {
        let profile = Profile {
            name: new_name.into(),
            value: self.load("main")?,
        };
        let file = self.profile_path(new_name);
        fs::write(&file, serde_json::to_string_pretty(&profile)?)?;
        tracing::info!("Created new profile: {new_name}");
        Ok(file)
    }
}

/// Initialize the user profile folder and load the named profile
pub fn load_user_profile(name: &str) -> anyhow::Result<Config> {
    let store = ProfileStore::user()?;
    store.init(load_repo_default_config)?;
    store.load(name)
}
