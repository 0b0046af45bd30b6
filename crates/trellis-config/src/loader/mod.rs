//! Locating and loading dependency descriptions

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;
use trellis_core::error::TrellisError;
use trellis_core::types::DependencySet;

use crate::ConfigResult;

/// Environment variable pointing at a description file
pub const DESCRIPTION_ENV: &str = "TRELLIS_DEPENDENCIES";

/// File names searched for, in priority order
pub const DESCRIPTION_FILES: [&str; 2] = ["Dependencies.toml", "Dependencies.json"];

/// Where a description was found
#[derive(Debug, Clone, PartialEq)]
pub enum DescriptionSource {
    /// Path given on the command line
    Explicit(Utf8PathBuf),
    /// Path taken from `TRELLIS_DEPENDENCIES`
    Environment(Utf8PathBuf),
    /// File found while walking up from the working directory
    Discovered(Utf8PathBuf),
}

impl DescriptionSource {
    pub fn path(&self) -> &Utf8Path {
        match self {
            DescriptionSource::Explicit(path)
            | DescriptionSource::Environment(path)
            | DescriptionSource::Discovered(path) => path,
        }
    }
}

/// Resolves and loads the dependency description of a project
pub struct DescriptionLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
    /// Value of `TRELLIS_DEPENDENCIES`, if set
    env_override: Option<Utf8PathBuf>,
}

impl DescriptionLoader {
    /// Create a loader rooted at `cwd`, without environment overrides
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self {
            cwd,
            env_override: None,
        }
    }

    /// Create a loader that honours `TRELLIS_DEPENDENCIES`
    pub fn from_env(cwd: Utf8PathBuf) -> Self {
        let env_override = std::env::var(DESCRIPTION_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(Utf8PathBuf::from);
        Self::new(cwd).with_env_override(env_override)
    }

    pub fn with_env_override(mut self, path: Option<Utf8PathBuf>) -> Self {
        self.env_override = path;
        self
    }

    /// Resolve the description path: explicit path, then environment, then
    /// the nearest description file in `cwd` or its ancestors.
    pub fn resolve(&self, explicit: Option<&Utf8Path>) -> ConfigResult<DescriptionSource> {
        if let Some(path) = explicit {
            return Ok(DescriptionSource::Explicit(self.absolute(path)));
        }

        if let Some(path) = &self.env_override {
            return Ok(DescriptionSource::Environment(self.absolute(path)));
        }

        self.discover()
            .map(DescriptionSource::Discovered)
            .ok_or_else(|| TrellisError::ConfigValidation {
                field: "dependencies".to_string(),
                reason: format!(
                    "No {} found in {} or parent directories",
                    DESCRIPTION_FILES.join(" or "),
                    self.cwd
                ),
            })
    }

    /// Resolve and load the description
    pub async fn load(
        &self,
        explicit: Option<&Utf8Path>,
    ) -> ConfigResult<(DependencySet, DescriptionSource)> {
        let source = self.resolve(explicit)?;
        debug!(path = %source.path(), "loading dependency description");

        let dependencies = crate::description::load_from_file(source.path()).await?;
        Ok((dependencies, source))
    }

    /// Find a description file (walks up directory tree)
    fn discover(&self) -> Option<Utf8PathBuf> {
        let mut current = Some(self.cwd.as_path());

        while let Some(dir) = current {
            for name in DESCRIPTION_FILES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            current = dir.parent();
        }

        None
    }

    fn absolute(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}
