use std::{fs, path::Path};

use miette::{Context, IntoDiagnostic};
use serde::{Deserialize, Serialize};

/// Which classification dimensions the engine computes at the frontier.
///
/// A disabled dimension is never queried and its counter stays at zero. This
/// matters for `checkmates`: it is the only dimension that has to apply the
/// move to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    pub captures: bool,
    /// En passant moves always count as captures too, even with `captures` off.
    pub en_passant: bool,
    pub castling: bool,
    pub checks: bool,
    pub checkmates: bool,
    pub promotions: bool,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self::full()
    }
}

impl ClassifyConfig {
    pub const fn full() -> Self {
        Self {
            captures: true,
            en_passant: true,
            castling: true,
            checks: true,
            checkmates: true,
            promotions: true,
        }
    }

    /// Captures, en passant and castling only. The older divide fixture
    /// format, before checks and promotions were tracked.
    pub const fn legacy() -> Self {
        Self {
            captures: true,
            en_passant: true,
            castling: true,
            checks: false,
            checkmates: false,
            promotions: false,
        }
    }

    pub const fn nodes_only() -> Self {
        Self {
            captures: false,
            en_passant: false,
            castling: false,
            checks: false,
            checkmates: false,
            promotions: false,
        }
    }

    pub fn from_toml_str(s: &str) -> miette::Result<Self> {
        toml::from_str(s)
            .into_diagnostic()
            .context("Parsing classification config")
    }

    /// Save to TOML File
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> miette::Result<()> {
        let toml_string = toml::to_string_pretty(self).into_diagnostic()?;
        fs::write(path.as_ref(), toml_string)
            .into_diagnostic()
            .wrap_err_with(|| format!("Writing config to {}", path.as_ref().display()))
    }

    /// Load from a TOML File
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> miette::Result<Self> {
        let file_content = fs::read_to_string(path.as_ref())
            .into_diagnostic()
            .wrap_err_with(|| format!("Reading config from {}", path.as_ref().display()))?;
        Self::from_toml_str(&file_content)
    }
}
