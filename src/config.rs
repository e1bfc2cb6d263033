use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::model::{Department, Regulation};

/// Deployment configuration: backend location plus the department and
/// regulation catalogs. Departments and regulations are data, not business
/// logic; the defaults mirror the reference deployment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub departments: Vec<Department>,
    pub regulations: Vec<Regulation>,
}

impl Default for Settings {
    fn default() -> Self {
        let departments = [
            "CSE",
            "IT",
            "AIDS",
            "AIML",
            "CyberSecurity",
            "CSBS",
            "MECH",
            "MCT",
            "ECE",
            "EEE",
            "VLSI",
            "BME",
            "ACT",
            "CIVIL",
        ]
        .iter()
        .enumerate()
        .map(|(index, name)| Department {
            id: index as u32 + 1,
            name: (*name).to_string(),
        })
        .collect();

        // Chronological display order.
        let regulations = ["R21", "R22", "R22R", "R24"]
            .iter()
            .map(|code| Regulation((*code).to_string()))
            .collect();

        Self {
            base_url: "http://localhost:5000/api".to_string(),
            departments,
            regulations,
        }
    }
}

impl Settings {
    pub fn department(&self, name: &str) -> Option<&Department> {
        self.departments.iter().find(|dept| dept.name == name)
    }

    pub fn regulation(&self, code: &str) -> Option<&Regulation> {
        self.regulations.iter().find(|reg| reg.as_str() == code)
    }

    /// The regulation selected before the user touches the selector: the
    /// first (oldest) configured code.
    pub fn default_regulation(&self) -> &Regulation {
        &self.regulations[0]
    }
}

/// Load settings from defaults, then an optional TOML file, then env vars.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = match config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        }
        None => Settings::default(),
    };

    if let Ok(value) = std::env::var("DASHBOARD_BASE_URL") {
        settings.base_url = value;
    }

    if settings.regulations.is_empty() {
        anyhow::bail!("configuration must list at least one regulation");
    }
    if settings.departments.is_empty() {
        anyhow::bail!("configuration must list at least one department");
    }

    Ok(settings)
}
