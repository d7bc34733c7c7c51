//! Administrative import of agreement bundles.
//!
//! The [`AgreementLoader`] reads an agreement bundle from a YAML directory
//! and installs it into an [`AgreementStore`], replaying the bundle's rate
//! files as an effective-dated version history.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Agreement, AgreementStatus, RateVersion, VersionChange};
use crate::store::AgreementStore;

use super::types::{AgreementBundle, AgreementFile, RateFile};

/// Loads agreement bundles from disk.
///
/// # Directory Structure
///
/// ```text
/// config/ma000018/
/// ├── agreement.yaml   # Metadata, classifications, penalty/overtime tables
/// └── rates/
///     ├── 2025-07-01.yaml  # Rates effective from this date
///     └── 2026-07-01.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use agreement_engine::config::AgreementLoader;
///
/// let loader = AgreementLoader::load("./config/ma000018").unwrap();
/// println!("Loaded agreement: {}", loader.bundle().agreement().name);
/// ```
#[derive(Debug, Clone)]
pub struct AgreementLoader {
    bundle: AgreementBundle,
}

impl AgreementLoader {
    /// Loads an agreement bundle from the specified directory.
    ///
    /// Fails with `ConfigNotFound` if `agreement.yaml` or the `rates/`
    /// directory is missing (or contains no rate files), and with
    /// `ConfigParse` if any file does not deserialize.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let agreement_path = path.join("agreement.yaml");
        let agreement = Self::load_yaml::<AgreementFile>(&agreement_path)?;

        let rates_dir = path.join("rates");
        let rate_files = Self::load_rate_files(&rates_dir)?;

        Ok(Self {
            bundle: AgreementBundle::new(agreement, rate_files),
        })
    }

    /// Loads and parses one YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParse {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the bundle's `rates/` directory.
    fn load_rate_files(rates_dir: &Path) -> EngineResult<Vec<RateFile>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rate_files = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                rate_files.push(Self::load_yaml::<RateFile>(&path)?);
            }
        }

        if rate_files.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rate_files)
    }

    /// Returns the loaded bundle.
    pub fn bundle(&self) -> &AgreementBundle {
        &self.bundle
    }

    /// Builds the domain [`Agreement`] from the bundle. Imported
    /// agreements start active; expiry is a separate administrative step.
    pub fn agreement(&self) -> Agreement {
        let file = self.bundle.agreement();
        Agreement {
            id: file.id.clone(),
            kind: file.kind,
            name: file.name.clone(),
            status: AgreementStatus::Active,
            regions: file.regions.clone(),
            industries: file.industries.clone(),
            classifications: file.classifications.clone(),
            penalties: file.penalties.clone(),
            overtime: file.overtime.clone(),
            loadings: file.loadings.clone(),
            allowances: file.allowances.clone(),
            leave_entitlements: file.leave_entitlements.clone(),
            superannuation_percent: file.superannuation_percent,
            casual_loading_percent: file.casual_loading_percent,
        }
    }

    /// Installs the bundle into a store: the agreement with its oldest
    /// rate file as the initial version, then one version snapshot per
    /// later rate file, in effective-date order.
    ///
    /// Returns the created versions, oldest first. Audit events and any
    /// triggered alerts flow through the store's ledger as for any other
    /// mutation.
    pub fn install(&self, store: &AgreementStore, actor: &str) -> EngineResult<Vec<RateVersion>> {
        let agreement = self.agreement();
        let agreement_id = agreement.id.clone();
        let rate_files = self.bundle.rate_files();

        // load() guarantees at least one rate file.
        let first = &rate_files[0];
        let mut versions = vec![store.insert_agreement(
            agreement,
            first.effective_from,
            first.reference.clone(),
            first.rates.clone(),
            actor,
        )?];

        for window in rate_files.windows(2) {
            let (previous, next) = (&window[0], &window[1]);
            versions.push(store.create_version_snapshot(
                &agreement_id,
                next.effective_from,
                next.reference.clone(),
                rate_changes(previous, next),
                next.rates.clone(),
                actor,
            )?);
        }

        info!(
            agreement_id,
            versions = versions.len(),
            actor,
            "installed agreement bundle"
        );

        Ok(versions)
    }
}

/// Field-level diff between two consecutive rate files.
fn rate_changes(previous: &RateFile, next: &RateFile) -> Vec<VersionChange> {
    let mut changes: Vec<VersionChange> = next
        .rates
        .iter()
        .filter_map(|(code, new_rate)| {
            let previous_rate = previous.rates.get(code);
            if previous_rate == Some(new_rate) {
                return None;
            }
            Some(VersionChange {
                field: format!("rates.{code}.hourly"),
                previous_value: previous_rate
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "none".to_string()),
                new_value: new_rate.to_string(),
            })
        })
        .collect();

    // Rates present before but dropped in the new file.
    for (code, old_rate) in &previous.rates {
        if !next.rates.contains_key(code) {
            changes.push(VersionChange {
                field: format!("rates.{code}.hourly"),
                previous_value: old_rate.to_string(),
                new_value: "none".to_string(),
            });
        }
    }

    changes.sort_by(|a, b| a.field.cmp(&b.field));
    changes
}
