//! JSON ledger documents
//!
//! A document is the host's snapshot of one session: optional project info
//! plus the rows of every non-empty component. Loading replays the rows
//! through `set_rows`, so validation and emission recomputation always apply.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use beam_domain::model::{MaterialLedger, ProjectInfo, RowInput};
use beam_types::{Component, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Rows of a single component as stored in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRows {
    pub component: Component,
    #[serde(default)]
    pub rows: Vec<RowInput>,
}

/// Serialized form of a ledger and its project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectInfo>,

    #[serde(default)]
    pub components: Vec<ComponentRows>,
}

impl LedgerDocument {
    /// Snapshot a ledger; empty components are omitted
    pub fn from_ledger(ledger: &MaterialLedger, project: Option<&ProjectInfo>) -> Self {
        let components = ledger
            .components()
            .filter(|(_, rows)| !rows.is_empty())
            .map(|(component, rows)| ComponentRows {
                component,
                rows: rows.iter().map(RowInput::from).collect(),
            })
            .collect();

        Self {
            project: project.cloned(),
            components,
        }
    }

    /// Rebuild the ledger, validating every row
    pub fn into_ledger(self) -> Result<(MaterialLedger, Option<ProjectInfo>)> {
        let mut ledger = MaterialLedger::new();
        for entry in &self.components {
            if !ledger.get_rows(entry.component).is_empty() {
                warn!(
                    component = entry.component.label(),
                    "component listed more than once, later entry replaces earlier"
                );
            }
            if let Err(err) = ledger.set_rows(entry.component, &entry.rows) {
                warn!(component = entry.component.label(), error = %err, "rejected rows in ledger document");
                return Err(err.into());
            }
        }

        if let Some(project) = &self.project {
            project.validate()?;
        }

        Ok((ledger, self.project))
    }
}

/// A ledger document at a fixed path
pub struct LedgerFile {
    path: PathBuf,
}

impl LedgerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the document and rebuild the ledger
    pub fn load(&self) -> Result<(MaterialLedger, Option<ProjectInfo>)> {
        if !self.path.exists() {
            return Err(Error::FileNotFound(format!(
                "Ledger file not found: {}",
                self.path.display()
            )));
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let document: LedgerDocument = serde_json::from_reader(reader)?;
        document.into_ledger()
    }

    /// Write the ledger and project, creating parent directories as needed
    pub fn save(&self, ledger: &MaterialLedger, project: Option<&ProjectInfo>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let document = LedgerDocument::from_ledger(ledger, project);
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &document)?;
        info!(path = %self.path.display(), rows = ledger.row_count(), "ledger saved");
        Ok(())
    }
}
