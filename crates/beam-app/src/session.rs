//! One host session: a ledger, its project, and the document it lives in
//!
//! The core keeps no global state; a host opens a session, applies edits
//! through the ledger, and saves it back.

use std::path::{Path, PathBuf};

use beam_domain::model::{MaterialLedger, ProjectInfo};
use beam_domain::service::aggregate;
use beam_infra::{load_rows_from_csv, LedgerFile};
use beam_types::{Component, Error, Result};
use tracing::info;

use crate::export::{export_with_project, save_report};
use crate::report::EmissionsReport;

pub struct Session {
    file: LedgerFile,
    pub ledger: MaterialLedger,
    pub project: Option<ProjectInfo>,
}

impl Session {
    /// Start a new session document at `path`
    ///
    /// Fails if the document already exists and `overwrite` is false.
    pub fn create(path: impl Into<PathBuf>, seed: bool, overwrite: bool) -> Result<Self> {
        let file = LedgerFile::new(path);
        if file.exists() && !overwrite {
            return Err(Error::InvalidInput(format!(
                "Ledger file already exists: {} (use --force to overwrite)",
                file.path().display()
            )));
        }

        let ledger = if seed {
            MaterialLedger::seeded()
        } else {
            MaterialLedger::new()
        };
        let session = Self {
            file,
            ledger,
            project: None,
        };
        session.save()?;
        info!(path = %session.path().display(), seeded = seed, "ledger created");
        Ok(session)
    }

    /// Open an existing session document
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let file = LedgerFile::new(path);
        let (ledger, project) = file.load()?;
        Ok(Self {
            file,
            ledger,
            project,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn save(&self) -> Result<()> {
        self.file.save(&self.ledger, self.project.as_ref())
    }

    /// Replace a component's rows from a CSV file; returns the row count
    pub fn import_csv(&mut self, component: Component, csv_path: &Path) -> Result<usize> {
        let rows = load_rows_from_csv(csv_path)?;
        self.ledger.set_rows(component, &rows)?;
        info!(component = component.label(), rows = rows.len(), "rows imported");
        Ok(rows.len())
    }

    pub fn report(&self) -> EmissionsReport {
        EmissionsReport::build(&self.ledger, self.project.as_ref())
    }

    /// In-memory xlsx artifact of the current snapshot
    pub fn export(&self) -> Result<Vec<u8>> {
        let summary = aggregate(&self.ledger);
        export_with_project(&self.ledger, &summary, self.project.as_ref())
    }

    pub fn save_report(&self, output_path: &Path) -> Result<()> {
        let summary = aggregate(&self.ledger);
        save_report(&self.ledger, &summary, self.project.as_ref(), output_path)
    }
}
