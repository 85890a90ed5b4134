//! Leader roster stored as a TOML file.
//!
//! ```toml
//! [[leader]]
//! name = "Jane Doe"
//! day = "Wednesday"
//! time = "7:00 PM"
//! frequency = "1st & 3rd"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::attendance::{AttendanceSink, AttendanceStatus};
use crate::error::{CircleError, CircleResult};
use crate::leader::Leader;

#[derive(Debug, Default, Serialize, Deserialize)]
struct RosterFile {
    #[serde(default, rename = "leader")]
    leaders: Vec<Leader>,
}

#[derive(Debug, Clone)]
pub struct Roster {
    path: PathBuf,
    leaders: Vec<Leader>,
}

impl Roster {
    /// Load the roster at `path`. A missing file is an empty roster.
    pub fn load(path: &Path) -> CircleResult<Self> {
        let leaders = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let file: RosterFile = toml::from_str(&content)
                .map_err(|e| CircleError::Roster(format!("{}: {}", path.display(), e)))?;
            file.leaders
        } else {
            Vec::new()
        };

        check_unique_ids(&leaders)?;

        Ok(Roster {
            path: path.to_path_buf(),
            leaders,
        })
    }

    /// Write the roster back to where it was loaded from.
    pub fn save(&self) -> CircleResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = RosterFile {
            leaders: self.leaders.clone(),
        };
        let content =
            toml::to_string_pretty(&file).map_err(|e| CircleError::Roster(e.to_string()))?;

        std::fs::write(&self.path, content)?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn leaders(&self) -> &[Leader] {
        &self.leaders
    }

    pub fn find(&self, id: &str) -> Option<&Leader> {
        self.leaders.iter().find(|l| l.id() == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Leader> {
        self.leaders.iter_mut().find(|l| l.id() == id)
    }
}

impl AttendanceSink for Roster {
    fn set_attendance(&mut self, leader_id: &str, status: AttendanceStatus) -> CircleResult<()> {
        let leader = self
            .find_mut(leader_id)
            .ok_or_else(|| CircleError::LeaderNotFound(leader_id.to_string()))?;
        leader.set_attendance(status);
        tracing::info!(leader_id, status = %status, "attendance updated");

        self.save()
    }
}

fn check_unique_ids(leaders: &[Leader]) -> CircleResult<()> {
    let mut seen = HashSet::new();
    for leader in leaders {
        let id = leader.id();
        if !seen.insert(id.clone()) {
            return Err(CircleError::Roster(format!(
                "Duplicate leader id '{}'. Give one of them an explicit `id`.",
                id
            )));
        }
    }
    Ok(())
}
