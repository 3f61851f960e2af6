//! The record kinds of an Insomnia data directory and their file names.

use std::fmt;
use std::path::{Path, PathBuf};

/// Prefix shared by every Insomnia database file.
pub const FILE_PREFIX: &str = "insomnia";

/// The five record kinds stored in an Insomnia data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Workspace,
    RequestGroup,
    Response,
    Project,
    Request,
}

impl RecordKind {
    /// Every kind, in the order `Insomnium::load` visits them.
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Workspace,
        RecordKind::RequestGroup,
        RecordKind::Response,
        RecordKind::Project,
        RecordKind::Request,
    ];

    /// Name used by Insomnia in file names and `type` fields.
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Workspace => "Workspace",
            RecordKind::RequestGroup => "RequestGroup",
            RecordKind::Response => "Response",
            RecordKind::Project => "Project",
            RecordKind::Request => "Request",
        }
    }

    /// File name of this kind's database, e.g. `insomnia.Workspace.db`.
    pub fn file_name(&self) -> String {
        format!("{}.{}.db", FILE_PREFIX, self.name())
    }

    /// Full path of this kind's database under `base_dir`.
    pub fn path_in(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(self.file_name())
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Accepts Insomnia's names in any case, `_` or `-` separators, plurals, and
/// `folder` for request groups.
impl std::str::FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "workspace" | "workspaces" => Ok(RecordKind::Workspace),
            "request-group" | "requestgroup" | "request-groups" | "folder" => {
                Ok(RecordKind::RequestGroup)
            }
            "response" | "responses" => Ok(RecordKind::Response),
            "project" | "projects" => Ok(RecordKind::Project),
            "request" | "requests" => Ok(RecordKind::Request),
            _ => Err(format!(
                "unknown record kind `{}` (expected workspace, request-group, response, project or request)",
                s
            )),
        }
    }
}
