//! The aggregate store over an Insomnia data directory.
//!
//! [`Insomnium`] owns one collection per record kind and refills them from the
//! matching `insomnia.<Kind>.db` files on demand.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::decoder::{Decoder, JsonDecoder};
use crate::error::{KindError, LoadAllError, LoadError};
use crate::kind::RecordKind;
use crate::loader::{load_lines, LineLoad};
use crate::records::{Project, Record, Request, RequestGroup, Response, Workspace};
use crate::source::{ByteSource, FsSource};

/// Name of the directory Insomnia keeps its data in, under the platform's
/// config directory.
pub const APP_DIR_NAME: &str = "Insomnia";

/// Insomnia's data directory for the current user, if the platform has one.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME))
}

/// Loads and holds the records of an Insomnia data directory.
///
/// Each kind lives in its own `insomnia.<Kind>.db` file under `base_dir`. File
/// access and line decoding go through the `S` and `D` capabilities, which
/// default to the filesystem and `serde_json`.
pub struct Insomnium<S = FsSource, D = JsonDecoder> {
    base_dir: PathBuf,
    source: S,
    decoder: D,
    workspaces: Vec<Workspace>,
    request_groups: Vec<RequestGroup>,
    responses: Vec<Response>,
    projects: Vec<Project>,
    requests: Vec<Request>,
}

impl Insomnium {
    /// Create an empty store reading real files under `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_capabilities(base_dir, FsSource, JsonDecoder)
    }

    /// Create an empty store over Insomnia's own data directory.
    ///
    /// Returns `None` when the platform has no config directory.
    pub fn from_default_dir() -> Option<Self> {
        default_data_dir().map(Self::new)
    }
}

impl<S: ByteSource, D: Decoder> Insomnium<S, D> {
    pub fn with_capabilities(base_dir: impl Into<PathBuf>, source: S, decoder: D) -> Self {
        Self {
            base_dir: base_dir.into(),
            source,
            decoder,
            workspaces: Vec::new(),
            request_groups: Vec::new(),
            responses: Vec::new(),
            projects: Vec::new(),
            requests: Vec::new(),
        }
    }

    /// Replace the byte source used to open database files.
    pub fn with_source<S2: ByteSource>(self, source: S2) -> Insomnium<S2, D> {
        Insomnium {
            base_dir: self.base_dir,
            source,
            decoder: self.decoder,
            workspaces: self.workspaces,
            request_groups: self.request_groups,
            responses: self.responses,
            projects: self.projects,
            requests: self.requests,
        }
    }

    /// Replace the decoder used for each line.
    pub fn with_decoder<D2: Decoder>(self, decoder: D2) -> Insomnium<S, D2> {
        Insomnium {
            base_dir: self.base_dir,
            source: self.source,
            decoder,
            workspaces: self.workspaces,
            request_groups: self.request_groups,
            responses: self.responses,
            projects: self.projects,
            requests: self.requests,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn request_groups(&self) -> &[RequestGroup] {
        &self.request_groups
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Number of records currently held for `kind`.
    pub fn len_of(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Workspace => self.workspaces.len(),
            RecordKind::RequestGroup => self.request_groups.len(),
            RecordKind::Response => self.responses.len(),
            RecordKind::Project => self.projects.len(),
            RecordKind::Request => self.requests.len(),
        }
    }

    /// Load every kind, in [`RecordKind::ALL`] order.
    ///
    /// A kind that fails does not stop the others. All failures are returned
    /// together.
    pub fn load(&mut self) -> Result<(), LoadAllError> {
        let errors: Vec<KindError> = RecordKind::ALL
            .iter()
            .filter_map(|&kind| self.load_kind(kind).err())
            .collect();

        let loaded: Vec<String> = RecordKind::ALL
            .iter()
            .map(|&kind| format!("{}={}", kind, self.len_of(kind)))
            .collect();
        tracing::info!(
            base_dir = %self.base_dir.display(),
            failed = errors.len(),
            "loaded Insomnia data: {}",
            loaded.join(" ")
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(LoadAllError::new(errors))
        }
    }

    /// Load a single kind.
    pub fn load_kind(&mut self, kind: RecordKind) -> Result<(), KindError> {
        match kind {
            RecordKind::Workspace => self.load_workspaces(),
            RecordKind::RequestGroup => self.load_request_groups(),
            RecordKind::Response => self.load_responses(),
            RecordKind::Project => self.load_projects(),
            RecordKind::Request => self.load_requests(),
        }
    }

    /// Load `insomnia.Workspace.db`, replacing the held workspaces.
    pub fn load_workspaces(&mut self) -> Result<(), KindError> {
        let load = self.read_kind::<Workspace>()?;
        keep(&mut self.workspaces, load)
    }

    /// Load `insomnia.RequestGroup.db`, replacing the held request groups.
    pub fn load_request_groups(&mut self) -> Result<(), KindError> {
        let load = self.read_kind::<RequestGroup>()?;
        keep(&mut self.request_groups, load)
    }

    /// Load `insomnia.Response.db`, replacing the held responses.
    pub fn load_responses(&mut self) -> Result<(), KindError> {
        let load = self.read_kind::<Response>()?;
        keep(&mut self.responses, load)
    }

    /// Load `insomnia.Project.db`, replacing the held projects.
    pub fn load_projects(&mut self) -> Result<(), KindError> {
        let load = self.read_kind::<Project>()?;
        keep(&mut self.projects, load)
    }

    /// Load `insomnia.Request.db`, replacing the held requests.
    pub fn load_requests(&mut self) -> Result<(), KindError> {
        let load = self.read_kind::<Request>()?;
        keep(&mut self.requests, load)
    }

    fn read_kind<T>(&self) -> Result<LineLoad<T>, KindError>
    where
        T: Record + DeserializeOwned,
    {
        let path = T::KIND.path_in(&self.base_dir);
        tracing::debug!(kind = %T::KIND, path = %path.display(), "loading records");

        let stream = self.source.open(&path).map_err(|source| {
            let err = KindError {
                kind: T::KIND,
                source: LoadError::Open { path, source },
            };
            tracing::warn!("{}", err);
            err
        })?;

        Ok(load_lines(stream, &self.decoder))
    }
}

/// Store the decoded records, even a partial prefix, and surface the failure.
fn keep<T: Record>(field: &mut Vec<T>, load: LineLoad<T>) -> Result<(), KindError> {
    *field = load.records;
    match load.error {
        None => Ok(()),
        Some(source) => {
            let err = KindError {
                kind: T::KIND,
                source,
            };
            tracing::warn!(kept = field.len(), "{}", err);
            Err(err)
        }
    }
}
