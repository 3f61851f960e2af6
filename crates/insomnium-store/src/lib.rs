//! # insomnium-store
//!
//! Reads the `insomnia.*.db` files of an Insomnia data directory into typed
//! records.
//!
//! Each file is newline-delimited JSON, one record per line. [`load_lines`]
//! decodes a stream line by line and stops at the first bad line;
//! [`Insomnium`] runs it once per [`RecordKind`] and keeps the results.
//!
//! File access and decoding are pluggable through [`ByteSource`] and
//! [`Decoder`], so tests can feed in-memory data with [`MemorySource`].

pub mod decoder;
pub mod error;
pub mod kind;
pub mod loader;
pub mod records;
pub mod source;
pub mod store;

pub use decoder::{Decoder, JsonDecoder};
pub use error::{DecodeError, KindError, LoadAllError, LoadError};
pub use kind::RecordKind;
pub use loader::{load_lines, LineLoad, MAX_LINE_BYTES};
pub use records::{
    Authentication, Parameter, Project, Record, Request, RequestBody, RequestGroup,
    RequestHeader, Response, ResponseHeader, Workspace,
};
pub use source::{ByteSource, FsSource, MemorySource, MemoryStream};
pub use store::{default_data_dir, Insomnium};
