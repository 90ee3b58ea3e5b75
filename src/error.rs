use thiserror::Error;

/// Failures that abort a whole file load.
///
/// These are the only fatal outcomes in the core: a load that fails with one
/// of these leaves any previously installed dataset untouched. Per-record and
/// per-field problems (a malformed individual, an unparseable date string)
/// are recovered locally during normalization and never surface here.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GedcomError {
    /// The source file contained no data at all.
    #[error("source file is empty")]
    EmptyFile,

    /// The load worker has shut down and can no longer accept requests.
    #[error("load worker is no longer running")]
    WorkerGone,

    /// The blocking load task died before producing a result.
    #[error("load task failed: {0}")]
    LoadTaskFailed(String),
}
