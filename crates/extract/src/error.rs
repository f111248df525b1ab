// ABOUTME: Error types for the staysift extraction core, including ErrorCode and ExtractError.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing the categories of failures the core can surface.
///
/// Only `InvalidInput` terminates a pipeline run; fetch-level codes are
/// produced by the network collaborator and are absorbed by the multi-source
/// driver as "this source contributed zero candidates".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidInput,
    Fetch,
    Timeout,
    Upstream,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidInput => "invalid input",
            ErrorCode::Fetch => "fetch error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Upstream => "upstream error",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for extraction and fetch operations.
#[derive(Debug, thiserror::Error)]
pub struct ExtractError {
    pub code: ErrorCode,
    /// What the operation was acting on: a parameter name, URL, or source tag.
    pub subject: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "staysift: {} {}: {}", self.op, self.subject, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

/// Alias used at the network-collaborator boundary.
pub type FetchError = ExtractError;

impl ExtractError {
    /// Create an InvalidInput error (missing or malformed caller parameters).
    pub fn invalid_input(
        subject: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::InvalidInput,
            subject: subject.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Fetch error (transport-level failure).
    pub fn fetch(
        subject: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Fetch,
            subject: subject.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Timeout error.
    pub fn timeout(
        subject: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Timeout,
            subject: subject.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an Upstream error carrying the proxy's status and a body snippet
    /// for diagnostics.
    pub fn upstream(
        subject: impl Into<String>,
        op: impl Into<String>,
        status: u16,
        body: &str,
    ) -> Self {
        let snippet: String = body.chars().take(200).collect();
        Self {
            code: ErrorCode::Upstream,
            subject: subject.into(),
            op: op.into(),
            source: Some(anyhow::anyhow!("HTTP status {}: {}", status, snippet)),
        }
    }

    /// Returns true if this is an InvalidInput error.
    pub fn is_invalid_input(&self) -> bool {
        self.code == ErrorCode::InvalidInput
    }

    /// Returns true if this is a Fetch error.
    pub fn is_fetch(&self) -> bool {
        self.code == ErrorCode::Fetch
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    /// Returns true if this is an Upstream error.
    pub fn is_upstream(&self) -> bool {
        self.code == ErrorCode::Upstream
    }
}
