use thiserror::Error;

/// Result type alias using PwError
pub type Result<T> = std::result::Result<T, PwError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used in log lines and tests. The
/// kind also decides how far a failure travels: `Config` stops the process
/// before any cycle, `Login` aborts one cycle, `Fetch`/`Parse`/`Timeout` stay
/// inside one domain, and `Notification` only blocks snapshot advancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // Startup
    Config,

    // Portal
    Login,
    Fetch,
    Parse,
    Timeout,

    // Delivery
    Notification,

    // Persistence
    Persistence,
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Config => "ERR_CONFIG",
            ErrorKind::Login => "ERR_LOGIN",
            ErrorKind::Fetch => "ERR_FETCH",
            ErrorKind::Parse => "ERR_PARSE",
            ErrorKind::Timeout => "ERR_TIMEOUT",
            ErrorKind::Notification => "ERR_NOTIFICATION",
            ErrorKind::Persistence => "ERR_PERSISTENCE",
            ErrorKind::Io => "ERR_IO",
            ErrorKind::Serialization => "ERR_SERIALIZATION",
            ErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus enough context (operation, domain) for a
/// single log line to say what failed and where.
#[derive(Debug, Clone)]
pub struct PwError {
    kind: ErrorKind,
    op: Option<String>,
    domain: Option<String>,
    message: String,
    source: Option<Box<PwError>>,
}

impl PwError {
    /// Create a new error with the specified kind
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            op: None,
            domain: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add domain context (`results` or `attendance`)
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: PwError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the domain context, if any
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&PwError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for PwError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(domain) = &self.domain {
            write!(f, " (domain: {})", domain)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for PwError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Failures while reading a portal table into records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The page does not contain a table with the expected id
    #[error("Table {table_id} not found")]
    TableNotFound { table_id: String },

    /// The table exists but has too few rows to contain data
    #[error("Table {table_id} is empty")]
    EmptyTable { table_id: String },

    /// None of the header cells is a recognised column label
    #[error("Unexpected table headers in table {table_id}")]
    UnexpectedHeaders { table_id: String },

    /// Rows were present but none produced a record
    #[error("No rows parsed from table {table_id}")]
    NoRows { table_id: String },

    /// A CSS selector could not be compiled
    #[error("Invalid selector {selector}: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

impl From<TableError> for PwError {
    fn from(err: TableError) -> Self {
        let kind = match err {
            TableError::InvalidSelector { .. } => ErrorKind::Internal,
            _ => ErrorKind::Parse,
        };
        PwError::new(kind)
            .with_op("parse_table")
            .with_message(err.to_string())
    }
}

/// Failures while scraping the login form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required hidden input is missing or has no value
    #[error("Unable to locate hidden field: {field}")]
    MissingHiddenField { field: String },

    /// The portal answered the login POST with an error page
    #[error("Portal rejected the provided credentials.")]
    Rejected,
}

impl From<FormError> for PwError {
    fn from(err: FormError) -> Self {
        PwError::new(ErrorKind::Login)
            .with_op("authenticate")
            .with_message(err.to_string())
    }
}

impl From<serde_json::Error> for PwError {
    fn from(err: serde_json::Error) -> Self {
        PwError::new(ErrorKind::Serialization).with_message(err.to_string())
    }
}

/// Create a configuration error for one variable
pub fn config_error(variable: &str, reason: impl Into<String>) -> PwError {
    PwError::new(ErrorKind::Config)
        .with_op("load_config")
        .with_message(format!("{}: {}", variable, reason.into()))
}
