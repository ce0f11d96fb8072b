//! Runtime configuration
//!
//! Everything is read from environment variables, optionally seeded from a
//! `.env` file. [`AppConfig::from_lookup`] takes the variable source as a
//! function so tests never touch the process environment.

use crate::errors::{config_error, Result};
use crate::model::Domain;
use portalwatch_core_types::Sensitive;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://ecampus.psgtech.ac.in/studzone2";
pub const DEFAULT_LOGIN_PATH: &str = "Default.aspx";
pub const DEFAULT_RESULT_PATH: &str = "FrmEpsStudResult.aspx";
pub const DEFAULT_ATTENDANCE_PATH: &str = "FrmAttendanceView.aspx";
pub const DEFAULT_RESULT_TABLE_ID: &str = "DgResult";
pub const DEFAULT_ATTENDANCE_TABLE_ID: &str = "DgAttendance";
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// Portal login identity
#[derive(Debug, Clone)]
pub struct PortalCredentials {
    pub roll_number: String,
    pub password: Sensitive<String>,
}

/// Where the portal lives and which tables to read
#[derive(Debug, Clone, PartialEq)]
pub struct PortalSettings {
    /// Base URL without a trailing slash
    pub base_url: String,
    /// Paths relative to `base_url`, without a leading slash
    pub login_path: String,
    pub result_path: String,
    pub attendance_path: String,
    pub result_table_id: String,
    pub attendance_table_id: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl PortalSettings {
    /// Absolute URL of a path under the portal base
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Absolute URL of the page that holds a domain's table
    pub fn page_url(&self, domain: Domain) -> String {
        match domain {
            Domain::Results => self.url_for(&self.result_path),
            Domain::Attendance => self.url_for(&self.attendance_path),
        }
    }

    pub fn table_id(&self, domain: Domain) -> &str {
        match domain {
            Domain::Results => &self.result_table_id,
            Domain::Attendance => &self.attendance_table_id,
        }
    }
}

/// SMTP account and envelope addresses
#[derive(Debug, Clone)]
pub struct EmailSettings {
    pub sender: String,
    pub recipient: String,
    pub smtp_host: String,
    /// 465 means implicit TLS, anything else upgrades with STARTTLS
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: Sensitive<String>,
}

/// Fully resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub portal: PortalSettings,
    pub credentials: PortalCredentials,
    pub email: EmailSettings,
    pub check_interval: Duration,
    pub state_dir: PathBuf,
    pub notify_on_login: bool,
}

impl AppConfig {
    /// Load from the process environment after reading `.env` if present
    pub fn from_env() -> Result<Self> {
        // A missing .env file is normal; real variables win over it.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        let portal = PortalSettings {
            base_url: vars
                .or_default("PORTAL_BASE_URL", DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            login_path: vars.path("PORTAL_LOGIN_PATH", DEFAULT_LOGIN_PATH),
            result_path: vars.path("PORTAL_RESULT_PATH", DEFAULT_RESULT_PATH),
            attendance_path: vars.path("PORTAL_ATTENDANCE_PATH", DEFAULT_ATTENDANCE_PATH),
            result_table_id: vars.or_default("RESULT_TABLE_ID", DEFAULT_RESULT_TABLE_ID),
            attendance_table_id: vars
                .or_default("ATTENDANCE_TABLE_ID", DEFAULT_ATTENDANCE_TABLE_ID),
            connect_timeout: vars.seconds("REQUEST_TIMEOUT_CONNECT", 5.0)?,
            read_timeout: vars.seconds("REQUEST_TIMEOUT_READ", 20.0)?,
        };

        let credentials = PortalCredentials {
            roll_number: vars.required("PORTAL_ROLL_NUMBER")?,
            password: Sensitive::new(vars.required("PORTAL_PASSWORD")?),
        };

        let email = EmailSettings {
            sender: vars.required("EMAIL_SENDER")?,
            recipient: vars.required("EMAIL_RECIPIENT")?,
            smtp_host: vars.or_default("SMTP_HOST", DEFAULT_SMTP_HOST),
            smtp_port: vars.parsed("SMTP_PORT", DEFAULT_SMTP_PORT)?,
            smtp_user: vars.required("EMAIL_SMTP_USER")?,
            smtp_password: Sensitive::new(vars.required("EMAIL_SMTP_PASSWORD")?),
        };

        let interval_minutes: u64 = vars.parsed("CHECK_INTERVAL_MINUTES", 15)?;
        if interval_minutes == 0 {
            return Err(config_error(
                "CHECK_INTERVAL_MINUTES",
                "must be at least 1",
            ));
        }
        let interval_secs = interval_minutes
            .checked_mul(60)
            .ok_or_else(|| config_error("CHECK_INTERVAL_MINUTES", "value is too large"))?;

        Ok(Self {
            portal,
            credentials,
            email,
            check_interval: Duration::from_secs(interval_secs),
            state_dir: vars
                .optional("STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            notify_on_login: vars.flag("NOTIFY_ON_LOGIN", true)?,
        })
    }
}

/// Trimmed view over a lookup function; blank values count as unset
struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, name: &str) -> Result<String> {
        self.optional(name)
            .ok_or_else(|| config_error(name, "missing required environment variable"))
    }

    fn or_default(&self, name: &str, default: &str) -> String {
        self.optional(name).unwrap_or_else(|| default.to_string())
    }

    fn path(&self, name: &str, default: &str) -> String {
        let value = self.or_default(name, default);
        let trimmed = value.trim_start_matches('/');
        if trimmed.is_empty() {
            default.to_string()
        } else {
            trimmed.to_string()
        }
    }

    fn parsed<T>(&self, name: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(name) {
            None => Ok(default),
            Some(raw) => raw
                .parse()
                .map_err(|e| config_error(name, format!("invalid value '{}': {}", raw, e))),
        }
    }

    fn seconds(&self, name: &str, default: f64) -> Result<Duration> {
        let secs: f64 = self.parsed(name, default)?;
        if !secs.is_finite() || secs <= 0.0 {
            return Err(config_error(name, "must be a positive number of seconds"));
        }
        Duration::try_from_secs_f64(secs).map_err(|e| config_error(name, e.to_string()))
    }

    fn flag(&self, name: &str, default: bool) -> Result<bool> {
        match self.optional(name).map(|v| v.to_ascii_lowercase()) {
            None => Ok(default),
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
            Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
            Some(v) => Err(config_error(name, format!("invalid boolean '{}'", v))),
        }
    }
}
