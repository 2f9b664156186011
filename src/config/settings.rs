//! Lexiconnect service settings.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use super::error::{ConfigError, Result};
use super::source::EnvSource;
use super::vars;

/// Resolved settings for the backend service.
///
/// Built once at start-up and handed to the components that need it,
/// typically as `Arc<Settings>`. Fields are read through accessors so the
/// derived [`use_cloud_storage`](Self::use_cloud_storage) flag always agrees
/// with the GCP fields it is computed from.
///
/// | Variable | Default |
/// |----------|---------|
/// | `API_V1_STR` | `/api/v1` |
/// | `PROJECT_NAME` | `Lexiconnect` |
/// | `NEO4J_URI` | `bolt://localhost:7687` |
/// | `NEO4J_USER` | `neo4j` |
/// | `NEO4J_PASSWORD` | `password` (rejected in production) |
/// | `SECRET_KEY` | `your-secret-key-change-in-production` (rejected in production) |
/// | `ACCESS_TOKEN_EXPIRE_MINUTES` | `30` |
/// | `ALGORITHM` | `HS256` |
/// | `GCP_PROJECT_ID` | (empty) |
/// | `GCP_SERVICE_ACCOUNT_FILE` | (empty) |
/// | `GCS_BUCKET_NAME` | (empty) |
/// | `ENVIRONMENT` | `development` |
/// | `DEBUG` | `true` |
///
/// The CORS allow-list is fixed and cannot be overridden.
///
/// # Example
///
/// ```rust
/// use lexiconnect_config::{EnvSource, Settings};
///
/// let source = EnvSource::from_pairs([
///     ("GCP_PROJECT_ID", "proj1"),
///     ("GCP_SERVICE_ACCOUNT_FILE", "/creds.json"),
/// ]);
/// let settings = Settings::from_source(&source)?;
///
/// assert!(settings.use_cloud_storage());
/// assert_eq!(settings.api_prefix(), "/api/v1");
/// # Ok::<(), lexiconnect_config::ConfigError>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Settings {
    api_prefix: String,
    project_name: String,
    allowed_origins: Vec<String>,

    graph_db_uri: String,
    graph_db_user: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    graph_db_password: String,

    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    jwt_secret: String,
    jwt_access_expire_minutes: i64,
    jwt_algorithm: String,

    gcp_project_id: String,
    gcp_service_account_file: String,
    gcs_bucket_name: String,
    use_cloud_storage: bool,

    environment: String,
    debug: bool,
}

/// Google Cloud Storage parameters, only handed out when cloud storage is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloudStorage<'a> {
    pub project_id: &'a str,
    pub service_account_file: &'a str,
    /// May be empty; the storage client decides how to treat a missing bucket.
    pub bucket_name: &'a str,
}

impl Settings {
    /// Load settings from the process environment layered over `.env`.
    pub fn load() -> Result<Self> {
        Self::load_with_env_file(vars::DEFAULT_ENV_FILE)
    }

    /// Load settings from the process environment layered over `env_file`.
    pub fn load_with_env_file(env_file: impl AsRef<Path>) -> Result<Self> {
        let source = EnvSource::from_process().with_env_file(env_file);
        Self::from_source(&source)
    }

    /// Resolve every setting from `source`.
    ///
    /// This is the only constructor that reads variables. It either returns
    /// a complete value or the first [`ConfigError`] encountered.
    pub fn from_source(source: &EnvSource) -> Result<Self> {
        let environment = string_or(source, vars::ENVIRONMENT, vars::DEFAULT_ENVIRONMENT);
        let production = is_production_label(&environment);

        let graph_db_password = secret_or(
            source,
            vars::NEO4J_PASSWORD,
            vars::DEFAULT_GRAPH_DB_PASSWORD,
            production.then_some(environment.as_str()),
        )?;
        let jwt_secret = secret_or(
            source,
            vars::SECRET_KEY,
            vars::DEFAULT_JWT_SECRET,
            production.then_some(environment.as_str()),
        )?;
        let jwt_access_expire_minutes = int_or(
            source,
            vars::ACCESS_TOKEN_EXPIRE_MINUTES,
            vars::DEFAULT_JWT_ACCESS_EXPIRE_MINUTES,
        )?;

        let gcp_project_id = string_or(source, vars::GCP_PROJECT_ID, "");
        let gcp_service_account_file = string_or(source, vars::GCP_SERVICE_ACCOUNT_FILE, "");
        let use_cloud_storage = cloud_storage_enabled(&gcp_project_id, &gcp_service_account_file);

        let settings = Self {
            api_prefix: string_or(source, vars::API_V1_STR, vars::DEFAULT_API_PREFIX),
            project_name: string_or(source, vars::PROJECT_NAME, vars::DEFAULT_PROJECT_NAME),
            allowed_origins: default_allowed_origins(),
            graph_db_uri: string_or(source, vars::NEO4J_URI, vars::DEFAULT_GRAPH_DB_URI),
            graph_db_user: string_or(source, vars::NEO4J_USER, vars::DEFAULT_GRAPH_DB_USER),
            graph_db_password,
            jwt_secret,
            jwt_access_expire_minutes,
            jwt_algorithm: string_or(source, vars::ALGORITHM, vars::DEFAULT_JWT_ALGORITHM),
            gcp_project_id,
            gcp_service_account_file,
            gcs_bucket_name: string_or(source, vars::GCS_BUCKET_NAME, ""),
            use_cloud_storage,
            environment,
            debug: bool_or(source, vars::DEBUG, vars::DEFAULT_DEBUG),
        };

        tracing::debug!(
            environment = %settings.environment,
            debug = settings.debug,
            use_cloud_storage = settings.use_cloud_storage,
            "settings loaded"
        );
        Ok(settings)
    }

    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// CORS allow-list in declaration order.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn graph_db_uri(&self) -> &str {
        &self.graph_db_uri
    }

    pub fn graph_db_user(&self) -> &str {
        &self.graph_db_user
    }

    pub fn graph_db_password(&self) -> &str {
        &self.graph_db_password
    }

    /// JWT signing key.
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// JWT signing key bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    pub fn jwt_access_expire_minutes(&self) -> i64 {
        self.jwt_access_expire_minutes
    }

    pub fn jwt_algorithm(&self) -> &str {
        &self.jwt_algorithm
    }

    pub fn gcp_project_id(&self) -> &str {
        &self.gcp_project_id
    }

    pub fn gcp_service_account_file(&self) -> &str {
        &self.gcp_service_account_file
    }

    pub fn gcs_bucket_name(&self) -> &str {
        &self.gcs_bucket_name
    }

    /// True iff both the GCP project and service account file are set.
    pub fn use_cloud_storage(&self) -> bool {
        self.use_cloud_storage
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Check if this is a production deployment.
    pub fn is_production(&self) -> bool {
        is_production_label(&self.environment)
    }

    /// Cloud storage parameters, or `None` when cloud storage is disabled.
    pub fn cloud_storage(&self) -> Option<CloudStorage<'_>> {
        self.use_cloud_storage.then(|| CloudStorage {
            project_id: &self.gcp_project_id,
            service_account_file: &self.gcp_service_account_file,
            bucket_name: &self.gcs_bucket_name,
        })
    }

    /// Lifetime of an access token. Non-positive values yield a zero duration.
    pub fn access_token_ttl(&self) -> Duration {
        let minutes = u64::try_from(self.jwt_access_expire_minutes).unwrap_or(0);
        Duration::from_secs(minutes.saturating_mul(60))
    }

    /// Exact-match check against the CORS allow-list.
    pub fn is_allowed_origin(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    /// Join the API prefix and a route path with a single `/`.
    ///
    /// ```rust
    /// let settings = lexiconnect_config::Settings::default();
    /// assert_eq!(settings.api_route("/texts"), "/api/v1/texts");
    /// assert_eq!(settings.api_route("texts"), "/api/v1/texts");
    /// ```
    pub fn api_route(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_prefix.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for Settings {
    fn default() -> Self {
        let use_cloud_storage = cloud_storage_enabled("", "");
        Self {
            api_prefix: vars::DEFAULT_API_PREFIX.to_string(),
            project_name: vars::DEFAULT_PROJECT_NAME.to_string(),
            allowed_origins: default_allowed_origins(),
            graph_db_uri: vars::DEFAULT_GRAPH_DB_URI.to_string(),
            graph_db_user: vars::DEFAULT_GRAPH_DB_USER.to_string(),
            graph_db_password: vars::DEFAULT_GRAPH_DB_PASSWORD.to_string(),
            jwt_secret: vars::DEFAULT_JWT_SECRET.to_string(),
            jwt_access_expire_minutes: vars::DEFAULT_JWT_ACCESS_EXPIRE_MINUTES,
            jwt_algorithm: vars::DEFAULT_JWT_ALGORITHM.to_string(),
            gcp_project_id: String::new(),
            gcp_service_account_file: String::new(),
            gcs_bucket_name: String::new(),
            use_cloud_storage,
            environment: vars::DEFAULT_ENVIRONMENT.to_string(),
            debug: vars::DEFAULT_DEBUG,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_prefix", &self.api_prefix)
            .field("project_name", &self.project_name)
            .field("allowed_origins", &self.allowed_origins)
            .field("graph_db_uri", &self.graph_db_uri)
            .field("graph_db_user", &self.graph_db_user)
            .field("graph_db_password", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_access_expire_minutes", &self.jwt_access_expire_minutes)
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("gcp_project_id", &self.gcp_project_id)
            .field("gcp_service_account_file", &self.gcp_service_account_file)
            .field("gcs_bucket_name", &self.gcs_bucket_name)
            .field("use_cloud_storage", &self.use_cloud_storage)
            .field("environment", &self.environment)
            .field("debug", &self.debug)
            .finish()
    }
}

fn default_allowed_origins() -> Vec<String> {
    vars::DEFAULT_ALLOWED_ORIGINS
        .iter()
        .map(|origin| origin.to_string())
        .collect()
}

fn cloud_storage_enabled(project_id: &str, service_account_file: &str) -> bool {
    !project_id.is_empty() && !service_account_file.is_empty()
}

fn is_production_label(environment: &str) -> bool {
    environment.eq_ignore_ascii_case(vars::PRODUCTION_ENVIRONMENT)
}

fn string_or(source: &EnvSource, var: &'static str, default: &str) -> String {
    source.get(var).unwrap_or(default).to_string()
}

fn bool_or(source: &EnvSource, var: &'static str, default: bool) -> bool {
    source
        .get(var)
        .map_or(default, |value| value.to_lowercase() == "true")
}

fn int_or(source: &EnvSource, var: &'static str, default: i64) -> Result<i64> {
    let Some(raw) = source.get(var) else {
        return Ok(default);
    };
    raw.trim()
        .parse()
        .map_err(|e| ConfigError::MalformedInteger {
            var,
            value: raw.to_string(),
            source: e,
        })
}

/// Resolve a secret. `required_in` carries the environment label when a
/// missing value, or one equal to the published `default`, must be rejected
/// instead of accepted.
fn secret_or(
    source: &EnvSource,
    var: &'static str,
    default: &str,
    required_in: Option<&str>,
) -> Result<String> {
    let value = source.get(var);
    if let Some(environment) = required_in {
        return match value {
            Some(value) if value != default => Ok(value.to_string()),
            _ => Err(ConfigError::MissingSecret {
                var,
                environment: environment.to_string(),
            }),
        };
    }
    match value {
        Some(value) => Ok(value.to_string()),
        None => {
            tracing::warn!(var, "{var} not set, using insecure development default");
            Ok(default.to_string())
        }
    }
}
