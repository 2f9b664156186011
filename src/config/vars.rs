//! Environment variable names and their defaults.

// =============================================================================
// Variable names
// =============================================================================

/// Mount point of the versioned API router.
pub const API_V1_STR: &str = "API_V1_STR";
pub const PROJECT_NAME: &str = "PROJECT_NAME";

pub const NEO4J_URI: &str = "NEO4J_URI";
pub const NEO4J_USER: &str = "NEO4J_USER";
/// Graph database password (secret).
pub const NEO4J_PASSWORD: &str = "NEO4J_PASSWORD";

/// JWT signing key (secret).
pub const SECRET_KEY: &str = "SECRET_KEY";
pub const ACCESS_TOKEN_EXPIRE_MINUTES: &str = "ACCESS_TOKEN_EXPIRE_MINUTES";
pub const ALGORITHM: &str = "ALGORITHM";

pub const GCP_PROJECT_ID: &str = "GCP_PROJECT_ID";
/// Path to the service account JSON key.
pub const GCP_SERVICE_ACCOUNT_FILE: &str = "GCP_SERVICE_ACCOUNT_FILE";
pub const GCS_BUCKET_NAME: &str = "GCS_BUCKET_NAME";

/// Deployment environment label, e.g. `development` or `production`.
pub const ENVIRONMENT: &str = "ENVIRONMENT";
pub const DEBUG: &str = "DEBUG";

/// Every variable the loader reads, in declaration order.
pub const ALL: &[&str] = &[
    API_V1_STR,
    PROJECT_NAME,
    NEO4J_URI,
    NEO4J_USER,
    NEO4J_PASSWORD,
    SECRET_KEY,
    ACCESS_TOKEN_EXPIRE_MINUTES,
    ALGORITHM,
    GCP_PROJECT_ID,
    GCP_SERVICE_ACCOUNT_FILE,
    GCS_BUCKET_NAME,
    ENVIRONMENT,
    DEBUG,
];

// =============================================================================
// Defaults
// =============================================================================

pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_PROJECT_NAME: &str = "Lexiconnect";

/// CORS allow-list. Order is preserved for first-match consumers.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    // Next.js dev server
    "http://localhost:3000",
    // Docker compose network
    "http://frontend:3000",
    "https://lexiconnect-eight.vercel.app/",
    "https://your-custom-domain.com",
];

pub const DEFAULT_GRAPH_DB_URI: &str = "bolt://localhost:7687";
pub const DEFAULT_GRAPH_DB_USER: &str = "neo4j";
/// Development-only. Rejected when `ENVIRONMENT=production`.
pub const DEFAULT_GRAPH_DB_PASSWORD: &str = "password";

/// Development-only. Rejected when `ENVIRONMENT=production`.
pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";
pub const DEFAULT_JWT_ACCESS_EXPIRE_MINUTES: i64 = 30;
pub const DEFAULT_JWT_ALGORITHM: &str = "HS256";

pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_DEBUG: bool = true;

/// Environment label that turns missing secrets into hard errors.
pub const PRODUCTION_ENVIRONMENT: &str = "production";

/// Env file consulted by [`Settings::load`](super::Settings::load).
pub const DEFAULT_ENV_FILE: &str = ".env";
