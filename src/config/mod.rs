use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub uploads: UploadConfig,
    pub admin: AdminBootstrap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory the signature template image is stored in.
    pub dir: String,
    pub max_bytes: usize,
}

/// Admin account seeded at startup. Credentials come from the environment
/// only; when unset no admin exists and a warning is logged at boot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminBootstrap {
    pub username: Option<String>,
    pub password: Option<String>,
    pub display_name: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }

        // Upload overrides
        if let Ok(v) = env::var("UPLOAD_DIR") {
            self.uploads.dir = v;
        }
        if let Ok(v) = env::var("UPLOAD_MAX_BYTES") {
            self.uploads.max_bytes = v.parse().unwrap_or(self.uploads.max_bytes);
        }

        // Admin bootstrap (environment only, never baked in)
        if let Ok(v) = env::var("CLEARANCE_ADMIN_USERNAME") {
            self.admin.username = Some(v);
        }
        if let Ok(v) = env::var("CLEARANCE_ADMIN_PASSWORD") {
            self.admin.password = Some(v);
        }
        if let Ok(v) = env::var("CLEARANCE_ADMIN_NAME") {
            self.admin.display_name = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
                jwt_secret: "dev-only-secret".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
            },
            uploads: UploadConfig {
                dir: "./uploads".to_string(),
                max_bytes: 5 * 1024 * 1024, // 5MB
            },
            admin: AdminBootstrap {
                username: None,
                password: None,
                display_name: "Administrator".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
                // Must come from JWT_SECRET; token generation fails when empty
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
            },
            uploads: UploadConfig {
                dir: "/var/lib/clearance/uploads".to_string(),
                max_bytes: 5 * 1024 * 1024,
            },
            admin: AdminBootstrap {
                username: None,
                password: None,
                display_name: "Administrator".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                enable_request_logging: false,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://clearance.example.com".to_string()],
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
            },
            uploads: UploadConfig {
                dir: "/var/lib/clearance/uploads".to_string(),
                max_bytes: 2 * 1024 * 1024,
            },
            admin: AdminBootstrap {
                username: None,
                password: None,
                display_name: "Administrator".to_string(),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
