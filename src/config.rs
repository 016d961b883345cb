use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use dotenvy::Error as DotenvError;
use thiserror::Error;

const DEFAULT_ENVIRONMENT: &str = "dev";
const DEFAULT_PROJECT_NAME: &str = "hello-world-lambda";
const DEFAULT_PORT: u16 = 8080;
const ENVIRONMENT_ENV: &str = "ENVIRONMENT";
const PROJECT_NAME_ENV: &str = "PROJECT_NAME";
const PORT_ENV: &str = "PORT";
const BIND_ADDR_ENV: &str = "BIND_ADDR";

/// Deployment settings echoed into every response payload.
///
/// The handler never reads the process environment itself; whoever constructs
/// it decides where these values come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerConfig {
    pub environment: String,
    pub project_name: String,
}

impl HandlerConfig {
    /// Loads configuration from `ENVIRONMENT` and `PROJECT_NAME`.
    ///
    /// Values from a local `.env` file (parsed via [`dotenvy::dotenv_override`]) override whatever is already set in
    /// the process environment, which makes local development workflows predictable.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_env_overrides()?;
        Ok(Self::from_process_env())
    }

    fn from_process_env() -> Self {
        Self {
            environment: env::var(ENVIRONMENT_ENV)
                .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_owned()),
            project_name: env::var(PROJECT_NAME_ENV)
                .unwrap_or_else(|_| DEFAULT_PROJECT_NAME.to_owned()),
        }
    }

    /// Returns a builder for programmatic overrides.
    pub fn builder() -> HandlerConfigBuilder {
        HandlerConfigBuilder::default()
    }
}

impl Default for HandlerConfig {
    /// The documented defaults: `dev` / `hello-world-lambda`.
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_owned(),
            project_name: DEFAULT_PROJECT_NAME.to_owned(),
        }
    }
}

/// Builder type for [`HandlerConfig`].
#[derive(Default, Clone, Debug)]
pub struct HandlerConfigBuilder {
    environment: Option<String>,
    project_name: Option<String>,
}

impl HandlerConfigBuilder {
    /// Sets the deployment environment name (`dev`, `staging`, ...).
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Sets the project name echoed into payloads.
    pub fn project_name(mut self, project_name: impl Into<String>) -> Self {
        self.project_name = Some(project_name.into());
        self
    }

    /// Builds the final configuration.
    pub fn build(self) -> HandlerConfig {
        let defaults = HandlerConfig::default();
        HandlerConfig {
            environment: self.environment.unwrap_or(defaults.environment),
            project_name: self.project_name.unwrap_or(defaults.project_name),
        }
    }
}

/// Configuration consumed by the local front-end before spinning up Axum/hyper.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub bind_addr: SocketAddr,
    pub handler: HandlerConfig,
}

impl RuntimeConfig {
    /// Loads configuration from the environment: handler settings plus
    /// `PORT`/`BIND_ADDR` for the embedded listener.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_env_overrides()?;

        let addr = env::var(BIND_ADDR_ENV)
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        Ok(Self {
            bind_addr: SocketAddr::new(addr, resolve_port()),
            handler: HandlerConfig::from_process_env(),
        })
    }

    /// Returns a builder for programmatic overrides.
    pub fn builder() -> RuntimeConfigBuilder {
        RuntimeConfigBuilder::default()
    }
}

impl Default for RuntimeConfig {
    /// Binds to `0.0.0.0:8080` with the default handler settings.
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            handler: HandlerConfig::default(),
        }
    }
}

/// Builder type for [`RuntimeConfig`].
#[derive(Default, Clone, Debug)]
pub struct RuntimeConfigBuilder {
    bind_addr: Option<SocketAddr>,
    handler: Option<HandlerConfig>,
}

impl RuntimeConfigBuilder {
    /// Sets the address for the embedded Axum listener.
    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = Some(addr);
        self
    }

    /// Sets the handler configuration.
    pub fn handler(mut self, handler: HandlerConfig) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Builds the final configuration.
    pub fn build(self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self
                .bind_addr
                .unwrap_or_else(|| SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT)),
            handler: self.handler.unwrap_or_default(),
        }
    }
}

/// Errors that can occur while building configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load .env overrides: {0}")]
    Dotenv(#[from] DotenvError),
}

fn load_env_overrides() -> Result<(), ConfigError> {
    match dotenvy::dotenv_override() {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::Dotenv(err)),
    }
}

fn resolve_port() -> u16 {
    env::var(PORT_ENV)
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_lock() -> &'static Mutex<()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn handler_defaults() {
        let config = HandlerConfig::default();
        assert_eq!(config.environment, "dev");
        assert_eq!(config.project_name, "hello-world-lambda");
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = HandlerConfig::builder()
            .environment("staging")
            .project_name("greeter")
            .build();

        assert_eq!(config.environment, "staging");
        assert_eq!(config.project_name, "greeter");
    }

    #[test]
    fn runtime_builder_overrides_bind_addr() {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 8)), 9999);
        let config = RuntimeConfig::builder()
            .bind_addr(addr)
            .handler(HandlerConfig::builder().environment("prod").build())
            .build();

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.handler.environment, "prod");
    }

    #[test]
    fn reads_env_configuration() {
        let _guard = env_lock().lock().unwrap();
        unsafe {
            std::env::set_var("ENVIRONMENT", "prod");
            std::env::set_var("PROJECT_NAME", "greeter");
            std::env::set_var("PORT", "9000");
            std::env::set_var("BIND_ADDR", "127.0.0.2");
        }

        let config = RuntimeConfig::from_env().expect("config");
        assert_eq!(config.handler.environment, "prod");
        assert_eq!(config.handler.project_name, "greeter");
        assert_eq!(
            config.bind_addr,
            SocketAddr::new("127.0.0.2".parse().unwrap(), 9000)
        );

        unsafe {
            std::env::remove_var("ENVIRONMENT");
            std::env::remove_var("PROJECT_NAME");
            std::env::remove_var("PORT");
            std::env::remove_var("BIND_ADDR");
        }
    }

    #[test]
    fn falls_back_to_defaults_without_env() {
        let _guard = env_lock().lock().unwrap();
        unsafe {
            std::env::remove_var("ENVIRONMENT");
            std::env::remove_var("PROJECT_NAME");
            std::env::remove_var("PORT");
            std::env::remove_var("BIND_ADDR");
        }

        let config = RuntimeConfig::from_env().expect("config");
        assert_eq!(config.handler, HandlerConfig::default());
        assert_eq!(config.bind_addr.port(), 8080);
    }
}
