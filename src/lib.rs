//! # mirror-sync
//!
//! Log in to Gitee and trigger "sync from upstream" across repository mirrors.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mirror_sync::{Config, Runner};
//!
//! # #[tokio::main]
//! # async fn main() -> mirror_sync::Result<()> {
//! let config = Config::load("sync.yaml")?;
//! let mut runner = Runner::new(&config.browser).await?;
//! let report = runner.run(&config).await?;
//! println!("Synced {}/{} mirrors", report.repos_synced, report.repos_total);
//! # Ok(())
//! # }
//! ```

mod config;
mod runner;

pub use config::{
    AccountConfig, BrowserConfig, Config, OnFailure, Params, SelectorConfig, SiteConfig,
    TimingConfig, Viewport,
};
pub use runner::{Driver, PageDriver, Runner, SyncReport};

/// Result type for mirror-sync operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during config loading or a sync run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("browser error: {0}")]
    Browser(#[from] eoka::Error),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("Failed to login.")]
    LoginTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.name, "Gitee mirror sync");
        assert_eq!(config.site.login_url, "https://gitee.com/login");
        assert_eq!(config.site.home_url, "https://gitee.com/");
        assert_eq!(config.site.repo_base, "https://gitee.com");
        assert_eq!(
            config.repos,
            vec!["bukkit", "craftbukkit", "spigot", "builddata"]
        );
        assert_eq!(config.timing.poll_interval_ms, 3000);
        assert_eq!(config.timing.login_retries, 10);
        assert_eq!(config.timing.element_timeout_ms, 20000);
        assert_eq!(config.selectors.sync_button, "#btn-sync-from-github");
        assert!(config.account.username.starts_with("${"));
        assert!(!config.browser.headless);
    }

    #[test]
    fn test_parse_minimal_config() {
        let yaml = r#"
account:
  username: "alice"
  password: "hunter2"
"#;
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.name, "Gitee mirror sync");
        assert_eq!(config.account.username, "alice");
        assert_eq!(config.account.password, "hunter2");
        assert_eq!(config.repos.len(), 4);
        assert_eq!(
            config.selectors.username_field,
            "div.session-login__body input#user_login"
        );
    }

    #[test]
    fn test_parse_browser_config() {
        let yaml = r#"
account:
  username: "alice"
  password: "hunter2"
browser:
  headless: true
  proxy: "http://localhost:8080"
  user_agent: "Custom UA"
  viewport:
    width: 1920
    height: 1080
"#;
        let config = Config::parse(yaml).unwrap();
        assert!(config.browser.headless);
        assert_eq!(config.browser.proxy, Some("http://localhost:8080".into()));
        assert_eq!(config.browser.user_agent, Some("Custom UA".into()));
        let viewport = config.browser.viewport.unwrap();
        assert_eq!(viewport.width, 1920);
        assert_eq!(viewport.height, 1080);
    }

    #[test]
    fn test_parse_repos_override_keeps_order() {
        let yaml = r#"
account:
  username: "alice"
  password: "hunter2"
repos:
  - spigot
  - bukkit
"#;
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.repos, vec!["spigot", "bukkit"]);
    }

    #[test]
    fn test_parse_timing_override() {
        let yaml = r#"
account:
  username: "alice"
  password: "hunter2"
timing:
  poll_interval_ms: 1000
  login_retries: 3
"#;
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.timing.poll_interval_ms, 1000);
        assert_eq!(config.timing.login_retries, 3);
        // untouched fields keep their defaults
        assert_eq!(config.timing.sync_timeout_ms, 10000);
        assert_eq!(config.timing.settle_ms, 2000);
    }

    #[test]
    fn test_parse_selectors_override() {
        let yaml = r##"
account:
  username: "alice"
  password: "hunter2"
selectors:
  confirm_button: ".modal .btn-primary"
"##;
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.selectors.confirm_button, ".modal .btn-primary");
        assert_eq!(config.selectors.sync_button, "#btn-sync-from-github");
    }

    #[test]
    fn test_parse_on_failure() {
        let yaml = r#"
account:
  username: "alice"
  password: "hunter2"
on_failure:
  screenshot: "failure-{timestamp}.png"
"#;
        let config = Config::parse(yaml).unwrap();
        let on_failure = config.on_failure.unwrap();
        assert_eq!(on_failure.screenshot, Some("failure-{timestamp}.png".into()));
    }

    #[test]
    fn test_validation_empty_username() {
        let yaml = r#"
account:
  username: ""
  password: "hunter2"
"#;
        let result = Config::parse(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("account.username"));
    }

    #[test]
    fn test_validation_unresolved_placeholder() {
        let yaml = r#"
account:
  username: "${MIRROR_SYNC_TEST_UNSET_VAR}"
  password: "hunter2"
"#;
        let result = Config::parse(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("account.username"));
    }

    #[test]
    fn test_validation_empty_repos() {
        let yaml = r#"
account:
  username: "alice"
  password: "hunter2"
repos: []
"#;
        let result = Config::parse(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("repos"));
    }

    #[test]
    fn test_validation_zero_login_retries() {
        let yaml = r#"
account:
  username: "alice"
  password: "hunter2"
timing:
  login_retries: 0
"#;
        let result = Config::parse(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at least 1"));
    }

    #[test]
    fn test_params_substitution() {
        let yaml = r#"
account:
  username: "${user}"
  password: "${pass}"
"#;
        let params = Params::new().set("user", "alice").set("pass", "hunter2");
        let config = Config::parse_with_params(yaml, &params).unwrap();
        assert_eq!(config.account.username, "alice");
        assert_eq!(config.account.password, "hunter2");
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("MIRROR_SYNC_TEST_PASSWORD", "from-env");
        let yaml = r#"
account:
  username: "alice"
  password: "${MIRROR_SYNC_TEST_PASSWORD}"
"#;
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.account.password, "from-env");
    }

    #[test]
    fn test_with_params_resolves_builtin_defaults() {
        let params = Params::new()
            .set("GITEE_USERNAME", "alice")
            .set("GITEE_PASSWORD", "hunter2");
        let config = Config::with_params(&params).unwrap();
        assert_eq!(config.account.username, "alice");
        assert_eq!(config.account.password, "hunter2");
        assert_eq!(config.repos.len(), 4);
    }

    #[test]
    fn test_load_example_config() {
        let params = Params::new()
            .set("GITEE_USERNAME", "alice")
            .set("GITEE_PASSWORD", "hunter2");
        let config = Config::load_with_params("configs/sync.yaml", &params).unwrap();
        assert_eq!(config.name, "Spigot mirror sync");
        assert_eq!(config.account.username, "alice");
        assert_eq!(
            config.repos,
            vec!["bukkit", "craftbukkit", "spigot", "builddata"]
        );
    }

    #[test]
    fn test_login_timeout_message() {
        assert_eq!(Error::LoginTimeout.to_string(), "Failed to login.");
    }
}
