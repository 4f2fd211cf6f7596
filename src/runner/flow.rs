use super::driver::Driver;
use crate::config::Config;
use crate::{Error, Result};
use tracing::{debug, info, warn};

/// Open the login page and submit credentials.
///
/// Waiting for the username field doubles as the page-load settle; the
/// form is filled and submitted with Enter, and the navigation that
/// follows is confirmed separately by [`confirm_login`].
pub async fn log_in<D: Driver>(driver: &D, config: &Config) -> Result<()> {
    info!("opening login page: {}", config.site.login_url);
    driver.goto(&config.site.login_url).await?;
    driver
        .wait_for(
            &config.selectors.username_field,
            config.timing.element_timeout_ms,
        )
        .await?;

    debug!("filling credentials for {}", config.account.username);
    driver
        .fill(&config.selectors.username_field, &config.account.username)
        .await?;
    driver
        .fill(&config.selectors.password_field, &config.account.password)
        .await?;
    driver.press_key("Enter").await?;
    Ok(())
}

/// Poll the current URL until it equals the post-login home page.
///
/// The URL is checked `login_retries + 1` times with `poll_interval_ms`
/// between checks; a match returns immediately, so a first-check match
/// never sleeps. Exhausting the checks fails the run with
/// [`Error::LoginTimeout`].
pub async fn confirm_login<D: Driver>(driver: &D, config: &Config) -> Result<()> {
    let checks = config.timing.login_retries + 1;
    for attempt in 1..=checks {
        let url = driver.url().await?;
        debug!("login check {}/{}: {}", attempt, checks, url);
        if url == config.site.home_url {
            info!("logged in as {}", config.account.username);
            return Ok(());
        }
        if attempt < checks {
            driver.wait(config.timing.poll_interval_ms).await;
        }
    }
    Err(Error::LoginTimeout)
}

/// Trigger an upstream sync on a single repository mirror.
///
/// Two clicks: the sync button, then the confirmation dialog. The site
/// gives no feedback worth reading, so the sync is fire-and-forget.
pub async fn sync_repo<D: Driver>(driver: &D, config: &Config, repo: &str) -> Result<()> {
    let url = format!(
        "{}/{}/{}",
        config.site.repo_base, config.account.username, repo
    );
    info!("updating {}", repo);
    driver.goto(&url).await?;

    driver
        .wait_for(&config.selectors.sync_button, config.timing.sync_timeout_ms)
        .await?;
    driver.click(&config.selectors.sync_button).await?;

    driver
        .wait_for(
            &config.selectors.confirm_button,
            config.timing.sync_timeout_ms,
        )
        .await?;
    driver.click(&config.selectors.confirm_button).await?;

    // let the sync request fire before the next navigation
    driver.wait(config.timing.settle_ms).await;
    Ok(())
}

/// Sync every configured mirror in order. The first failure aborts the
/// remaining mirrors.
pub async fn sync_all<D: Driver>(driver: &D, config: &Config) -> Result<usize> {
    let mut synced = 0;
    for repo in &config.repos {
        match sync_repo(driver, config, repo).await {
            Ok(()) => synced += 1,
            Err(e) => {
                warn!("sync failed on {}: {}", repo, e);
                return Err(e);
            }
        }
    }
    Ok(synced)
}
