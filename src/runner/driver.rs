use crate::Result;
use eoka::Page;

/// The browser operations the sync flow needs.
///
/// `PageDriver` is the live backend; tests script their own.
#[allow(async_fn_in_trait)]
pub trait Driver {
    async fn goto(&self, url: &str) -> Result<()>;
    async fn url(&self) -> Result<String>;
    async fn wait_for(&self, selector: &str, timeout_ms: u64) -> Result<()>;
    async fn fill(&self, selector: &str, value: &str) -> Result<()>;
    async fn press_key(&self, key: &str) -> Result<()>;
    async fn click(&self, selector: &str) -> Result<()>;
    async fn wait(&self, ms: u64);
    async fn screenshot(&self) -> Result<Vec<u8>>;
}

/// `Driver` backed by a live browser page.
pub struct PageDriver {
    page: Page,
}

impl PageDriver {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// Access the underlying page.
    pub fn page(&self) -> &Page {
        &self.page
    }
}

impl Driver for PageDriver {
    async fn goto(&self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        Ok(())
    }

    async fn url(&self) -> Result<String> {
        Ok(self.page.url().await?)
    }

    async fn wait_for(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        self.page.wait_for(selector, timeout_ms).await?;
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        self.page.fill(selector, value).await?;
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<()> {
        self.page.human().press_key(key).await?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.page.click(selector).await?;
        Ok(())
    }

    async fn wait(&self, ms: u64) {
        self.page.wait(ms).await;
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        Ok(self.page.screenshot().await?)
    }
}
