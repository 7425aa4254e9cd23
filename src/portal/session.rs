//! Browser session against the portal.
//!
//! Wraps one thirtyfour `WebDriver` pointed at a local chromedriver. The
//! Chrome profile lives in a persistent directory next to the executable,
//! so cookies survive restarts and most runs skip the login forms entirely.
//!
//! Interaction helpers pace themselves with small random delays; the
//! portal frontend watches for robotic input timing.

use std::path::Path;
use std::time::Duration;

use rand::Rng;
use thirtyfour::prelude::*;
use thirtyfour::{By, DesiredCapabilities, WebDriver};

use crate::error::Result;
use crate::output;
use crate::portal::selectors;

/// Default wait for an element to appear or become clickable.
pub const ELEMENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Short wait used when probing for the homepage marker.
pub const MARKER_TIMEOUT: Duration = Duration::from_secs(5);

/// Hard ceiling on waiting for the homepage after the login chain. A
/// passkey prompt needs the user to touch a key, so this is generous.
pub const LOGIN_WAIT_CEILING: Duration = Duration::from_secs(60);

/// Polling interval for element waits.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Settle time after opening a day cell, before its shift rows are read.
pub const DAY_SETTLE: Duration = Duration::from_secs(2);

/// An authenticated (or about-to-be-authenticated) portal browser session.
pub struct PortalSession {
    driver: WebDriver,
}

impl PortalSession {
    /// Start a Chrome session through `webdriver_url` with the persistent
    /// profile at `profile_dir`, and open the portal login page.
    pub async fn connect(webdriver_url: &str, profile_dir: &Path) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_arg(&format!("--user-data-dir={}", profile_dir.display()))?;
        caps.add_arg("--disable-blink-features=AutomationControlled")?;

        let driver = WebDriver::new(webdriver_url, caps).await?;
        driver.goto(selectors::LOGIN_URL).await?;

        Ok(Self { driver })
    }

    pub fn driver(&self) -> &WebDriver {
        &self.driver
    }

    /// Wait up to `timeout` for the element at `xpath` to be present.
    pub async fn wait_for(&self, xpath: &str, timeout: Duration) -> Result<WebElement> {
        let element = self
            .driver
            .query(By::XPath(xpath))
            .wait(timeout, POLL_INTERVAL)
            .first()
            .await?;
        Ok(element)
    }

    /// Find without waiting. Absence is an error for the caller to map.
    pub async fn find(&self, xpath: &str) -> Result<WebElement> {
        Ok(self.driver.find(By::XPath(xpath)).await?)
    }

    /// All elements currently matching `xpath` (possibly empty).
    pub async fn find_all(&self, xpath: &str) -> Result<Vec<WebElement>> {
        Ok(self.driver.find_all(By::XPath(xpath)).await?)
    }

    /// Wait for clickability, pause a beat, then click.
    pub async fn click_paced(&self, element: &WebElement) -> Result<()> {
        element
            .wait_until()
            .wait(ELEMENT_TIMEOUT, POLL_INTERVAL)
            .clickable()
            .await?;
        let pause = { rand::thread_rng().gen_range(300..=700) };
        tokio::time::sleep(Duration::from_millis(pause)).await;
        element.click().await?;
        Ok(())
    }

    /// Type `text` one character at a time with random per-character pauses.
    pub async fn type_like_human(&self, element: &WebElement, text: &str) -> Result<()> {
        for ch in text.chars() {
            element.send_keys(ch.to_string()).await?;
            let pause = { rand::thread_rng().gen_range(0..=100) };
            tokio::time::sleep(Duration::from_millis(pause)).await;
        }
        Ok(())
    }

    /// True if the authenticated homepage marker shows up within the short
    /// probe timeout.
    pub async fn is_logged_in(&self) -> bool {
        self.wait_for(selectors::HOMEPAGE_IDENTIFIER, MARKER_TIMEOUT)
            .await
            .is_ok()
    }

    /// Navigate back to the homepage through the burger menu. Failures are
    /// logged and swallowed; the next scan pass re-navigates from wherever
    /// the session ended up.
    pub async fn back_home(&self) {
        let result: Result<()> = async {
            let burger = self.wait_for(selectors::MENU_BURGER, ELEMENT_TIMEOUT).await?;
            burger.click().await?;

            let home = self.wait_for(selectors::HOME_NAV_ITEM, ELEMENT_TIMEOUT).await?;
            // The drawer slides out; clicking mid-animation misses.
            tokio::time::sleep(Duration::from_millis(500)).await;
            home.click().await?;
            Ok(())
        }
        .await;

        if let Err(e) = result {
            output::print_warning(&format!("Error returning home: {}", e));
        }
    }

    /// Close the browser session.
    pub async fn quit(self) -> Result<()> {
        self.driver.quit().await?;
        Ok(())
    }
}
