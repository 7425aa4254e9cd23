//! Authentication gate.
//!
//! The portal has accumulated three login surfaces: the classic username
//! form, a newer form behind an A/B flag, and a passkey prompt. Which one a
//! given session lands on is not predictable, so the gate tries them in
//! order as a chain of named strategies, each best-effort. After each
//! attempt the homepage marker is probed; the first strategy that yields an
//! authenticated session wins. If the whole chain runs dry, one final
//! bounded wait covers the manual-interaction case before giving up.

use crate::error::{Result, ShiftgrabError};
use crate::output;
use crate::portal::selectors;
use crate::portal::session::{PortalSession, ELEMENT_TIMEOUT, LOGIN_WAIT_CEILING};

/// One way of getting past the login wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStrategy {
    /// The classic associate-login form.
    PrimaryForm,
    /// The redesigned login form some sessions are routed to.
    SecondaryForm,
    /// Passkey / hardware security key prompt. Triggers a native browser
    /// dialog the user has to complete by hand.
    Passkey,
}

/// The strategies, in the order they are tried.
pub const LOGIN_CHAIN: [LoginStrategy; 3] = [
    LoginStrategy::PrimaryForm,
    LoginStrategy::SecondaryForm,
    LoginStrategy::Passkey,
];

impl LoginStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            LoginStrategy::PrimaryForm => "primary login form",
            LoginStrategy::SecondaryForm => "secondary login form",
            LoginStrategy::Passkey => "passkey prompt",
        }
    }

    /// Run this strategy once. Returns `true` if the interaction itself
    /// went through; whether it actually produced a session is decided by
    /// the marker probe afterwards.
    async fn attempt(&self, session: &PortalSession, login_id: &str) -> bool {
        let result: Result<()> = match self {
            LoginStrategy::PrimaryForm => {
                submit_username_form(
                    session,
                    login_id,
                    selectors::PRIMARY_LOGIN_INPUT,
                    selectors::PRIMARY_LOGIN_BUTTON,
                )
                .await
            }
            LoginStrategy::SecondaryForm => {
                submit_username_form(
                    session,
                    login_id,
                    selectors::SECONDARY_LOGIN_INPUT,
                    selectors::SECONDARY_LOGIN_BUTTON,
                )
                .await
            }
            LoginStrategy::Passkey => start_passkey_prompt(session).await,
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                output::print_detail(&format!("{} not available: {}", self.name(), e));
                false
            }
        }
    }
}

async fn submit_username_form(
    session: &PortalSession,
    login_id: &str,
    input_xpath: &str,
    button_xpath: &str,
) -> Result<()> {
    let input = session.wait_for(input_xpath, ELEMENT_TIMEOUT).await?;
    session.type_like_human(&input, login_id).await?;

    let button = session.find(button_xpath).await?;
    session.click_paced(&button).await?;
    Ok(())
}

async fn start_passkey_prompt(session: &PortalSession) -> Result<()> {
    let button = session.wait_for(selectors::PASSKEY_BUTTON, ELEMENT_TIMEOUT).await?;
    session.click_paced(&button).await?;

    output::print_warning("--- MANUAL INTERACTION REQUIRED ---");
    output::print_warning("Complete the security key prompt in the browser window.");
    Ok(())
}

/// Ensure an authenticated session exists before scanning begins.
///
/// Short-circuits if the persistent profile still carries a valid session.
/// Otherwise walks the strategy chain; a final wait of up to
/// [`LOGIN_WAIT_CEILING`] covers slow redirects and manual passkey entry.
///
/// # Errors
///
/// [`ShiftgrabError::LoginTimeout`] if the homepage marker never appears.
/// There is no retry policy for authentication; the caller aborts the run.
pub async fn ensure_authenticated(session: &PortalSession, login_id: &str) -> Result<()> {
    output::print_status("Checking for existing session...");
    if session.is_logged_in().await {
        output::print_status("Already logged in, skipping login sequence.");
        return Ok(());
    }

    output::print_status("Session not found. Attempting login...");
    for strategy in LOGIN_CHAIN {
        output::print_status(&format!("Trying {}...", strategy.name()));
        if strategy.attempt(session, login_id).await && session.is_logged_in().await {
            output::print_status(&format!("Login successful via {}.", strategy.name()));
            return Ok(());
        }
    }

    output::print_status("Waiting for the homepage to appear...");
    session
        .wait_for(selectors::HOMEPAGE_IDENTIFIER, LOGIN_WAIT_CEILING)
        .await
        .map_err(|_| ShiftgrabError::LoginTimeout(LOGIN_WAIT_CEILING.as_secs()))?;

    output::print_status("Login successful. Homepage detected.");
    Ok(())
}
