//! Element paths for the A to Z portal.
//!
//! These are positional/structural XPaths tied to one specific page layout.
//! Brittle by construction: a markup change on the portal side breaks them,
//! and the fix is to update the paths here.

/// Login entry point. The persistent browser profile keeps the session
/// cookies, so this usually redirects straight to the homepage.
pub const LOGIN_URL: &str = "https://atoz-login.amazon.work";

/// Element that only exists on the authenticated homepage. Its presence is
/// the session marker the login gate waits on.
pub const HOMEPAGE_IDENTIFIER: &str = "//*[@id='atoz-app-root']/div[2]/div[1]/div[3]/h2";

/// Burger button opening the global navigation drawer.
pub const MENU_BURGER: &str =
    "//*[@id='atoz-global-nav-header']/div/div/header/div/div/nav/ul/li[1]/button";

/// Home item inside the navigation drawer.
pub const HOME_NAV_ITEM: &str = "//*[@id='side-nav-item-top-level-home_nav_item_0']";

/// "Schedule" group inside the navigation drawer.
pub const SCHEDULE_NAV_ITEM: &str =
    "/html/body/div[3]/div[2]/div/div[2]/div/nav/div[2]/div/ul/li[2]/button";

/// "Find Shifts" link under the schedule group.
pub const FIND_SHIFTS_NAV_ITEM: &str =
    "/html/body/div[3]/div[2]/div/div[2]/div/nav/div[2]/div/ul/li[2]/div/ul/li[4]/div/a";

/// Username input on the primary login form.
pub const PRIMARY_LOGIN_INPUT: &str = "//*[@id='associate-login-input']";

/// Submit button on the primary login form.
pub const PRIMARY_LOGIN_BUTTON: &str = "//*[@id='login-form-login-btn']";

/// Username input on the secondary login form.
pub const SECONDARY_LOGIN_INPUT: &str = "//*[@id='input-id-4']";

/// Submit button on the secondary login form.
pub const SECONDARY_LOGIN_BUTTON: &str = "//*[@id='root']/div[1]/div[2]/div/div[2]/div/button";

/// Button starting the passkey / hardware-key prompt.
pub const PASSKEY_BUTTON: &str =
    "//*[@id='root']/div[1]/div[2]/div/div[2]/div[2]/div[1]/button";

/// Container of all shift rows for the currently opened day.
pub const SHIFT_ROWS: &str =
    "//*[@id='atoz-app-root']/div[1]/div/div[3]/div[1]/div/div[3]/div[2]/div";

/// "Done" button on the post-claim confirmation dialog.
pub const CLAIM_DONE_BUTTON: &str =
    "//button[@data-test-id='AddOpportunityModalSuccessDoneButton']";

/// Container of the day cell at 1-based `position` in the calendar strip.
pub fn day_container(position: usize) -> String {
    format!(
        "//*[@id='atoz-app-root']/div[1]/div/div[2]/div/div[{}]",
        position
    )
}

/// Weekday label inside a day cell.
pub fn day_weekday_label(position: usize) -> String {
    format!("{}/div/div[1]", day_container(position))
}

/// Date label inside a day cell.
pub fn day_date_label(position: usize) -> String {
    format!("{}/div/div[2]", day_container(position))
}

/// Time-range text of the shift row at 1-based `row` for the opened day.
pub fn shift_time_label(row: usize) -> String {
    format!(
        "//*[@id='atoz-app-root']/div[1]/div/div[3]/div[1]/div/div[3]/div[2]/div[{}]/div/div[1]/div[1]/div[1]/div[1]/div/strong",
        row
    )
}

/// Claim ("Add") button of the shift row at 1-based `row`.
pub fn shift_claim_button(row: usize) -> String {
    format!(
        "//*[@id='atoz-app-root']/div[1]/div/div[3]/div[1]/div/div[3]/div[2]/div[{}]/div/div[2]/div/button",
        row
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_paths_embed_position() {
        assert!(day_container(7).ends_with("div[7]"));
        assert!(day_date_label(7).contains("div[7]"));
        assert!(shift_time_label(3).contains("div[3]/div/div[1]"));
        assert!(shift_claim_button(3).contains("div[3]/div/div[2]"));
    }
}
