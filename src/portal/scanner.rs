//! Calendar scanning and shift claiming.
//!
//! One scan pass walks the rendered day strip in display order, opens every
//! day that passes the date-window and weekday filters, and claims each
//! shift whose start time and duration fit the configured bounds.
//!
//! Failure policy, from the outside in: a navigation failure abandons the
//! pass; a day-container lookup failure is read as the end of the rendered
//! calendar and stops the pass (this conflates a transient lookup failure
//! with list exhaustion — known limitation, kept as-is); a per-row lookup
//! or parse failure skips just that row.

use std::path::Path;

use chrono::Local;

use crate::calendar::{classify_day, DayVerdict, ScanWindow};
use crate::clock::{MatchCriteria, ShiftCandidate};
use crate::config::BotConfig;
use crate::error::Result;
use crate::output;
use crate::portal::selectors;
use crate::portal::session::{PortalSession, DAY_SETTLE, ELEMENT_TIMEOUT};

/// Day positions visited per pass. The strip never renders more than two
/// months of cells, so running off the end is detected by lookup failure
/// well before this bound.
const MAX_DAY_POSITIONS: usize = 59;

/// Counters for one scan pass, for the end-of-pass log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub days_checked: usize,
    pub shifts_seen: usize,
    pub claims: usize,
}

/// Run one full scan pass over the Find Shifts calendar.
///
/// The configuration is re-read from `config_path` at the start of every
/// day iteration, so filter edits made while the pass is running apply to
/// the next day processed, not retroactively.
pub async fn run_scan_pass(session: &PortalSession, config_path: &Path) -> Result<ScanSummary> {
    let mut summary = ScanSummary::default();

    if let Err(e) = navigate_to_find_shifts(session).await {
        output::print_warning(&format!("Navigation to Find Shifts failed: {}", e));
        return Ok(summary);
    }

    let today = Local::now().date_naive();
    let window = ScanWindow::next_30_days(today);
    output::print_scan_start(&window);

    for position in 1..=MAX_DAY_POSITIONS {
        let config = BotConfig::load(config_path);

        let (date_text, weekday_text) = match read_day_labels(session, position).await {
            Some(labels) => labels,
            None => {
                output::print_detail(&format!(
                    "End of schedule strip reached at day {}.",
                    position
                ));
                break;
            }
        };

        match classify_day(&date_text, &weekday_text, &window, &config, today) {
            DayVerdict::SkipUnparsed => {
                output::print_day_skipped(position, &format!("unreadable date {:?}", date_text));
            }
            DayVerdict::Stop => {
                output::print_scan_stopped(&date_text);
                break;
            }
            DayVerdict::SkipBeforeWindow => {
                output::print_day_skipped(position, &format!("{} is before the window", date_text));
            }
            DayVerdict::SkipWeekday => {
                output::print_day_skipped(
                    position,
                    &format!("{} excluded by weekday filter", weekday_text),
                );
            }
            DayVerdict::Check(_) => {
                output::print_day_checking(position, &weekday_text, &date_text);
                if !open_day(session, position).await {
                    // Day container gone: same end-of-calendar reading as a
                    // missing label.
                    output::print_detail(&format!(
                        "End of schedule strip reached at day {}.",
                        position
                    ));
                    break;
                }
                summary.days_checked += 1;
                scan_day_shifts(session, &config, &mut summary).await;
            }
        }
    }

    output::print_pass_summary(summary.days_checked, summary.shifts_seen, summary.claims);
    Ok(summary)
}

async fn navigate_to_find_shifts(session: &PortalSession) -> Result<()> {
    let burger = session.wait_for(selectors::MENU_BURGER, ELEMENT_TIMEOUT).await?;
    session.click_paced(&burger).await?;

    let schedule = session
        .wait_for(selectors::SCHEDULE_NAV_ITEM, ELEMENT_TIMEOUT)
        .await?;
    session.click_paced(&schedule).await?;

    let find_shifts = session
        .wait_for(selectors::FIND_SHIFTS_NAV_ITEM, ELEMENT_TIMEOUT)
        .await?;
    session.click_paced(&find_shifts).await?;

    output::print_status("Navigated to Find Shifts.");
    Ok(())
}

/// Read the (date, weekday) labels for the day cell at `position`.
/// `None` means the cell isn't there, which the caller reads as the end of
/// the rendered calendar.
async fn read_day_labels(session: &PortalSession, position: usize) -> Option<(String, String)> {
    let date_element = session
        .wait_for(&selectors::day_date_label(position), ELEMENT_TIMEOUT)
        .await
        .ok()?;
    let date_text = date_element.text().await.ok()?;

    let weekday_element = session.find(&selectors::day_weekday_label(position)).await.ok()?;
    let weekday_text = weekday_element.text().await.ok()?;

    Some((
        date_text.trim().replace('\n', " "),
        weekday_text.trim().to_string(),
    ))
}

/// Click the day cell open and let the shift list render.
async fn open_day(session: &PortalSession, position: usize) -> bool {
    let container = match session.find(&selectors::day_container(position)).await {
        Ok(el) => el,
        Err(_) => return false,
    };
    if container.click().await.is_err() {
        return false;
    }
    tokio::time::sleep(DAY_SETTLE).await;
    true
}

/// Iterate the opened day's shift rows, claiming every qualifying shift.
/// Row-level failures skip that row only.
async fn scan_day_shifts(session: &PortalSession, config: &BotConfig, summary: &mut ScanSummary) {
    let criteria = match MatchCriteria::from_config(config) {
        Ok(criteria) => criteria,
        Err(e) => {
            output::print_warning(&format!("Skipping day, bad time bounds in config: {}", e));
            return;
        }
    };

    let rows = match session.find_all(selectors::SHIFT_ROWS).await {
        Ok(rows) => rows,
        Err(_) => Vec::new(),
    };

    if rows.is_empty() {
        output::print_no_shifts();
        return;
    }

    for row in 1..=rows.len() {
        let time_text = match read_shift_time(session, row).await {
            Some(text) => text,
            None => continue,
        };

        let shift = match ShiftCandidate::parse(&time_text) {
            Ok(shift) => shift,
            Err(_) => {
                output::print_detail(&format!("  Unreadable shift time {:?}, skipping.", time_text));
                continue;
            }
        };
        summary.shifts_seen += 1;

        if !criteria.qualifies(&shift) {
            continue;
        }

        output::print_match_found(&time_text, shift.duration_hours);
        if claim_shift(session, row).await {
            summary.claims += 1;
        }
    }
}

async fn read_shift_time(session: &PortalSession, row: usize) -> Option<String> {
    let element = session.find(&selectors::shift_time_label(row)).await.ok()?;
    element.text().await.ok()
}

/// Click the row's Add button if it really is an Add button, then try to
/// dismiss the confirmation dialog. Confirmation failure is swallowed: if
/// the Add click landed, the claim is assumed to have gone through.
async fn claim_shift(session: &PortalSession, row: usize) -> bool {
    let button = match session.find(&selectors::shift_claim_button(row)).await {
        Ok(button) => button,
        Err(_) => return false,
    };

    let aria_label = button.attr("aria-label").await.ok().flatten().unwrap_or_default();
    let text = button.text().await.unwrap_or_default();
    if !aria_label.contains("Add") && !text.contains("Add") {
        return false;
    }

    if session.click_paced(&button).await.is_err() {
        return false;
    }

    let confirmed: Result<()> = async {
        let done = session
            .wait_for(selectors::CLAIM_DONE_BUTTON, ELEMENT_TIMEOUT)
            .await?;
        done.click().await?;
        Ok(())
    }
    .await;

    if confirmed.is_ok() {
        output::print_claim_confirmed();
    }
    true
}
