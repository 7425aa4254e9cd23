//! Small pure helpers behind the GUI widgets.
//!
//! Kept free of egui types so they stay unit-testable.

/// The weekday checkboxes, in display order.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Checkbox states for the configured weekday list.
pub fn weekday_flags(selected: &[String]) -> [bool; 7] {
    let mut flags = [false; 7];
    for (i, name) in WEEKDAY_NAMES.iter().enumerate() {
        flags[i] = selected.iter().any(|day| day == name);
    }
    flags
}

/// Configured weekday list for the checkbox states.
pub fn selected_weekdays(flags: &[bool; 7]) -> Vec<String> {
    WEEKDAY_NAMES
        .iter()
        .zip(flags.iter())
        .filter(|(_, &checked)| checked)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Best-effort numeric coercion for a text field mid-edit.
///
/// Returns `None` for incomplete typing ("", "-", "1.") so the caller
/// keeps the previous value instead of erroring on every keystroke.
pub fn parse_field_f64(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}

/// Same, for integer fields.
pub fn parse_field_u64(text: &str) -> Option<u64> {
    text.trim().parse().ok()
}

/// One line for the console, prefixed the way process-lifecycle markers
/// are rendered.
pub fn lifecycle_line(message: &str) -> String {
    format!("--- {} ---", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_flags_round_trip() {
        let selected = vec!["Monday".to_string(), "Sunday".to_string()];
        let flags = weekday_flags(&selected);
        assert_eq!(
            flags,
            [true, false, false, false, false, false, true]
        );
        assert_eq!(selected_weekdays(&flags), selected);
    }

    #[test]
    fn test_weekday_flags_ignores_unknown_names() {
        let flags = weekday_flags(&vec!["Funday".to_string()]);
        assert_eq!(flags, [false; 7]);
    }

    #[test]
    fn test_parse_field_accepts_complete_numbers() {
        assert_eq!(parse_field_f64("8.5"), Some(8.5));
        assert_eq!(parse_field_u64(" 30 "), Some(30));
    }

    #[test]
    fn test_parse_field_rejects_partial_typing() {
        assert_eq!(parse_field_f64(""), None);
        assert_eq!(parse_field_f64("-"), None);
        assert_eq!(parse_field_u64("3x"), None);
    }

    #[test]
    fn test_lifecycle_line() {
        assert_eq!(lifecycle_line("Bot started"), "--- Bot started ---");
    }
}
