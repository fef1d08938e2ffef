//! Time and weekday normalisation helpers shared by both parse strategies.
//!
//! COR documents print times in 12-hour notation with inconsistent spacing
//! (`06:00 PM`, `01:00PM`) and days either as 3-letter codes (`MON`) or as
//! packed letter runs (`MWF`, with `R` = Thursday and `U` = Sunday). All
//! schedule entries leave the parser in 24-hour `HH:MM` form with full
//! weekday names so downstream consumers never re-interpret notation.

/// Convert an `H:MM`-ish time plus optional AM/PM period to 24-hour `HH:MM`.
///
/// Standard noon/midnight rules: 12 PM stays 12, 12 AM becomes 00, other PM
/// hours add 12. Missing minutes default to `00`; a missing or unparseable
/// hour yields `09:00` (the parser only reaches that case inside a row that
/// matched everything else).
pub fn to_24_hour(time: &str, period: Option<&str>) -> String {
    let mut parts = time.trim().splitn(2, ':');
    let hours = parts.next().and_then(|h| h.parse::<u32>().ok());
    let minutes = parts.next().unwrap_or("00");

    let Some(mut hours) = hours else {
        return "09:00".to_string();
    };

    match period.map(str::to_ascii_uppercase).as_deref() {
        Some("PM") if hours != 12 => hours += 12,
        Some("AM") if hours == 12 => hours = 0,
        _ => {}
    }

    format!("{hours:02}:{minutes}")
}

/// Map a 3-letter day code to the full weekday name. Unrecognised codes are
/// returned unchanged rather than rejected — OCR noise in the day column
/// must not drop an otherwise valid row.
pub fn day_code_to_name(code: &str) -> String {
    match code {
        "MON" => "Monday",
        "TUE" => "Tuesday",
        "WED" => "Wednesday",
        "THU" => "Thursday",
        "FRI" => "Friday",
        "SAT" => "Saturday",
        "SUN" => "Sunday",
        other => return other.to_string(),
    }
    .to_string()
}

/// Expand a packed day-letter run (`MWF`, `TR`, …) into full weekday names.
///
/// `M`=Monday, `T`=Tuesday, `W`=Wednesday, `R`=Thursday, `F`=Friday,
/// `S`=Saturday, `U`=Sunday. Unknown letters are dropped.
pub fn expand_day_letters(letters: &str) -> Vec<&'static str> {
    letters
        .chars()
        .filter_map(|c| match c {
            'M' => Some("Monday"),
            'T' => Some("Tuesday"),
            'W' => Some("Wednesday"),
            'R' => Some("Thursday"),
            'F' => Some("Friday"),
            'S' => Some("Saturday"),
            'U' => Some("Sunday"),
            _ => None,
        })
        .collect()
}

/// Collapse runs of whitespace to single spaces and trim. Applied to
/// multi-word subject/section fields before they are used as dedup keys.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noon_and_midnight_rules() {
        assert_eq!(to_24_hour("12:00", Some("PM")), "12:00");
        assert_eq!(to_24_hour("12:00", Some("AM")), "00:00");
        assert_eq!(to_24_hour("9:30", Some("PM")), "21:30");
        assert_eq!(to_24_hour("9:30", Some("AM")), "09:30");
    }

    #[test]
    fn missing_period_passes_through() {
        assert_eq!(to_24_hour("14:15", None), "14:15");
        assert_eq!(to_24_hour("9:00", None), "09:00");
    }

    #[test]
    fn missing_minutes_default_to_zero() {
        assert_eq!(to_24_hour("8", Some("AM")), "08:00");
        assert_eq!(to_24_hour("8", Some("PM")), "20:00");
    }

    #[test]
    fn unparseable_hour_falls_back() {
        assert_eq!(to_24_hour(":", Some("AM")), "09:00");
    }

    #[test]
    fn lowercase_period_accepted() {
        assert_eq!(to_24_hour("6:00", Some("pm")), "18:00");
    }

    #[test]
    fn all_seven_day_codes() {
        assert_eq!(day_code_to_name("MON"), "Monday");
        assert_eq!(day_code_to_name("TUE"), "Tuesday");
        assert_eq!(day_code_to_name("WED"), "Wednesday");
        assert_eq!(day_code_to_name("THU"), "Thursday");
        assert_eq!(day_code_to_name("FRI"), "Friday");
        assert_eq!(day_code_to_name("SAT"), "Saturday");
        assert_eq!(day_code_to_name("SUN"), "Sunday");
    }

    #[test]
    fn unknown_day_code_passes_through() {
        assert_eq!(day_code_to_name("XYZ"), "XYZ");
    }

    #[test]
    fn expands_packed_day_letters() {
        assert_eq!(expand_day_letters("MWF"), vec!["Monday", "Wednesday", "Friday"]);
        assert_eq!(expand_day_letters("TR"), vec!["Tuesday", "Thursday"]);
        assert_eq!(expand_day_letters("U"), vec!["Sunday"]);
        assert_eq!(expand_day_letters("MXW"), vec!["Monday", "Wednesday"]);
    }

    #[test]
    fn collapses_inner_whitespace() {
        assert_eq!(collapse_whitespace("  BSIT   2F "), "BSIT 2F");
        assert_eq!(collapse_whitespace("Path\tFit  3"), "Path Fit 3");
    }
}
