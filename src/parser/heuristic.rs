//! Fallback parse strategy for CORs that do not use the tabular layout.
//!
//! Runs only when the table strategy finds nothing. Per line, a
//! priority-ordered set of loose patterns recovers `(code, name)` pairs;
//! instructor, room, and meeting times are then searched in the same line
//! plus the two following lines. Every matcher here is a plain
//! [`regex::Regex`] queried with `captures` — a pure function of the input
//! line with no scan cursor carried between calls.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use super::time::{collapse_whitespace, expand_day_letters, to_24_hour};
use super::{ParseStrategy, StrategyKind};
use crate::schedule::{correct_code, palette_color, Course, ScheduleData, ScheduleEntry};

// ── Course patterns, in priority order ───────────────────────────────────

/// `CODE - Name (N units)`
static RE_CODE_DASH_NAME_CREDITS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Z]{2,4}\s?\d{3}[A-Z]?)\s*[-–]\s*([^(]+)\s*\((\d+)\s*(?:units?|credits?|hrs?)\)")
        .expect("credits pattern must compile")
});

/// `Name - CODE`
static RE_NAME_DASH_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([^-–]+)\s*[-–]\s*([A-Z]{2,4}\s?\d{3}[A-Z]?)").expect("name-code pattern must compile")
});

/// `CODE Name` spanning the whole line.
static RE_CODE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z]{2,6}\s?\d{2,4}[A-Z]?)\s+([A-Za-z][A-Za-z\s&]*?)\s*$")
        .expect("code-name pattern must compile")
});

/// Space-delimited code phrases such as `Path Fit 3`, followed by a name.
static RE_SPACED_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z][A-Za-z ]+?\d+)\s+([A-Za-z][A-Za-z &]*?)\s*$")
        .expect("spaced-code pattern must compile")
});

// ── Context patterns ─────────────────────────────────────────────────────

static RE_INSTRUCTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:instructor|prof|dr|teacher)[\s:]*([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)")
        .expect("instructor pattern must compile")
});

static RE_ROOM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:room|location|bldg|building)[\s:]*([A-Z0-9\s-]+)")
        .expect("room pattern must compile")
});

// ── Time patterns, in priority order ─────────────────────────────────────

/// `Weekday H:MM-H:MM [AM/PM]`
static RE_DAY_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)\s+(\d{1,2}:\d{2})\s*[-–]\s*(\d{1,2}:\d{2})\s*(AM|PM)?",
    )
    .expect("day-time pattern must compile")
});

/// `DayLetters H:MM-H:MM [AM/PM]`, e.g. `MWF 9:00-10:30`
static RE_LETTERS_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([MTWRFSU]+)\s+(\d{1,2}:\d{2})\s*[-–]\s*(\d{1,2}:\d{2})\s*(?i:(AM|PM))?")
        .expect("letters-time pattern must compile")
});

/// `H:MM [AM/PM] - H:MM [AM/PM] DayLetters`
static RE_TIME_LETTERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2}:\d{2})\s*(?i:(AM|PM))?\s*[-–]\s*(\d{1,2}:\d{2})\s*(?i:(AM|PM))?\s+([MTWRFSU]+)")
        .expect("time-letters pattern must compile")
});

/// The heuristic fallback strategy. See the module docs.
pub struct HeuristicStrategy;

impl ParseStrategy for HeuristicStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Heuristic
    }

    fn parse(&self, text: &str) -> ScheduleData {
        let mut courses: Vec<Course> = Vec::new();
        let mut schedule: Vec<ScheduleEntry> = Vec::new();
        let lines: Vec<&str> = text.lines().collect();

        for (i, raw) in lines.iter().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let Some((code, name, units)) = match_course(line) else {
                continue;
            };
            let code = correct_code(&collapse_whitespace(&code));
            let name = collapse_whitespace(&name);

            // Instructor, room, and times may trail the course mention by a
            // line or two in free-form CORs.
            let window = context_window(&lines, i);

            let (course_id, color) = match courses.iter().find(|c| c.code == code) {
                Some(existing) => {
                    trace!(%code, "reusing course for repeated mention");
                    (existing.id, existing.color.clone())
                }
                None => {
                    let instructor = RE_INSTRUCTOR
                        .captures(&window)
                        .map(|c| c[1].trim().to_string())
                        .unwrap_or_else(|| "TBA".to_string());
                    let course = Course {
                        id: courses.len() as u32 + 1,
                        code: code.clone(),
                        name,
                        section: None,
                        units,
                        room: None,
                        instructor: Some(instructor),
                        color: palette_color(courses.len()).to_string(),
                    };
                    debug!(code = %course.code, "heuristic strategy recovered course");
                    let handle = (course.id, course.color.clone());
                    courses.push(course);
                    handle
                }
            };

            // Same first-token cleanup as the table strategy: the loose
            // character class can run past the room into the next field.
            let room = RE_ROOM
                .captures(&window)
                .and_then(|c| c[1].split_whitespace().next().map(str::to_string))
                .unwrap_or_else(|| "TBA".to_string());

            for (day, start_time, end_time) in match_meetings(&window) {
                schedule.push(ScheduleEntry {
                    course_id,
                    day,
                    start_time,
                    end_time,
                    room: room.clone(),
                    color: color.clone(),
                });
            }
        }

        ScheduleData { courses, schedule }
    }
}

/// The line itself plus the two following lines, space-joined.
fn context_window(lines: &[&str], i: usize) -> String {
    let mut window = lines[i].trim().to_string();
    for follow in lines.iter().skip(i + 1).take(2) {
        window.push(' ');
        window.push_str(follow.trim());
    }
    window
}

/// Try the course patterns in priority order. Returns `(code, name, units)`.
fn match_course(line: &str) -> Option<(String, String, u32)> {
    if let Some(caps) = RE_CODE_DASH_NAME_CREDITS.captures(line) {
        let units = caps[3].parse().unwrap_or(3);
        return Some((caps[1].to_string(), caps[2].trim().to_string(), units));
    }
    if let Some(caps) = RE_NAME_DASH_CODE.captures(line) {
        return Some((caps[2].to_string(), caps[1].trim().to_string(), 3));
    }
    if let Some(caps) = RE_CODE_NAME.captures(line) {
        return Some((caps[1].to_string(), caps[2].to_string(), 3));
    }
    if let Some(caps) = RE_SPACED_CODE.captures(line) {
        return Some((caps[1].to_string(), caps[2].to_string(), 3));
    }
    None
}

/// Try the time/day patterns in priority order against the context window.
/// Returns zero or more `(day, start, end)` meetings; packed day letters
/// yield one meeting per represented day with a shared time range.
fn match_meetings(window: &str) -> Vec<(String, String, String)> {
    if let Some(caps) = RE_DAY_TIME.captures(window) {
        let period = caps.get(4).map(|m| m.as_str());
        return vec![(
            capitalize_day(&caps[1]),
            to_24_hour(&caps[2], period),
            to_24_hour(&caps[3], period),
        )];
    }

    if let Some(caps) = RE_LETTERS_TIME.captures(window) {
        let period = caps.get(4).map(|m| m.as_str());
        let start = to_24_hour(&caps[2], period);
        let end = to_24_hour(&caps[3], period);
        return expand_day_letters(&caps[1])
            .into_iter()
            .map(|day| (day.to_string(), start.clone(), end.clone()))
            .collect();
    }

    if let Some(caps) = RE_TIME_LETTERS.captures(window) {
        let start = to_24_hour(&caps[1], caps.get(2).map(|m| m.as_str()));
        let end = to_24_hour(&caps[3], caps.get(4).map(|m| m.as_str()));
        return expand_day_letters(&caps[5])
            .into_iter()
            .map(|day| (day.to_string(), start.clone(), end.clone()))
            .collect();
    }

    Vec::new()
}

/// Canonicalise a weekday name matched case-insensitively.
fn capitalize_day(day: &str) -> String {
    let mut chars = day.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ScheduleData {
        HeuristicStrategy.parse(text)
    }

    #[test]
    fn code_dash_name_with_credits() {
        let data = parse("CS 101 - Introduction to Computing (3 units)\n");
        assert_eq!(data.courses.len(), 1);
        let course = &data.courses[0];
        assert_eq!(course.code, "CS 101");
        assert_eq!(course.name, "Introduction to Computing");
        assert_eq!(course.units, 3);
        assert_eq!(course.instructor.as_deref(), Some("TBA"));
        assert!(course.section.is_none());
    }

    #[test]
    fn name_dash_code() {
        let data = parse("Data Structures - CS 201\n");
        assert_eq!(data.courses[0].code, "CS 201");
        assert_eq!(data.courses[0].name, "Data Structures");
        assert_eq!(data.courses[0].units, 3);
    }

    #[test]
    fn code_followed_by_name() {
        let data = parse("IT 101 Introduction to Programming\n");
        assert_eq!(data.courses[0].code, "IT 101");
        assert_eq!(data.courses[0].name, "Introduction to Programming");
    }

    #[test]
    fn spaced_code_phrase() {
        let data = parse("Path Fit 3 Physical Fitness\n");
        assert_eq!(data.courses[0].code, "Path Fit 3");
        assert_eq!(data.courses[0].name, "Physical Fitness");
    }

    #[test]
    fn day_letters_expand_to_one_entry_per_day() {
        let data = parse("IT 101 Introduction to Programming\nMWF 9:00-10:30\n");
        assert_eq!(data.courses.len(), 1);
        assert_eq!(data.schedule.len(), 3);
        let days: Vec<&str> = data.schedule.iter().map(|e| e.day.as_str()).collect();
        assert_eq!(days, vec!["Monday", "Wednesday", "Friday"]);
        for entry in &data.schedule {
            assert_eq!(entry.start_time, "09:00");
            assert_eq!(entry.end_time, "10:30");
            assert_eq!(entry.course_id, 1);
        }
    }

    #[test]
    fn weekday_time_pattern() {
        let data = parse("CS 101 - Introduction to Computing (3 units)\nMonday 9:00-10:30 AM\n");
        assert_eq!(data.schedule.len(), 1);
        assert_eq!(data.schedule[0].day, "Monday");
        assert_eq!(data.schedule[0].start_time, "09:00");
        assert_eq!(data.schedule[0].end_time, "10:30");
    }

    #[test]
    fn time_first_pattern() {
        let data = parse("Data Structures - CS 201\n1:00 PM - 2:30 PM TR\n");
        assert_eq!(data.schedule.len(), 2);
        assert_eq!(data.schedule[0].day, "Tuesday");
        assert_eq!(data.schedule[1].day, "Thursday");
        assert_eq!(data.schedule[0].start_time, "13:00");
        assert_eq!(data.schedule[0].end_time, "14:30");
    }

    #[test]
    fn instructor_and_room_found_in_following_lines() {
        let data = parse(
            "IT 101 Introduction to Programming\nMWF 8:00-9:00 Room 204\nInstructor: Jane Smith\n",
        );
        let course = &data.courses[0];
        assert_eq!(course.instructor.as_deref(), Some("Jane Smith"));
        assert!(!data.schedule.is_empty());
        assert_eq!(data.schedule[0].room, "204");
    }

    #[test]
    fn repeated_code_reuses_course() {
        let data = parse(
            "IT 101 Introduction to Programming\nMWF 9:00-10:30\n\nIT 101 Introduction to Programming\nTR 1:00-2:00\n",
        );
        assert_eq!(data.courses.len(), 1);
        let ids: Vec<u32> = data.schedule.iter().map(|e| e.course_id).collect();
        assert!(ids.iter().all(|&id| id == 1));
        assert!(data.schedule.len() >= 5, "MWF plus TR meetings expected");
    }

    #[test]
    fn course_without_meetings_still_recovered() {
        let data = parse("GEC 103 Ethics and Society\n");
        assert_eq!(data.courses.len(), 1);
        assert!(data.schedule.is_empty());
    }

    #[test]
    fn plain_prose_yields_nothing() {
        let data = parse("please see the registrar for your schedule\n");
        assert!(data.is_empty());
    }
}
