//! Primary parse strategy: the tabular COR format.
//!
//! Scans for a header line carrying the `Subject`, `Section`, and `Unit`
//! column titles, then matches each following line against one structured
//! row pattern. OCR renders of a COR frequently contain the same table
//! twice (the document prints a student copy and a registrar copy), so
//! scanning stops hard at a `Total Units` trailer or at a second header
//! line — whichever comes first.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use super::time::{collapse_whitespace, day_code_to_name, to_24_hour};
use super::{ParseStrategy, StrategyKind};
use crate::schedule::{correct_code, palette_color, Course, ScheduleData, ScheduleEntry};

/// One table row: subject, section, optional units, 3-letter day code,
/// 12-hour time range (dash- or whitespace-separated), room text.
///
/// The subject class admits `1` so OCR misreads like `1T 107` still match
/// and can be corrected afterwards.
static RE_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([A-Za-z1\s\d]+?)\s+([A-Z][A-Za-z\s\d]+?)\s+(\d+)?\s*([A-Z]{3})\s+([\d:]+\s*[AP]M\s*[-–]?\s*[\d:]+\s*[AP]M)\s+(.+)$",
    )
    .expect("table row pattern must compile")
});

/// Start/end halves of the matched time-range field.
static RE_TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([\d:]+)\s*([AP]M)\s*[-–]?\s*([\d:]+)\s*([AP]M)")
        .expect("time range pattern must compile")
});

/// The tabular COR strategy. See the module docs.
pub struct TableStrategy;

impl ParseStrategy for TableStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Table
    }

    fn parse(&self, text: &str) -> ScheduleData {
        let mut courses: Vec<Course> = Vec::new();
        let mut schedule: Vec<ScheduleEntry> = Vec::new();
        let mut in_table = false;

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if is_table_header(line) {
                if in_table {
                    // Duplicate render of the same table; everything after
                    // it would double the result.
                    debug!("second table header encountered, stopping scan");
                    break;
                }
                in_table = true;
                continue;
            }

            if line.contains("Total Units") {
                debug!("'Total Units' trailer encountered, stopping scan");
                break;
            }

            if !in_table {
                continue;
            }

            let Some(caps) = RE_ROW.captures(line) else {
                // Malformed row: skipped, not an error.
                trace!(line, "line inside table did not match row pattern");
                continue;
            };

            let subject = correct_code(&collapse_whitespace(&caps[1]));
            let section = collapse_whitespace(&caps[2]);
            let units = caps
                .get(3)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or(3);
            let day = day_code_to_name(&caps[4]);
            let (start_time, end_time) = parse_time_range(&caps[5]);
            // The room column leaks trailing text in OCR output (fee
            // amounts, signatures); keep only the first token.
            let room = caps[6]
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string();

            // One Course per (subject, section); repeated rows are further
            // meeting times of the same course.
            let (course_id, color) = match courses
                .iter()
                .find(|c| c.code == subject && c.section.as_deref() == Some(section.as_str()))
            {
                Some(existing) => {
                    trace!(code = %subject, %section, "reusing course for repeated row");
                    (existing.id, existing.color.clone())
                }
                None => {
                    let course = Course {
                        id: courses.len() as u32 + 1,
                        code: subject.clone(),
                        name: subject.clone(),
                        section: Some(section.clone()),
                        units,
                        room: Some(room.clone()),
                        instructor: None,
                        color: palette_color(courses.len()).to_string(),
                    };
                    let handle = (course.id, course.color.clone());
                    courses.push(course);
                    handle
                }
            };

            schedule.push(ScheduleEntry {
                course_id,
                day,
                start_time,
                end_time,
                room,
                color,
            });
        }

        ScheduleData { courses, schedule }
    }
}

/// A line is a table header when all three column titles appear on it,
/// regardless of their order or spacing.
fn is_table_header(line: &str) -> bool {
    line.contains("Subject") && line.contains("Section") && line.contains("Unit")
}

/// Split the matched time-range field into normalised 24-hour start/end.
///
/// Falls back to `09:00`–`10:00` only when the sub-match fails inside an
/// otherwise matched row; fully unmatched rows never reach this point.
fn parse_time_range(range: &str) -> (String, String) {
    match RE_TIME_RANGE.captures(range) {
        Some(caps) => (
            to_24_hour(&caps[1], Some(&caps[2])),
            to_24_hour(&caps[3], Some(&caps[4])),
        ),
        None => ("09:00".to_string(), "10:00".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ScheduleData {
        TableStrategy.parse(text)
    }

    const HEADER: &str = "Subject         Section    Unit    Day    Time                Room";

    #[test]
    fn parses_a_single_row() {
        let text = format!("{HEADER}\nIT 107          BSIT 2F    3       MON    06:00 PM-08:00 PM   Online\n");
        let data = parse(&text);
        assert_eq!(data.courses.len(), 1);
        assert_eq!(data.schedule.len(), 1);

        let course = &data.courses[0];
        assert_eq!(course.code, "IT 107");
        assert_eq!(course.section.as_deref(), Some("BSIT 2F"));
        assert_eq!(course.units, 3);

        let entry = &data.schedule[0];
        assert_eq!(entry.day, "Monday");
        assert_eq!(entry.start_time, "18:00");
        assert_eq!(entry.end_time, "20:00");
        assert_eq!(entry.room, "Online");
        assert_eq!(entry.color, course.color);
    }

    #[test]
    fn rows_before_header_are_ignored() {
        let text = "IT 107 BSIT 2F 3 MON 06:00 PM-08:00 PM Online\n";
        assert!(parse(text).is_empty());
    }

    #[test]
    fn whitespace_separated_time_range() {
        let text = format!("{HEADER}\nIT 108 BSIT 2F 3 TUE 01:00 PM 04:00 PM CpLab1\n");
        let data = parse(&text);
        assert_eq!(data.schedule[0].start_time, "13:00");
        assert_eq!(data.schedule[0].end_time, "16:00");
    }

    #[test]
    fn missing_units_default_to_three() {
        let text = format!("{HEADER}\n1T 107 BSIT 2F SAT 10:00AM 01:00PM CpLab3\n");
        let data = parse(&text);
        assert_eq!(data.courses[0].units, 3);
        // OCR confusion corrected at the same time.
        assert_eq!(data.courses[0].code, "IT 107");
        assert_eq!(data.schedule[0].day, "Saturday");
    }

    #[test]
    fn room_keeps_first_token_only() {
        let text = format!("{HEADER}\nPath Fit 3 BSIT 2F 2 TUE 08:00 AM-10:00 AM FIELD Tuition Fee 000\n");
        let data = parse(&text);
        assert_eq!(data.schedule[0].room, "FIELD");
    }

    #[test]
    fn repeated_course_reuses_id_and_color() {
        let text = format!(
            "{HEADER}\n\
             IT 110 BSIT 2F 3 THU 01:00 PM-03:00 PM Online\n\
             IT 110 BSIT 2F 3 MON 09:00 AM-11:00 AM CpLab2\n"
        );
        let data = parse(&text);
        assert_eq!(data.courses.len(), 1);
        assert_eq!(data.schedule.len(), 2);
        assert_eq!(data.schedule[0].course_id, data.schedule[1].course_id);
        assert_eq!(data.schedule[0].color, data.schedule[1].color);
        assert_eq!(data.schedule[1].day, "Monday");
        assert_eq!(data.schedule[1].room, "CpLab2");
    }

    #[test]
    fn stops_at_total_units() {
        let text = format!(
            "{HEADER}\n\
             IT 107 BSIT 2F 3 MON 06:00 PM-08:00 PM Online\n\
             Total Units: 20\n\
             IT 107 BSIT 2F 3 MON 06:00 PM-08:00 PM Online\n"
        );
        let data = parse(&text);
        assert_eq!(data.courses.len(), 1);
        assert_eq!(data.schedule.len(), 1);
    }

    #[test]
    fn stops_at_second_header() {
        let text = format!(
            "{HEADER}\n\
             IT 107 BSIT 2F 3 MON 06:00 PM-08:00 PM Online\n\
             {HEADER}\n\
             IT 108 BSIT 2F 3 TUE 01:00 PM-04:00 PM CpLab1\n"
        );
        let data = parse(&text);
        assert_eq!(data.courses.len(), 1);
        assert_eq!(data.courses[0].code, "IT 107");
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let text = format!(
            "{HEADER}\n\
             this line is noise from the page footer\n\
             IT 109 BSIT 2F 3 WED 10:00 AM-12:00 PM Online\n"
        );
        let data = parse(&text);
        assert_eq!(data.courses.len(), 1);
        assert_eq!(data.courses[0].code, "IT 109");
    }

    #[test]
    fn time_range_defaults_only_apply_inside_matched_rows() {
        assert_eq!(
            parse_time_range("garbled"),
            ("09:00".to_string(), "10:00".to_string())
        );
        assert_eq!(
            parse_time_range("10:00 AM-01:00 PM"),
            ("10:00".to_string(), "13:00".to_string())
        );
    }
}
