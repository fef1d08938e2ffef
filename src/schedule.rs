//! The structured schedule data model produced by the parser.
//!
//! A [`ScheduleData`] is created fresh on every successful extraction and is
//! never mutated by the library afterwards — downstream consumers (schedule
//! renderers, meeting lists, class managers) read it as an immutable
//! snapshot and key individual meetings by [`ScheduleEntry::meeting_key`].

use serde::{Deserialize, Serialize};

/// Display palette for courses. Courses are coloured by creation order,
/// cycling through this list, so a given input text always yields the same
/// colours.
pub const COLOR_PALETTE: [&str; 10] = [
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6",
    "#06B6D4", "#84CC16", "#F97316", "#EC4899", "#6366F1",
];

/// Known OCR confusions in course codes, applied at the start of a subject
/// field during normalisation. Each pair is `(misread, correction)`.
///
/// Extending this table is the supported way to handle a newly observed
/// confusion; no parser control flow needs to change.
pub const CODE_CORRECTIONS: [(&str, &str); 1] = [("1T ", "IT ")];

/// Pick the palette colour for the `index`-th created course (0-based).
pub fn palette_color(index: usize) -> &'static str {
    COLOR_PALETTE[index % COLOR_PALETTE.len()]
}

/// Apply the [`CODE_CORRECTIONS`] table to a subject/code string.
///
/// Only leading occurrences are corrected; this is a targeted fix for known
/// misreads, not general fuzzy matching.
pub fn correct_code(code: &str) -> String {
    for (wrong, right) in CODE_CORRECTIONS {
        if let Some(rest) = code.strip_prefix(wrong) {
            return format!("{right}{rest}");
        }
    }
    code.to_string()
}

/// One course recovered from the COR.
///
/// The table parser fills `section` and leaves `instructor` empty; the
/// heuristic fallback does the reverse. `units` defaults to 3 whenever the
/// source value is absent or unparseable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Sequential identifier, unique within one extraction result (1-based).
    pub id: u32,
    /// Course code as printed, after OCR-confusion correction (e.g. "IT 107").
    pub code: String,
    /// Human-readable subject name. Equals `code` when only a code was parsed.
    pub name: String,
    /// Class section label. Present only for table-format parses.
    pub section: Option<String>,
    /// Credit/unit count.
    pub units: u32,
    /// Course-level default room, overridable per meeting.
    pub room: Option<String>,
    /// Instructor name. Present only for heuristic-format parses ("TBA" when
    /// no mention was found).
    pub instructor: Option<String>,
    /// Display colour, assigned at creation from [`COLOR_PALETTE`].
    pub color: String,
}

/// One weekly recurring meeting for a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Owning [`Course::id`].
    pub course_id: u32,
    /// Full weekday name ("Monday" … "Sunday"). Unrecognised source day
    /// codes pass through unchanged.
    pub day: String,
    /// 24-hour `HH:MM` start time.
    pub start_time: String,
    /// 24-hour `HH:MM` end time. Lexicographically greater than `start_time`
    /// once normalised.
    pub end_time: String,
    /// Resolved room for this meeting (may differ from the course default,
    /// e.g. "Online").
    pub room: String,
    /// Copied from the owning course at entry creation.
    pub color: String,
}

impl ScheduleEntry {
    /// Deterministic composite key used by downstream consumers to address
    /// one meeting: `"{course_id}-{day}-{start_time}"`.
    pub fn meeting_key(&self) -> String {
        format!("{}-{}-{}", self.course_id, self.day, self.start_time)
    }
}

/// The structured output of one extraction: courses plus their weekly
/// meetings. Multiple entries may share a `course_id` (one per meeting).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleData {
    pub courses: Vec<Course>,
    pub schedule: Vec<ScheduleEntry>,
}

impl ScheduleData {
    /// True when no course was recovered. The pipeline never returns an
    /// empty `ScheduleData` to callers; this is used internally to decide
    /// whether to try the fallback strategy.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Look up a course by id.
    pub fn course(&self, id: u32) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Meetings belonging to the given course.
    pub fn meetings_for(&self, course_id: u32) -> impl Iterator<Item = &ScheduleEntry> {
        self.schedule.iter().filter(move |e| e.course_id == course_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_deterministically() {
        assert_eq!(palette_color(0), "#3B82F6");
        assert_eq!(palette_color(9), "#6366F1");
        assert_eq!(palette_color(10), palette_color(0));
        assert_eq!(palette_color(23), palette_color(3));
    }

    #[test]
    fn corrects_known_ocr_confusion() {
        assert_eq!(correct_code("1T 107"), "IT 107");
    }

    #[test]
    fn leaves_clean_codes_alone() {
        assert_eq!(correct_code("IT 107"), "IT 107");
        // Not at the start of the field: leave it.
        assert_eq!(correct_code("GEC 1T 3"), "GEC 1T 3");
        // "1T" without a trailing space is not the known pattern.
        assert_eq!(correct_code("1T107"), "1T107");
    }

    #[test]
    fn meeting_key_is_reconstructible() {
        let entry = ScheduleEntry {
            course_id: 3,
            day: "Monday".into(),
            start_time: "18:00".into(),
            end_time: "20:00".into(),
            room: "Online".into(),
            color: palette_color(2).into(),
        };
        assert_eq!(entry.meeting_key(), "3-Monday-18:00");
    }

    #[test]
    fn meetings_for_filters_by_course() {
        let mk = |course_id, day: &str| ScheduleEntry {
            course_id,
            day: day.into(),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            room: "21".into(),
            color: palette_color(0).into(),
        };
        let data = ScheduleData {
            courses: vec![],
            schedule: vec![mk(1, "Monday"), mk(2, "Tuesday"), mk(1, "Friday")],
        };
        let days: Vec<&str> = data.meetings_for(1).map(|e| e.day.as_str()).collect();
        assert_eq!(days, vec!["Monday", "Friday"]);
    }
}
