use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// One recurring timetable slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Schedule {
    pub id: String,
    #[serde(rename = "classId")]
    pub class_id: String,
    pub weekday: Weekday,
    /// "HH:MM", local school time
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    pub room: Option<String>,
}

impl Schedule {
    pub fn display_slot(&self) -> String {
        match &self.room {
            Some(room) => format!("{:?} {}-{} ({})", self.weekday, self.start_time, self.end_time, room),
            None => format!("{:?} {}-{}", self.weekday, self.start_time, self.end_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_slot() {
        let slot: Schedule = serde_json::from_str(
            r#"{"id":"s1","classId":"c1","weekday":"Tuesday","startTime":"09:00","endTime":"09:50","room":"B12"}"#,
        )
        .unwrap();
        assert_eq!(slot.display_slot(), "Tuesday 09:00-09:50 (B12)");
    }
}
