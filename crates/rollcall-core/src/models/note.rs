use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Note {
    pub id: String,
    #[serde(rename = "studentId", default)]
    pub student_id: Option<String>,
    #[serde(rename = "classId", default)]
    pub class_id: Option<String>,
    pub body: String,
    #[serde(rename = "createdAt")]
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
}
