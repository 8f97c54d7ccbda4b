use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Student {
    pub id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    /// Current grade as a percentage, when one has been recorded.
    #[serde(default)]
    pub grade: Option<f64>,
}

impl Student {
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ClassGroup {
    pub id: String,
    pub name: String,
    pub subject: Option<String>,
    #[serde(rename = "teacherId")]
    pub teacher_id: String,
    #[serde(default)]
    pub students: Vec<Student>,
}

impl ClassGroup {
    pub fn display_student_count(&self) -> String {
        match self.students.len() {
            1 => "1 student".to_string(),
            n => format!("{} students", n),
        }
    }

    /// Mean of the recorded grades; `None` when no student has one.
    pub fn average_grade(&self) -> Option<f64> {
        let grades: Vec<f64> = self.students.iter().filter_map(|s| s.grade).collect();
        if grades.is_empty() {
            None
        } else {
            Some(grades.iter().sum::<f64>() / grades.len() as f64)
        }
    }
}
