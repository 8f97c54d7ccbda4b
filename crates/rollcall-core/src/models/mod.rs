//! Data models for the teacher-facing collections.
//!
//! - `UserProfile`: the signed-in teacher
//! - `ClassGroup`, `Student`: classes and their enrolled students
//! - `Note`: free-form notes a teacher keeps about a student or class
//! - `Schedule`: timetable slots

pub mod class;
pub mod note;
pub mod schedule;
pub mod user;

pub use class::{ClassGroup, Student};
pub use note::Note;
pub use schedule::{Schedule, Weekday};
pub use user::UserProfile;
