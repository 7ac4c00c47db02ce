pub mod answer;
pub mod resume;
pub mod user;
