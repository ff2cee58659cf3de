pub mod answer;
pub mod instrument;
pub mod question;
pub mod submission;
