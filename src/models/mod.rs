pub mod health;
pub mod submission;
pub mod telegram;
