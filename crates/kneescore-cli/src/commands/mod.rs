pub mod config;
pub mod list;
pub mod score;
pub mod show;
