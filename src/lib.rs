pub mod config;
pub mod game_id;
pub mod news;
pub mod tools;
