pub mod game;
pub mod streak;
