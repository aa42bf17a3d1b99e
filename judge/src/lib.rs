mod config;
mod game;
mod human;
mod player;
pub use config::*;
pub use game::*;
pub use human::*;
pub use player::*;
