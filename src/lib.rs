pub mod compute;
pub mod entities;
pub mod fleet;
pub mod game;
pub mod settings;
