pub mod game;
pub mod matchmaking;
pub mod social;
pub mod user;
