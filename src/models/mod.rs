pub mod game;
pub mod matchmaking;
pub mod placement;
pub mod user;
pub mod view;
