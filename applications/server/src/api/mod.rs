/// API route modules
pub mod admin;
pub mod auth;
pub mod health;
pub mod history;
pub mod player;
pub mod playlists;
pub mod tracks;
