pub mod app;
pub mod controls;
pub mod events;
pub mod video_player;
