pub mod app;
pub mod navigator;
pub mod playlist;
pub mod tasks;
pub mod theme;
