pub mod banner;
pub mod commands;
pub mod config;
pub mod consts;
pub mod events;
pub mod form;
pub mod render;
pub mod solver;
