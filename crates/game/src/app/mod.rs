mod bootstrap;
mod config;
mod host;
mod loop_runner;
mod placeholders;
mod player;
mod scenes;
mod ui;

pub(crate) use bootstrap::build_app;
pub(crate) use loop_runner::run;
