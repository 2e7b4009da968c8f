#![allow(clippy::new_without_default)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub mod alert_server;
pub mod capabilities;
pub mod command_interpreter;
pub mod config;
pub mod destination_resolver;
pub mod emergency;
pub mod logs;
pub mod narration;
pub mod navigation_session;
pub mod navigator;
pub mod route_synthesizer;
pub mod utils;

pub use utils::Coordinate;
