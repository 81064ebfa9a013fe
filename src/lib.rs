pub mod capture;
pub mod cli;
pub mod engine;
pub mod error;
pub mod model;
pub mod output;
pub mod privilege;
pub mod process;
pub mod tui;
