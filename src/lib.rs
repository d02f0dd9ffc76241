pub mod config;
pub mod driver;
pub mod extract;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod runner;
pub mod storage;
