pub mod cli;
pub mod config;
pub mod fetcher;
pub mod models;
pub mod publisher;
pub mod report;
pub mod sync;

#[cfg(test)]
mod test_utils;
