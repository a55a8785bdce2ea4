#![doc = include_str!("../README.md")]

pub mod assembly;
pub mod bed;
pub mod cli;
pub mod config;
pub mod converter;
pub mod fasta;
pub mod features;
pub mod genbank;
pub mod gff;
pub mod gtf;
pub mod models;
pub mod qc;
pub mod tests;
pub mod translator;
pub mod utils;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
