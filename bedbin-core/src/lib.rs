//! Core models and parsing for bedbin.
//!
//! - [models]: the interval record and its companions
//! - [parser]: BED and GFF line parsing with coordinate normalization
//! - [reader]: plain/gzipped file line source built on the parser
//! - [sort]: record comparators
//! - [report]: rendering records back to text
pub mod errors;
pub mod models;
pub mod parser;
pub mod reader;
pub mod report;
pub mod sort;
pub mod utils;
