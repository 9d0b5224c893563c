// src/mc/mod.rs
pub mod config;
pub mod exotic_engine;
pub mod path_dependent;
pub mod payoffs;
pub mod statistics;
pub mod vanilla;
