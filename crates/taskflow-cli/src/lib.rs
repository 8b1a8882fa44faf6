//! TaskFlow CLI library.
//!
//! This crate provides the command-line front end over a `TaskBoard`.

pub mod cli;
pub mod commands;
pub mod config;
