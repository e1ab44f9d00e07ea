//! tubestat library
//!
//! Exposes the status-bar helper modules for the binary and for
//! integration tests.

pub mod bar;
pub mod cache;
pub mod cli;
pub mod lines;
pub mod mail;
pub mod output;
pub mod status;
pub mod tfl;
pub mod throttle;
