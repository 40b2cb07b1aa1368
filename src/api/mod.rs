//! API module for the HTTP endpoints
//!
//! This module provides the REST surface of the service: suggestions,
//! expansion, grouped expansion with vote signals, and a health probe.

pub mod auth;
pub mod http;
pub mod rest;
pub mod state;
