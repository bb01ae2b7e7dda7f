#![forbid(unsafe_code)]

//! Core of the release gallery: turns a hosting platform's releases feed into
//! a searchable, sortable video playlist and keeps the selection, the address
//! bar fragment and the episode panel in agreement.
//!
//! Everything in here is browser independent. The `gallery` binary owns the
//! single [`controller::Controller`] instance and forwards commands from the
//! page to it.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod detail;
pub mod error;
pub mod markdown;
pub mod playlist;
pub mod release;
