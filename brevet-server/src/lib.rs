//! ACP brevet control time calculator.
//!
//! Computes when each control of a randonneuring brevet opens and closes,
//! and serves the calculator page plus a JSON API for stored brevets.

pub mod acp;
pub mod config;
pub mod domain;
pub mod remote;
pub mod store;
pub mod web;
