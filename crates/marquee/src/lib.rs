//! Domain core for the Marquee event platform.
//!
//! The crate is organized around the public site and its admin console:
//! [`forms`] holds the dynamic form engine, [`catalog`] the events, videos,
//! about sections, and contact messages, [`applications`] the intake and
//! review workflow, and [`auth`] plus [`admin`] the gated console surface.

pub mod admin;
pub mod applications;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod forms;
pub mod telemetry;
