//! Bike-share station map server.
//!
//! A web application that answers: "where can I find a bike right now?"
//! It joins a GBFS system's station metadata with its live status,
//! classifies every station, and serves a color-coded Leaflet map.

pub mod cache;
pub mod config;
pub mod domain;
pub mod gbfs;
pub mod map;
pub mod web;
