//! ŠAUKTINIAI conscript registry lookup.
//!
//! A web application for browsing the published conscript lists by
//! region and birth year, or searching them by name, backed by the
//! registry data API.

pub mod api;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod view;
pub mod web;
