//! Trip overlay engine for a supercharger network explorer.
//!
//! Holds the station catalog, amenity filters and availability tiers,
//! and turns planned trips into map overlays. Plans come from any
//! [`planning::PlanningService`]; a reference HTTP service is included.

pub mod availability;
pub mod catalog;
pub mod client_config;
pub mod config;
pub mod domain;
pub mod filter;
pub mod overlay;
pub mod planner;
pub mod planning;
pub mod session;
pub mod web;
pub mod wire;
