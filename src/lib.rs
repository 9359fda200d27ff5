//! Sales Quota API Library
//!
//! This library provides the quota & attainment engine behind the commercial
//! team's performance dashboard: salesperson name standardization, quota
//! resolution per month, filtering and aggregation of completed sales, and
//! attainment classification, plus the feed loader and HTTP handlers that
//! serve the results.
//!
//! # Modules
//!
//! - `api`: Route definitions.
//! - `core`: Core business logic.
//! - `integrations`: External collaborators (sales feed).
//! - `attainment`: Attainment percentage and pass/fail classification.
//! - `config`: Configuration management.
//! - `engine`: Filter, aggregate and report pipeline.
//! - `errors`: Error handling types.
//! - `feed`: CSV feed parsing and snapshots.
//! - `handlers`: HTTP request handlers.
//! - `models`: Records, filter selections and report models.
//! - `months`: Calendar month enum (pt-BR names).
//! - `policy`: Alias table and quota policy tables.
//! - `quota`: Quota resolver.
//! - `standardizer`: Salesperson name standardization.

pub mod api;
pub mod core;
pub mod integrations;

pub mod attainment;
pub mod config;
pub mod engine;
pub mod errors;
pub mod feed;
pub mod handlers;
pub mod models;
pub mod months;
pub mod policy;
pub mod quota;
pub mod standardizer;
