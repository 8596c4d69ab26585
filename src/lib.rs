//! Core library exports for the CCT admin console.
//!
//! This crate exposes the domain model, persistence layer and, behind the
//! `server` feature, the Actix-web application (forms, routes, services,
//! notifications and file storage) that powers the console.

pub mod db;
pub mod domain;
pub mod error_conversions;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod schema;

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod notify;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod storage;
