//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate accessor calls into clinic-level APIs.
//! - Keep callers decoupled from store and decoding details.

pub mod clinic_service;
