//! Game recommendation service.
//!
//! Reads a user's profile, ratings and play history from PostgreSQL, builds a
//! feature vector for every age-appropriate game the user has not rated yet,
//! scores each with a pre-trained regression model and returns the best
//! candidates.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
