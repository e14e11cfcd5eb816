pub mod api;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod middleware;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod telemetry;
pub mod utils;
