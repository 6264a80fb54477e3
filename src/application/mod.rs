// Application layer - Use cases and ports
pub mod catalog_service;
pub mod dashboard_service;
pub mod error;
pub mod measurement_repository;
