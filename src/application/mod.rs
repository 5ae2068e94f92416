// Application layer - Use cases and the normalization pipeline
pub mod chart_service;
pub mod error;
pub mod normalization;
pub mod traffic_recorder;
pub mod traffic_repository;
