pub mod clients;
pub mod domain;
pub mod models;
pub mod processing;
pub mod routes;
