pub mod customer_service;
pub use customer_service::CustomerService;
pub mod dates;
pub mod filter;
pub mod normalizer;
pub mod segments;
pub mod whatsapp;
