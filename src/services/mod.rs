pub mod export_service;
pub mod signature_service;
