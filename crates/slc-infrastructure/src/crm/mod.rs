//! CRM client wiring

pub mod factory;

pub use factory::CrmClientFactory;
