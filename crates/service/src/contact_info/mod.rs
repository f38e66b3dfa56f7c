//! Singleton contact details shown on the public site and edited by the admin.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{ContactInfo, ContactInfoInput};
pub use repository::ContactInfoRepository;
pub use service::ContactInfoService;
