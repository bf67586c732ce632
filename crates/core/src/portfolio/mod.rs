//! Portfolio data: works, the services that group them, and the product
//! category taxonomy.

pub mod category;
pub mod service;
pub mod work;

pub use category::{Category, CategoryTree};
pub use service::{
    LATEST_PER_SERVICE, Service, ServiceGroup, default_services, latest_per_service,
    order_services, services_or_default,
};
pub use work::{RawWork, Work, works_for_tag};
