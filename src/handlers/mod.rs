pub mod customer;
pub mod metrics;
pub mod product;
pub mod revenue;
pub mod store;
