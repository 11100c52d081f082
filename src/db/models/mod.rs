pub mod client;
pub mod exclusion;
pub mod location;
pub mod order;
pub mod permission;
pub mod product;
pub mod role;
pub mod user;
pub mod warehouse;

pub use client::Client;
pub use exclusion::WarehouseExclusion;
pub use location::Location;
pub use order::Order;
pub use permission::Permission;
pub use product::Product;
pub use role::Role;
pub use user::User;
pub use warehouse::Warehouse;
