pub mod auth;
pub mod clients;
pub mod exclusions;
pub mod locations;
pub mod orders;
pub mod permissions;
pub mod products;
pub mod roles;
pub mod users;
pub mod warehouses;
