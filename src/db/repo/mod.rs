// Explicit repository functions per entity. Every function takes the pool
// and returns plain records; tenant-scoped entities additionally take an
// `Option<i32>` client scope where `Some` filters to that tenant and
// `None` is the administrative all-tenants context.

pub mod clients;
pub mod exclusions;
pub mod locations;
pub mod orders;
pub mod permissions;
pub mod products;
pub mod roles;
pub mod users;
pub mod warehouses;
