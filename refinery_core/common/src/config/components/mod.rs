pub mod acl;
pub mod connections;
pub mod global;
pub mod project;
pub mod server;
