// Travel agency content API and admin CMS backend
//
// Serves page data for the public site (destinations, packages, offers,
// events, departments, blog) and the CRUD endpoints behind the staff
// dashboard. Each domain owns its models, request/response data and
// HTTP routes under domains/*.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod seed;
pub mod server;

pub use config::*;
