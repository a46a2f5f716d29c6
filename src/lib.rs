// Library for tests to access modules

pub mod command;
pub mod config;
pub mod docker_repo;
pub mod error;
pub mod hwmon_repo;
pub mod metrics;
pub mod models;
pub mod normalize;
pub mod routes;
pub mod sysinfo_repo;
