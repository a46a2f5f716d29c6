// Domain records produced by the resource adapters

mod container;
mod host;
mod sensor;

pub use container::{Container, ContainerState, UnknownContainerState};
pub use host::HostInfo;
pub use sensor::Temperature;
