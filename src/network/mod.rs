pub mod connection;
pub mod network;
pub mod snapshot;
pub mod topology;

pub use connection::{Connection, ConnectionSet};
pub use network::Network;
pub use snapshot::NetworkSnapshot;
pub use topology::Topology;
