pub mod network;
pub mod snapshot;

pub use network::{ForwardPass, Network};
pub use snapshot::{LayerSnapshot, NetworkSnapshot};
