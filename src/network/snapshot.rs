use serde::{Serialize, Deserialize};

use crate::error::Result;

/// Persisted parameters of one layer, in the same nested shape as the live
/// layer: `weights[out][in]` and `biases[out]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSnapshot {
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
}

/// A serializable copy of a network's topology and parameters.
///
/// Written on normal completion and on interrupt; read back with
/// [`Network::from_snapshot`](crate::network::Network::from_snapshot), which
/// validates the shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub layer_sizes: Vec<usize>,
    pub layers: Vec<LayerSnapshot>,
}

impl NetworkSnapshot {
    /// Serializes the snapshot to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a snapshot from a JSON file written by `save_json`.
    pub fn load_json(path: impl AsRef<std::path::Path>) -> Result<NetworkSnapshot> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_are_snake_case() {
        let snapshot = NetworkSnapshot {
            layer_sizes: vec![1, 1],
            layers: vec![LayerSnapshot { weights: vec![vec![0.5]], biases: vec![0.25] }],
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["layer_sizes"], serde_json::json!([1, 1]));
        assert_eq!(json["layers"][0]["weights"], serde_json::json!([[0.5]]));
        assert_eq!(json["layers"][0]["biases"], serde_json::json!([0.25]));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");
        let snapshot = NetworkSnapshot {
            layer_sizes: vec![2, 1],
            layers: vec![LayerSnapshot {
                weights: vec![vec![0.1 + 0.2, -1.0 / 3.0]],
                biases: vec![std::f64::consts::PI],
            }],
        };
        snapshot.save_json(&path).unwrap();
        assert_eq!(NetworkSnapshot::load_json(&path).unwrap(), snapshot);
    }
}
