pub mod idx;
pub mod sample;

use std::path::Path;

use log::info;

use crate::error::{NetError, Result};
pub use idx::{parse_images, parse_labels, Images};
pub use sample::Sample;

/// Images paired with their class labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub images: Images,
    pub labels: Vec<u8>,
}

impl Dataset {
    /// Pairs images with labels, failing if the counts differ.
    pub fn new(images: Images, labels: Vec<u8>) -> Result<Dataset> {
        if images.len() != labels.len() {
            return Err(NetError::CountMismatch {
                images: images.len(),
                labels: labels.len(),
            });
        }
        Ok(Dataset { images, labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Input width of every sample (`rows * cols`).
    pub fn input_width(&self) -> usize {
        self.images.rows * self.images.cols
    }

    /// Consumes the dataset into flattened inputs with one-hot expected
    /// vectors of length `classes`. Each image's pixels are released as its
    /// sample is built.
    pub fn into_samples(self, classes: usize) -> Result<Vec<Sample>> {
        if let Some(index) = self.labels.iter().position(|&label| label as usize >= classes) {
            return Err(NetError::InvalidLabel { index, label: self.labels[index], classes });
        }
        Ok(self
            .images
            .pixels
            .into_iter()
            .zip(self.labels)
            .map(|(columns, label)| Sample::one_hot(columns.into_iter().flatten().collect(), label, classes))
            .collect())
    }
}

/// Reads and validates an image file and its label file.
pub fn load_dataset(images_path: impl AsRef<Path>, labels_path: impl AsRef<Path>) -> Result<Dataset> {
    let images = parse_images(&std::fs::read(images_path.as_ref())?)?;
    let labels = parse_labels(&std::fs::read(labels_path.as_ref())?)?;
    let dataset = Dataset::new(images, labels)?;
    info!(
        "loaded {} samples of {}x{} from {}",
        dataset.len(),
        dataset.images.rows,
        dataset.images.cols,
        images_path.as_ref().display()
    );
    Ok(dataset)
}
