/// One training or evaluation example.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub input: Vec<f64>,
    pub expected: Vec<f64>,
    /// Class index the sample came from, when it was built from a label.
    pub label: Option<u8>,
}

impl Sample {
    pub fn new(input: Vec<f64>, expected: Vec<f64>) -> Sample {
        Sample { input, expected, label: None }
    }

    /// Builds a sample whose expected vector is one-hot at `label`.
    /// `label` must be below `classes`.
    pub fn one_hot(input: Vec<f64>, label: u8, classes: usize) -> Sample {
        let mut expected = vec![0.0; classes];
        expected[label as usize] = 1.0;
        Sample { input, expected, label: Some(label) }
    }
}
