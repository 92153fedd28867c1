//! Per-sample evaluation and the results file written at the end of a run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, info};
use serde::{Serialize, Deserialize};

use crate::dataset::sample::Sample;
use crate::error::Result;
use crate::network::network::Network;

/// Output confidence for one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassConfidence {
    pub class: usize,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleReport {
    /// 1-based position of the sample in the evaluated set.
    pub index: usize,
    pub label: Option<u8>,
    pub predicted: usize,
    /// Every output unit, most confident first.
    pub confidences: Vec<ClassConfidence>,
    pub elapsed_secs: f64,
}

/// Contents of the results file. Training runs leave `samples` empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsReport {
    pub layer_sizes: Vec<usize>,
    pub samples: Vec<SampleReport>,
}

impl ResultsReport {
    pub fn new(network: &Network) -> Self {
        ResultsReport {
            layer_sizes: network.layer_sizes().to_vec(),
            samples: Vec::new(),
        }
    }

    /// Fraction of labelled samples whose top class equals the label.
    pub fn accuracy(&self) -> Option<f64> {
        let labelled: Vec<_> = self.samples.iter().filter_map(|s| s.label.map(|l| (l, s.predicted))).collect();
        if labelled.is_empty() {
            return None;
        }
        let correct = labelled.iter().filter(|(label, predicted)| *label as usize == *predicted).count();
        Some(correct as f64 / labelled.len() as f64)
    }

    /// Serializes the report to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn load_json(path: impl AsRef<std::path::Path>) -> Result<ResultsReport> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Index of the maximum element in a slice.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Runs the network over `samples` without touching its weights.
///
/// `stop_flag` is checked between samples; when raised, the report holds the
/// samples processed so far.
pub fn evaluate_samples(network: &Network, samples: &[Sample], stop_flag: Option<&AtomicBool>) -> Result<ResultsReport> {
    let mut report = ResultsReport::new(network);

    for (i, sample) in samples.iter().enumerate() {
        if stop_flag.is_some_and(|f| f.load(Ordering::Relaxed)) {
            info!("stop requested after {} samples", i);
            break;
        }
        network.check_sample(sample)?;

        let t_start = Instant::now();
        let output = network.feed_forward(&sample.input);
        let elapsed_secs = t_start.elapsed().as_secs_f64();

        let mut confidences: Vec<ClassConfidence> = output
            .iter()
            .enumerate()
            .map(|(class, &confidence)| ClassConfidence { class, confidence })
            .collect();
        confidences.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap_or(std::cmp::Ordering::Equal));

        let predicted = argmax(&output);
        debug!("sample {}: label {:?}, predicted {}", i + 1, sample.label, predicted);
        report.samples.push(SampleReport {
            index: i + 1,
            label: sample.label,
            predicted,
            confidences,
            elapsed_secs,
        });
    }

    if let Some(accuracy) = report.accuracy() {
        info!("accuracy {:.2}% over {} samples", accuracy * 100.0, report.samples.len());
    }
    Ok(report)
}
