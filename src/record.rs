//! Fire-and-forget persistence of scenario snapshots and prompts.

use crate::road::RoadNetwork;
use crate::vehicle::VehicleSnapshot;
use log::error;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One entry of a scenario log.
#[derive(Clone, Debug, Serialize)]
pub enum Record {
    /// The environment a scenario was created for.
    SimInfo { env_type: String, seed: u64 },
    /// The road network, recorded once per scenario.
    Network(RoadNetwork),
    /// The vehicles perceived at a decision frame, ego first.
    Vehicles {
        frame: u64,
        vehicles: Vec<VehicleSnapshot>,
    },
    /// A prompt sent to the driving policy and its answer.
    Prompt(PromptRecord),
}

/// A prompt and the policy's reply, stored unchanged.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PromptRecord {
    pub frame: u64,
    pub vector_id: String,
    pub done: bool,
    pub description: String,
    pub fewshots: String,
    pub thoughts_and_action: String,
}

/// A sink for scenario records.
///
/// Recording never fails from the caller's point of view; implementations
/// report their own errors.
pub trait SceneRecorder {
    fn record(&mut self, record: Record);
}

impl SceneRecorder for Vec<Record> {
    fn record(&mut self, record: Record) {
        self.push(record);
    }
}

/// Writes each record as one line of JSON.
#[derive(Debug)]
pub struct JsonLinesRecorder<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Gets back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesRecorder<BufWriter<File>> {
    /// Creates or truncates a log file.
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> SceneRecorder for JsonLinesRecorder<W> {
    fn record(&mut self, record: Record) {
        // Whole lines only, so a failed write cannot leave half a record behind
        let result = serde_json::to_vec(&record)
            .map_err(std::io::Error::from)
            .and_then(|mut line| {
                line.push(b'\n');
                self.writer.write_all(&line)
            })
            .and_then(|_| self.writer.flush());
        if let Err(err) = result {
            error!("Failed to write scenario record: {}", err);
        }
    }
}
