//! Scene plotting as a list of JSON drawing primitives.

use crate::error::Result;
use crate::math::Point2d;
use crate::road::{Lane, RoadNetwork};
use crate::vehicle::VehicleSnapshot;
use serde_json::{json, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The spacing of points sampled along curved lanes, in m.
const SAMPLE_STEP: f64 = 5.0;

/// The radius of the circle drawn for a vehicle, in m.
const VEHICLE_RADIUS: f64 = 2.5;

/// Draws a perception snapshot to a file.
pub trait ScenePlotter {
    fn plot_scene(
        &self,
        network: &RoadNetwork,
        vehicles: &[&VehicleSnapshot],
        ego: &VehicleSnapshot,
        path: &Path,
    ) -> Result<()>;
}

/// Writes a scene as a JSON array of lines and circles. Lines carry the
/// width of their lane.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonScenePlotter;

impl JsonScenePlotter {
    /// Builds the drawing primitives of a scene.
    pub fn primitives(
        network: &RoadNetwork,
        vehicles: &[&VehicleSnapshot],
        ego: &VehicleSnapshot,
    ) -> Vec<Value> {
        let mut frame = Vec::new();
        for (index, lane) in network.lanes() {
            let name = index.to_string();
            let points = centre_line(lane);
            for pair in points.windows(2) {
                frame.push(line(&name, pair[0], pair[1], lane.width()));
            }
        }
        frame.push(circle("ego", ego.position(), VEHICLE_RADIUS));
        for vehicle in vehicles {
            let name = format!("{:?}", vehicle.id());
            frame.push(circle(&name, vehicle.position(), VEHICLE_RADIUS));
        }
        frame
    }
}

impl ScenePlotter for JsonScenePlotter {
    fn plot_scene(
        &self,
        network: &RoadNetwork,
        vehicles: &[&VehicleSnapshot],
        ego: &VehicleSnapshot,
        path: &Path,
    ) -> Result<()> {
        let frame = Self::primitives(network, vehicles, ego);
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, &frame)?;
        writer.flush()?;
        Ok(())
    }
}

/// Points along a lane's centre line, ends included.
fn centre_line(lane: &Lane) -> Vec<Point2d> {
    let length = lane.length();
    let steps = match lane {
        Lane::Straight(_) => 1,
        _ => ((length / SAMPLE_STEP).ceil() as usize).max(1),
    };
    (0..=steps)
        .map(|i| lane.position(length * i as f64 / steps as f64, 0.0))
        .collect()
}

fn line(name: &str, p1: Point2d, p2: Point2d, width: f64) -> Value {
    json!({
        "type": "line",
        "name": name,
        "p1": [p1.x, p1.y],
        "p2": [p2.x, p2.y],
        "width": width,
    })
}

fn circle(name: &str, centre: Point2d, radius: f64) -> Value {
    json!({
        "type": "circle",
        "name": name,
        "centre": [centre.x, centre.y],
        "radius": radius
    })
}
