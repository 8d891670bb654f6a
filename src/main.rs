use clap::Parser;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use traffic_narrator::{Action, NarrationError, Record, RoadNetwork, Scenario, VehicleState, World};

/// Describes a driving scene the way the driving policy sees it.
#[derive(Parser, Debug)]
#[command(name = "traffic-narrator", version)]
struct Args {
    /// JSON scene holding the network, ego and the other vehicles
    scene: PathBuf,
    /// Environment type such as `highway-v0` or `roundabout-v0`
    env_type: String,
}

/// A scene to narrate, as stored on disk.
#[derive(Deserialize)]
struct SceneFile {
    network: RoadNetwork,
    ego: VehicleState,
    #[serde(default)]
    vehicles: Vec<VehicleState>,
    actions: Option<Vec<Action>>,
}

fn load_world(path: &Path) -> Result<World, NarrationError> {
    let scene: SceneFile = serde_json::from_reader(BufReader::new(File::open(path)?))?;

    let mut world = World::new(scene.network, &scene.ego);
    for vehicle in &scene.vehicles {
        world.add_vehicle(vehicle);
    }
    if let Some(actions) = scene.actions {
        world.set_available_actions(actions);
    }
    Ok(world)
}

fn run(args: &Args) -> Result<(), NarrationError> {
    let world = load_world(&args.scene)?;
    let mut scenario = Scenario::new(world, &args.env_type, 0, Vec::<Record>::new());
    println!("{}", scenario.describe(0)?);
    println!("{}", scenario.available_actions_description());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod test {
    use super::Args;
    use clap::Parser;

    #[test]
    fn parses_scene_and_env_type() {
        let args = Args::try_parse_from(["traffic-narrator", "scene.json", "merge-v0"]).unwrap();
        assert_eq!(args.scene.to_str(), Some("scene.json"));
        assert_eq!(args.env_type, "merge-v0");
        assert!(Args::try_parse_from(["traffic-narrator", "scene.json"]).is_err());
    }
}
