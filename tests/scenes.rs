//! End-to-end narration of small hand-built scenes.

mod common;

use common::{straight_road, vehicle};
use std::f64::consts::{FRAC_PI_2, PI};
use traffic_narrator::math::Point2d;
use traffic_narrator::{
    CircularLane, Interval, JunctionArea, Lane, LaneIndex, NarrationError, Record, RoadNetwork,
    Scenario, ScenarioConfig, ScenarioMode, SineLane, StraightLane, World,
};

/// A three-lane road with ego in the middle lane.
fn three_lane_world() -> World {
    let mut network = RoadNetwork::new();
    straight_road(&mut network, "a", "b", 0.0, 200.0, 3);
    World::new(network, &vehicle(50.0, 4.0, 0.0, 10.0, LaneIndex::new("a", "b", 1)))
}

#[test]
fn highway_neighbour_ahead() {
    let mut world = three_lane_world();
    world.add_vehicle(&vehicle(55.0, 0.0, 0.0, 12.0, LaneIndex::new("a", "b", 0)));

    let mut scenario = Scenario::new(world, "highway-v0", 0, Vec::<Record>::new());
    assert_eq!(scenario.mode(), ScenarioMode::Generic);
    let text = scenario.describe(0).unwrap();
    assert_eq!(
        text,
        "You are driving on a 3-lane highway, occupying the second lane from the left. \
         You are located at coordinates `(50.00, 4.00)`. Your vehicle is moving at 10.00 m/s \
         with an acceleration of 0.00 m/s^2. Your lateral position within the lane is 50.00 m.\n\
         Other vehicles are driving around you, and below is their basic information:\n\
         - Car `1` is driving on the lane to your left and is ahead of you. The position of it \
         is `(55.00, 0.00)`, speed is 12.00 m/s, acceleration is 0.00 m/s^2, and lane position \
         is 55.00 m.\n"
    );
}

#[test]
fn nearest_per_half_only() {
    let mut world = three_lane_world();
    let lane = LaneIndex::new("a", "b", 1);
    for x in [55.0, 52.0, 58.0, 40.0] {
        world.add_vehicle(&vehicle(x, 4.0, 0.0, 10.0, lane.clone()));
    }

    let mut scenario = Scenario::new(world, "highway-v0", 0, Vec::<Record>::new());
    let text = scenario.describe(0).unwrap();
    assert_eq!(text.matches("- Car").count(), 2);
    assert!(text.contains("is `(52.00, 4.00)`"));
    assert!(text.contains("is `(40.00, 4.00)`"));
    assert!(!text.contains("is `(55.00, 4.00)`"));
    assert!(!text.contains("is `(58.00, 4.00)`"));
    // Perception order puts the vehicle behind ego after the one at 52
    assert!(text.find("and is ahead of you").unwrap() < text.find("and is behind you").unwrap());
}

#[test]
fn distant_lanes_are_silent() {
    let mut network = RoadNetwork::new();
    straight_road(&mut network, "a", "b", 0.0, 200.0, 4);
    let ego = vehicle(50.0, 0.0, 0.0, 10.0, LaneIndex::new("a", "b", 0));
    let mut world = World::new(network, &ego);
    world.add_vehicle(&vehicle(60.0, 8.0, 0.0, 10.0, LaneIndex::new("a", "b", 2)));

    let mut scenario = Scenario::new(world, "highway-v0", 0, Vec::<Record>::new());
    let text = scenario.describe(0).unwrap();
    assert!(text
        .starts_with("You are driving on a road with 4 lanes, occupying the leftmost lane. "));
    assert!(text.ends_with(
        "No other vehicles driving near you, so you can drive completely according to your own ideas.\n"
    ));
}

#[test]
fn empty_road() {
    let mut scenario = Scenario::new(three_lane_world(), "highway-v0", 0, Vec::<Record>::new());
    let text = scenario.describe(0).unwrap();
    assert!(text.ends_with(
        "There are no other vehicles driving near you, so you can drive completely according to your own ideas.\n"
    ));
}

#[test]
fn describe_is_idempotent() {
    let mut world = three_lane_world();
    world.add_vehicle(&vehicle(70.0, 8.0, 0.0, 9.0, LaneIndex::new("a", "b", 2)));
    world.add_vehicle(&vehicle(30.0, 4.0, 0.0, 11.0, LaneIndex::new("a", "b", 1)));

    let mut scenario = Scenario::new(world, "highway-v0", 0, Vec::<Record>::new());
    let first = scenario.describe(0).unwrap();
    let second = scenario.describe(0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn route_gives_target_lane() {
    let mut network = RoadNetwork::new();
    straight_road(&mut network, "a", "b", 0.0, 100.0, 2);
    straight_road(&mut network, "b", "c", 100.0, 200.0, 2);
    let mut ego = vehicle(90.0, 0.0, 0.0, 10.0, LaneIndex::new("a", "b", 0));
    ego.route = vec![LaneIndex::new("a", "b", 0), LaneIndex::new("b", "c", 0)];
    let mut world = World::new(network, &ego);
    world.add_vehicle(&vehicle(110.0, 0.0, 0.0, 10.0, LaneIndex::new("b", "c", 0)));
    world.add_vehicle(&vehicle(120.0, 4.0, 0.0, 10.0, LaneIndex::new("b", "c", 1)));

    let mut scenario = Scenario::new(world, "highway-v0", 0, Vec::<Record>::new());
    let text = scenario.describe(0).unwrap();
    assert!(text.contains("- Car `1` is driving on your target lane and is ahead of you. "));
    assert_eq!(text.matches("- Car").count(), 1);
}

#[test]
fn merge_from_the_right() {
    let mut network = RoadNetwork::new();
    straight_road(&mut network, "b", "c", 0.0, 300.0, 3);
    let ego = vehicle(100.0, 4.0, 0.0, 20.0, LaneIndex::new("b", "c", 1));
    let mut world = World::new(network, &ego);
    world.add_vehicle(&vehicle(110.0, 8.0, 0.0, 15.0, LaneIndex::new("b", "c", 2)));

    let mut scenario = Scenario::new(world, "merge-v0", 0, Vec::<Record>::new());
    assert_eq!(scenario.mode(), ScenarioMode::Merge);
    let text = scenario.describe(0).unwrap();
    assert!(text.starts_with(
        "You are driving on the main road with 3 lanes. \
         There is a merge lane to your right. Be cautious of merging vehicles. "
    ));
    assert!(text.contains(
        "Your longitudinal position within the lane is 100.00 m and lateral position is 0.00 m.\n"
    ));
    // Tagged into both the right and the merge bucket, but mentioned once
    assert_eq!(text.matches("- Car").count(), 1);
    assert!(text.contains("- Car `1` is merging from the right and is ahead of you. "));
}

#[test]
fn racetrack_ring_lanes() {
    let mut network = RoadNetwork::new();
    let centre = Point2d::new(0.0, 0.0);
    for radius in [50.0, 54.0] {
        let lane = CircularLane::new(centre, radius, 0.0, PI, true);
        network.add_lane("a", "b", Lane::Circular(lane));
    }
    let ego = vehicle(50.0, 0.0, FRAC_PI_2, 15.0, LaneIndex::new("a", "b", 0));
    let mut world = World::new(network, &ego);
    let (x, y) = (54.0 * 0.2f64.cos(), 54.0 * 0.2f64.sin());
    world.add_vehicle(&vehicle(x, y, FRAC_PI_2, 15.0, LaneIndex::new("a", "b", 1)));

    let mut scenario = Scenario::new(world, "racetrack-v0", 0, Vec::<Record>::new());
    let text = scenario.describe(0).unwrap();
    assert!(text.starts_with(
        "You are driving on a racetrack. Maintain your speed and follow the track.\n\
         Your coordinates are (50.00, 0.00). Your speed is 15.00 m/s and acceleration is 0.00 m/s^2.\n"
    ));
    assert!(text.contains("- Car `1` is driving on the lane to your right and is ahead of you. "));
    assert!(text.ends_with("and lane position is 10.80 m.\n"));
}

#[test]
fn roundabout_entry() {
    let mut network = RoadNetwork::new();
    network.add_lane(
        "ser",
        "ses",
        Lane::Straight(StraightLane::new(Point2d::new(2.0, 80.0), Point2d::new(2.0, 30.0))),
    );
    network.add_lane(
        "se",
        "ex",
        Lane::Circular(CircularLane::new(
            Point2d::new(0.0, 0.0),
            20.0,
            -FRAC_PI_2,
            FRAC_PI_2,
            true,
        )),
    );
    let ego = vehicle(2.0, 50.0, -FRAC_PI_2, 6.0, LaneIndex::new("ser", "ses", 0));
    let mut world = World::new(network, &ego);
    world.add_vehicle(&vehicle(20.0, 0.0, FRAC_PI_2, 8.0, LaneIndex::new("se", "ex", 0)));
    world.add_vehicle(&vehicle(2.0, 70.0, -FRAC_PI_2, 5.0, LaneIndex::new("ser", "ses", 0)));

    let mut scenario = Scenario::new(world, "roundabout-v0", 0, Vec::<Record>::new());
    let text = scenario.describe(0).unwrap();
    assert!(text.starts_with(
        "You are driving on a roundabout. Your current position is at 87.71 degrees. \
         You are on the inner lane. "
    ));
    assert!(text.contains("Be prepared to yield to vehicles already in the roundabout."));
    assert!(!text.contains("prepare to leave the roundabout"));
    assert!(text.contains(
        "Surrounding vehicles:\n\
         - Vehicle `1` at 0.00 degrees, behind you. Its speed is 8.00 m/s. Its coordinates are (20.00, 0.00).\n\
         - Vehicle `2` on ser approaching the roundabout. Its speed is 5.00 m/s. Its coordinates are (2.00, 70.00).\n"
    ));

    let actions = scenario.available_actions_description();
    assert!(actions.contains("Remember:\n- Always yield to vehicles already in the roundabout.\n"));
}

#[test]
fn danger_cone_in_junction() {
    let mut network = RoadNetwork::new();
    network.add_lane(
        "s",
        "n",
        Lane::Straight(StraightLane::new(Point2d::new(0.0, -50.0), Point2d::new(0.0, 50.0))),
    );
    network.add_lane(
        "w",
        "e",
        Lane::Straight(StraightLane::new(Point2d::new(-50.0, 5.0), Point2d::new(50.0, 5.0))),
    );
    let ego = vehicle(0.0, -10.0, FRAC_PI_2, 5.0, LaneIndex::new("s", "n", 0));
    let mut world = World::new(network, &ego);
    world.add_vehicle(&vehicle(0.0, 5.0, 0.0, 8.0, LaneIndex::new("w", "e", 0)));
    world.add_vehicle(&vehicle(0.0, -40.0, FRAC_PI_2, 8.0, LaneIndex::new("s", "n", 0)));

    let config = ScenarioConfig {
        junction: Some(JunctionArea {
            x: Interval::new(-5.0, 5.0),
            y: Interval::new(-20.0, -5.0),
        }),
        ..Default::default()
    };
    let mut scenario =
        Scenario::with_config(world, "intersection-v1", 0, Vec::<Record>::new(), config);
    let text = scenario.describe(0).unwrap();
    assert!(text.starts_with("You are driving in an intersection, you can't change lane. "));
    assert!(text.contains(
        "- Car `1` is close to you and is ahead of you. The position of it is `(0.00, 5.00)`, \
         speed is 8.00 m/s, and acceleration is 0.00 m/s^2. This car is within your field of \
         vision, and you need to pay attention to its status when making decisions.\n"
    ));
    assert_eq!(text.matches("- Car").count(), 1);
}

#[test]
fn sine_lane_is_fatal() {
    let mut network = RoadNetwork::new();
    let lane = network.add_lane(
        "a",
        "b",
        Lane::Sine(SineLane {
            base: StraightLane::new(Point2d::new(0.0, 0.0), Point2d::new(200.0, 0.0)),
            amplitude: 1.0,
            pulsation: 0.05,
            phase: 0.0,
        }),
    );
    let world = World::new(network, &vehicle(20.0, 0.0, 0.0, 10.0, lane));

    let mut scenario = Scenario::new(world, "highway-v0", 0, Vec::<Record>::new());
    match scenario.describe(0) {
        Err(NarrationError::UnsupportedGeometry { kind, .. }) => assert_eq!(kind, "sine"),
        other => panic!("expected an unsupported geometry error, got {:?}", other),
    }
}

#[test]
fn scenario_records_everything() {
    let mut world = three_lane_world();
    world.add_vehicle(&vehicle(60.0, 4.0, 0.0, 10.0, LaneIndex::new("a", "b", 1)));

    let mut scenario = Scenario::new(world, "highway-v0", 7, Vec::<Record>::new());
    let description = scenario.describe(3).unwrap();
    scenario.prompts_commit(3, "vec-1", false, &description, "", "Action_id: 1");

    let records = scenario.into_recorder();
    assert_eq!(records.len(), 4);
    assert!(matches!(
        &records[0],
        Record::SimInfo { env_type, seed: 7 } if env_type == "highway-v0"
    ));
    assert!(matches!(&records[1], Record::Network(network) if network.lane_count("a", "b") == 3));
    match &records[2] {
        Record::Vehicles { frame, vehicles } => {
            assert_eq!(*frame, 3);
            assert_eq!(vehicles.len(), 2);
            assert_eq!(vehicles[0].position(), Point2d::new(50.0, 4.0));
        }
        other => panic!("unexpected record {:?}", other),
    }
    match &records[3] {
        Record::Prompt(prompt) => {
            assert_eq!(prompt.description, description);
            assert_eq!(prompt.thoughts_and_action, "Action_id: 1");
        }
        other => panic!("unexpected record {:?}", other),
    }
}
