use mate_core::{EntityQuery, Vec3};
use mate_sim::{NavConfig, Scenario, ScenarioError, TimelineAction};

const COURTYARD: &str = r#"
name: courtyard
agent:
  position: [0, 0, 0]
  yaw_degrees: 90
  capability: { max_step_height: 1.5 }
reference:
  position: [0, 0, 12]
  waypoints: [[6, 0, 12]]
entities:
  - name: Wall
    position: [4, 0, 6]
    height: 1.5
    affordances: { provides_cover: true }
  - name: Turret
    position: [-5, 0, 9]
    affordances: { is_threat: true, kind: turret }
timeline:
  - at: 0
    kind: message
    message: { type: behavior, behavior: follow_player, context: { followDistance: 4 } }
  - at: 2.5
    kind: message
    message: '{"behavior": "take_cover", "target": "Wall"}'
  - at: 4
    kind: cancel
"#;

#[test]
fn parses_world_and_timeline() {
    let scenario = Scenario::from_yaml(COURTYARD).expect("valid scenario");
    assert_eq!(scenario.name, "courtyard");
    assert_eq!(scenario.entities.len(), 2);
    assert_eq!(scenario.timeline.len(), 3);
    assert_eq!(scenario.timeline[2].action, TimelineAction::Cancel);

    let structured = scenario.timeline[0].action.message_text().expect("message");
    let value: serde_json::Value = serde_json::from_str(&structured).expect("json text");
    assert_eq!(value["behavior"], "follow_player");
    assert_eq!(value["context"]["followDistance"], 4);

    let raw = scenario.timeline[1].action.message_text().expect("message");
    assert_eq!(raw, r#"{"behavior": "take_cover", "target": "Wall"}"#);
}

#[test]
fn builds_registry_with_reference_first() {
    let scenario = Scenario::from_yaml(COURTYARD).expect("valid scenario");
    let world = scenario.build_world(&NavConfig::default()).expect("world");

    let player = world.find_by_name("player").expect("reference");
    assert_eq!(player.id.0, 1);
    assert_eq!(player.position, Vec3::new(0.0, 0.0, 12.0));

    let wall = world.find_by_name("Wall").expect("wall");
    assert_eq!(wall.id.0, 2);
    assert!(wall.is_cover());
    assert_eq!(wall.bounds_height, 1.5);
    assert_eq!(wall.descriptor.as_ref().map(|d| d.name.as_str()), Some("Wall"));

    let turret = world.find_by_name("Turret").expect("turret");
    assert!(turret.is_threat());
    assert_eq!(turret.bounds_height, 1.0);

    let agent = world.agent(0).expect("agent");
    assert!((agent.yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    assert_eq!(agent.capability.max_step_height, 1.5);
    assert_eq!(agent.nav.speed(), NavConfig::default().agent_speed);
}

#[test]
fn reference_walks_its_route() {
    let scenario = Scenario::from_yaml(COURTYARD).expect("valid scenario");
    let mut world = scenario.build_world(&NavConfig::default()).expect("world");
    for _ in 0..10 {
        world.step(0.1);
    }
    let player = world.find_by_name("Player").expect("reference");
    assert!(player.position.distance(Vec3::new(3.0, 0.0, 12.0)) < 1e-4);
}

#[test]
fn rejects_inconsistent_scenarios() {
    let duplicate = "entities:\n  - { name: Crate, position: [0, 0, 1] }\n  - { name: crate, position: [0, 0, 2] }\n";
    let err = Scenario::from_yaml(duplicate).expect_err("duplicate");
    assert_eq!(
        err.downcast_ref::<ScenarioError>(),
        Some(&ScenarioError::DuplicateEntity("crate".to_string()))
    );

    let unordered = "timeline:\n  - { at: 2, kind: cancel }\n  - { at: 1, kind: cancel }\n";
    let err = Scenario::from_yaml(unordered).expect_err("out of order");
    assert_eq!(
        err.downcast_ref::<ScenarioError>(),
        Some(&ScenarioError::TimelineOrder {
            at: 1.0,
            previous: 2.0
        })
    );

    let blocked = Scenario::from_yaml("blocked: [[1, 1]]\n").expect("parses");
    assert_eq!(
        blocked.build_world(&NavConfig::default()).err(),
        Some(ScenarioError::BlockedWithoutGrid)
    );
}
