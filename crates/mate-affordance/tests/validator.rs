use mate_affordance::{AffordanceAction, AffordanceValidator, Rejection, Verdict};
use mate_core::{AffordanceDescriptor, AgentCapability, Vec3, WorldEntity};

fn crate_box(descriptor: AffordanceDescriptor) -> WorldEntity {
    WorldEntity::new(1, "Crate", Vec3::new(2.0, 0.0, 2.0)).with_descriptor(descriptor)
}

fn check(object: &WorldEntity, verb: &str) -> Verdict {
    AffordanceValidator::new().can_perform(
        object,
        &AffordanceAction::from_verb(verb),
        AgentCapability::default(),
    )
}

#[test]
fn undeclared_tall_object_rejects_jump_citing_cap() {
    let wall = WorldEntity::new(7, "Wall", Vec3::ZERO).with_height(3.5);
    let verdict = check(&wall, "jump");

    assert!(!verdict.allowed);
    assert_eq!(verdict.reason, Some(Rejection::TooHigh { max: 2.5 }));
    assert_eq!(verdict.reason_code().as_deref(), Some("too_high_max_2.5"));
}

#[test]
fn undeclared_geometry_inference() {
    let low = WorldEntity::new(1, "Bench", Vec3::ZERO).with_height(0.5);
    let tall = WorldEntity::new(2, "Pillar", Vec3::ZERO).with_height(3.0);

    assert!(check(&low, "climb").allowed);
    assert!(check(&low, "jump").allowed);
    assert_eq!(
        check(&low, "take_cover").reason_code().as_deref(),
        Some("no_cover_available")
    );
    assert_eq!(
        check(&tall, "climb").reason_code().as_deref(),
        Some("too_tall_max_2.5")
    );
    assert!(check(&tall, "cover").allowed);
    // Anything geometry can't judge is deferred to execution time.
    assert!(check(&tall, "open").allowed);
    assert!(check(&tall, "juggle").allowed);
}

#[test]
fn undeclared_height_equal_to_cap_is_allowed() {
    let ledge = WorldEntity::new(3, "Ledge", Vec3::ZERO).with_height(2.5);
    assert!(check(&ledge, "climb").allowed);
    assert!(check(&ledge, "jump").allowed);
}

#[test]
fn declared_flags_take_precedence_over_geometry() {
    // Tall enough for cover geometrically, but declared otherwise.
    let rock = WorldEntity::new(4, "Rock", Vec3::ZERO)
        .with_height(2.0)
        .with_descriptor(AffordanceDescriptor::named("Rock"));

    assert_eq!(check(&rock, "take_cover").reason_code().as_deref(), Some("no_cover_available"));
    assert_eq!(check(&rock, "climb").reason_code().as_deref(), Some("not_climbable"));
    assert_eq!(check(&rock, "jump").reason_code().as_deref(), Some("not_jumpable"));
    assert_eq!(check(&rock, "pickup").reason_code().as_deref(), Some("cannot_pickup"));
    assert_eq!(check(&rock, "open").reason_code().as_deref(), Some("cannot_open"));
    assert_eq!(
        check(&rock, "interact").reason_code().as_deref(),
        Some("action_interact_not_possible")
    );
    assert_eq!(
        check(&rock, "dance").reason_code().as_deref(),
        Some("action_dance_not_possible")
    );
}

#[test]
fn declared_heights_are_gated_by_capability() {
    let object = crate_box(AffordanceDescriptor::named("Crate").climbable(3.0).jumpable(1.0));
    assert_eq!(check(&object, "climb").reason_code().as_deref(), Some("too_tall_max_2.5"));
    assert!(check(&object, "jump_on").allowed);

    let strong = AgentCapability::with_max_step_height(4.0);
    let verdict =
        AffordanceValidator::new().can_perform(&object, &AffordanceAction::Climb, strong);
    assert!(verdict.allowed);
}

#[test]
fn locked_door_needs_key_unless_carried() {
    let door = crate_box(AffordanceDescriptor::named("Door").openable(true));
    assert_eq!(check(&door, "open").reason_code().as_deref(), Some("needs_key"));

    let with_key = AgentCapability {
        has_key: true,
        ..AgentCapability::default()
    };
    let verdict = AffordanceValidator::new().can_perform(&door, &AffordanceAction::Open, with_key);
    assert!(verdict.allowed);
    assert_eq!(verdict.reason, None);
}

#[test]
fn cap_renders_with_one_decimal() {
    assert_eq!(Rejection::TooTall { max: 3.0 }.code(), "too_tall_max_3.0");
    assert_eq!(Rejection::TooHigh { max: 3.21 }.code(), "too_high_max_3.2");
}

#[cfg(feature = "serde")]
#[test]
fn verdict_serializes_reason_code() {
    let verdict = Verdict::reject(Rejection::NeedsKey);
    let json = serde_json::to_value(&verdict).expect("serialize");
    assert_eq!(json, serde_json::json!({"allowed": false, "reason": "needs_key"}));
}
