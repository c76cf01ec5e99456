use mate_behavior::{parse_message, BehaviorVerb, CommandError, ContextValue, InboundMessage};
use mate_exec::{ExecutorConfig, Goal, Step};

fn parse(raw: &str) -> Result<InboundMessage, CommandError> {
    parse_message(raw, &ExecutorConfig::default())
}

#[test]
fn behavior_envelope_fills_defaults() {
    let message = parse(r#"{"type":"behavior","behavior":"follow_player","context":{"followDistance":5}}"#)
        .expect("valid behavior");
    let InboundMessage::Behavior(command) = message else {
        panic!("expected behavior");
    };
    assert_eq!(command.verb, BehaviorVerb::Follow);
    assert_eq!(command.duration, 10.0);
    assert_eq!(command.target, None);
    assert_eq!(command.context.get("followDistance"), Some(&ContextValue::Number(5.0)));
    assert!(!command.id.is_empty());
}

#[test]
fn missing_type_means_behavior() {
    let message = parse(r#"{"id":"c9","behavior":"go_to","target":"Crate","duration":4}"#)
        .expect("valid behavior");
    let InboundMessage::Behavior(command) = message else {
        panic!("expected behavior");
    };
    assert_eq!(command.id, "c9");
    assert_eq!(command.verb, BehaviorVerb::MoveTo);
    assert_eq!(command.target.as_deref(), Some("Crate"));
    assert_eq!(command.duration, 4.0);
}

#[test]
fn blank_target_is_dropped() {
    let InboundMessage::Behavior(command) =
        parse(r#"{"behavior":"follow","target":"  "}"#).expect("valid behavior")
    else {
        panic!("expected behavior");
    };
    assert_eq!(command.target, None);
}

#[test]
fn fenced_reply_is_unwrapped() {
    let raw = "Sure, here you go:\n```json\n{\"type\":\"behavior\",\"behavior\":\"take_cover\",\"target\":\"Wall\"}\n```\n";
    let InboundMessage::Behavior(command) = parse(raw).expect("fenced behavior") else {
        panic!("expected behavior");
    };
    assert_eq!(command.verb, BehaviorVerb::TakeCover);
    assert_eq!(command.target.as_deref(), Some("Wall"));
}

#[test]
fn plan_envelope_becomes_typed_plan() {
    let raw = r#"{"type":"command","id":"p1","plan":{"sequence":[
        {"action":"move_to","params":{"target":"Crate"}},
        {"action":"wait","params":{"duration":2}}
    ]}}"#;
    let InboundMessage::Plan(plan) = parse(raw).expect("valid plan") else {
        panic!("expected plan");
    };
    assert_eq!(plan.id, "p1");
    assert_eq!(plan.len(), 2);
    assert!(matches!(
        &plan.steps[0],
        Step::MoveTo { goal: Goal::Object(name), .. } if name == "Crate"
    ));
    assert_eq!(plan.steps[1], Step::Wait { duration: 2.0 });
}

#[test]
fn plan_without_type_is_detected() {
    let raw = r#"{"plan":{"sequence":[{"action":"hold_position","params":{"duration":1}}]}}"#;
    assert!(matches!(parse(raw), Ok(InboundMessage::Plan(_))));
}

#[test]
fn rejects_unusable_messages() {
    assert!(matches!(parse("not json at all"), Err(CommandError::Json(_))));
    assert!(matches!(
        parse(r#"{"type":"behavior"}"#),
        Err(CommandError::MissingField("behavior"))
    ));
    assert!(matches!(
        parse(r#"{"type":"command"}"#),
        Err(CommandError::MissingField("plan"))
    ));
    assert!(matches!(
        parse(r#"{"type":"dance","behavior":"follow"}"#),
        Err(CommandError::UnknownType(kind)) if kind == "dance"
    ));
    assert!(matches!(
        parse(r#"{"type":"command","plan":{"sequence":[{"action":"wait","params":{"duration":"long"}}]}}"#),
        Err(CommandError::Plan(_))
    ));
}

#[test]
fn unread_context_shapes_do_not_spoil_the_command() {
    let raw = r#"{"behavior":"follow_player","duration":10,"context":{"followDistance":5,"note":null,"nested":[1,2],"meta":{"mood":"calm"}}}"#;
    let InboundMessage::Behavior(command) = parse(raw).expect("valid behavior") else {
        panic!("expected behavior");
    };
    assert_eq!(command.verb, BehaviorVerb::Follow);
    assert_eq!(command.context.number(&["followDistance"]), Ok(Some(5.0)));
    assert!(command.context.get("note").is_some_and(ContextValue::is_null));
    assert!(matches!(command.context.get("nested"), Some(ContextValue::Other(_))));
}
