use tinytodo_core::{Todo, TodoAttributes, TodoValidationError, DEFAULT_CONTENT};
use uuid::Uuid;

#[test]
fn new_keeps_non_empty_content_verbatim() {
    let todo = Todo::new("buy milk", 1);

    assert_eq!(todo.id, None);
    assert_eq!(todo.content, "buy milk");
    assert!(!todo.done);
    assert_eq!(todo.order, 1);
    assert!(!todo.is_saved());
}

#[test]
fn new_coerces_empty_content_to_default() {
    let todo = Todo::new("", 1);
    assert_eq!(todo.content, DEFAULT_CONTENT);
}

#[test]
fn from_attributes_applies_defaults_for_missing_fields() {
    let todo = Todo::from_attributes(TodoAttributes::default());

    assert_eq!(todo.content, DEFAULT_CONTENT);
    assert!(!todo.done);
    assert_eq!(todo.order, 0);
    assert!(!todo.has_order());
}

#[test]
fn from_attributes_keeps_explicit_fields() {
    let todo = Todo::from_attributes(TodoAttributes {
        content: Some("clean".to_string()),
        done: Some(true),
        order: Some(7),
    });

    assert_eq!(todo.content, "clean");
    assert!(todo.done);
    assert_eq!(todo.order, 7);
    assert!(todo.has_order());
}

#[test]
fn toggle_twice_restores_original_state() {
    let mut todo = Todo::new("write report", 1);

    todo.toggle();
    assert!(todo.done);
    todo.toggle();
    assert!(!todo.done);
}

#[test]
fn set_content_applies_the_construction_coercion_policy() {
    let mut todo = Todo::new("draft", 1);

    todo.set_content("final");
    assert_eq!(todo.content, "final");

    todo.set_content("");
    assert_eq!(todo.content, DEFAULT_CONTENT);
}

#[test]
fn validate_rejects_blanked_content_and_negative_order() {
    let mut todo = Todo::new("ok", 1);
    assert_eq!(todo.validate(), Ok(()));

    todo.content = String::new();
    assert_eq!(todo.validate(), Err(TodoValidationError::EmptyContent));

    todo.content = "ok".to_string();
    todo.order = -3;
    assert_eq!(
        todo.validate(),
        Err(TodoValidationError::NegativeOrder { order: -3 })
    );
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut todo = Todo::new("ship release", 2);
    todo.id = Some(id);
    todo.done = true;

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["content"], "ship release");
    assert_eq!(json["done"], true);
    assert_eq!(json["order"], 2);

    let decoded: Todo = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, todo);
}

#[test]
fn unsaved_todo_serializes_null_id() {
    let todo = Todo::new("not saved yet", 1);

    let json = serde_json::to_value(&todo).unwrap();
    assert!(json["id"].is_null());

    let decoded: Todo = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.id, None);
}
