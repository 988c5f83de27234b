//! BDD step definitions for the status translation feature

use cucumber::{given, then, when};
use serde_json::json;

use homework_bot::homework::parse_status;
use homework_bot::HomeworkBotError;

use crate::world::HomeworkBotWorld;

#[given(expr = "a homework named {string} with status {string}")]
fn homework_with_status(world: &mut HomeworkBotWorld, name: String, status: String) {
    world.homework = Some(json!({"homework_name": name, "status": status}));
}

#[given(expr = "a homework without a name with status {string}")]
fn homework_without_name(world: &mut HomeworkBotWorld, status: String) {
    world.homework = Some(json!({"status": status}));
}

#[given(expr = "a homework named {string} without a status")]
fn homework_without_status(world: &mut HomeworkBotWorld, name: String) {
    world.homework = Some(json!({"homework_name": name}));
}

#[when("the homework is translated")]
fn translate(world: &mut HomeworkBotWorld) {
    let homework = world.homework.as_ref().expect("homework not set");
    world.translation = Some(parse_status(homework));
}

fn message(world: &HomeworkBotWorld) -> &str {
    let result = world.translation.as_ref().expect("no result");
    result.as_ref().unwrap()
}

#[then(expr = "the message should name {string}")]
fn message_names(world: &mut HomeworkBotWorld, name: String) {
    let expected = format!("Изменился статус проверки работы \"{}\".", name);
    assert!(message(world).starts_with(&expected), "{}", message(world));
}

#[then(expr = "the message should end with {string}")]
fn message_ends_with(world: &mut HomeworkBotWorld, verdict: String) {
    assert!(message(world).ends_with(&verdict), "{}", message(world));
}

#[then(expr = "the message should contain {string}")]
fn message_contains(world: &mut HomeworkBotWorld, text: String) {
    assert!(message(world).contains(&text), "{}", message(world));
}

#[then("translation should fail with a missing key error")]
fn missing_key(world: &mut HomeworkBotWorld) {
    let result = world.translation.as_ref().expect("no result");
    assert!(
        matches!(result, Err(HomeworkBotError::MissingKey(_))),
        "{result:?}"
    );
}

#[then("translation should fail with an undocumented status error")]
fn undocumented(world: &mut HomeworkBotWorld) {
    let result = world.translation.as_ref().expect("no result");
    assert!(
        matches!(result, Err(HomeworkBotError::UndocumentedStatus(_))),
        "{result:?}"
    );
}
