//! BDD step definitions for the poll cycle feature

use std::sync::Arc;
use std::time::Duration;

use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use tokio_util::sync::CancellationToken;

use homework_bot::engine::Engine;
use homework_bot::io::HttpResponse;
use homework_bot::notifier::{Notifier, NotifierFactory};
use homework_bot::practicum::PracticumClient;
use homework_bot::telegram::TelegramNotifier;
use homework_bot::{Config, HomeworkBotError};

use super::notification_steps::{test_credentials, StubHttpClient};
use crate::world::HomeworkBotWorld;

#[given(expr = "the status API answers {int} with:")]
fn api_answers(world: &mut HomeworkBotWorld, status: u16, step: &Step) {
    world.api_status = status;
    world.api_body = step
        .docstring
        .as_ref()
        .expect("response docstring missing")
        .clone();
}

#[when("one poll cycle runs")]
async fn run_cycle(world: &mut HomeworkBotWorld) {
    let config = Config::default();
    let credentials = test_credentials();

    // Main notification path
    let telegram = Arc::new(StubHttpClient {
        post_response: Some(StubHttpClient::telegram_ok()),
        posted: Arc::clone(&world.sent),
        ..StubHttpClient::unreachable()
    });
    let notifier: Arc<dyn Notifier> =
        Arc::new(TelegramNotifier::new(&config, &credentials, telegram));

    // Fetch error reports go through their own notifiers
    let reports = Arc::clone(&world.reports);
    let factory_config = config.clone();
    let factory_credentials = credentials.clone();
    let report_to: NotifierFactory = Arc::new(move || {
        let http = Arc::new(StubHttpClient {
            post_response: Some(StubHttpClient::telegram_ok()),
            posted: Arc::clone(&reports),
            ..StubHttpClient::unreachable()
        });
        Arc::new(TelegramNotifier::new(
            &factory_config,
            &factory_credentials,
            http,
        )) as Arc<dyn Notifier>
    });

    let api = Arc::new(StubHttpClient {
        get_response: Some(HttpResponse {
            status: world.api_status,
            body: world.api_body.clone(),
        }),
        ..StubHttpClient::unreachable()
    });
    let client = PracticumClient::new(&config, &credentials, api, report_to);
    let engine = Engine::new(
        client,
        notifier,
        0,
        Duration::from_secs(600),
        CancellationToken::new(),
    );

    world.cycle_result = Some(engine.run_cycle().await);
}

#[then("the cycle should succeed")]
fn cycle_succeeds(world: &mut HomeworkBotWorld) {
    let result = world.cycle_result.as_ref().expect("no result");
    result.as_ref().unwrap();
}

#[then("the cycle should fail with a structure error")]
fn cycle_fails(world: &mut HomeworkBotWorld) {
    let result = world.cycle_result.as_ref().expect("no result");
    assert!(
        matches!(result, Err(HomeworkBotError::Structure(_))),
        "{result:?}"
    );
}

#[then(expr = "exactly {int} notification(s) should be sent")]
fn notifications_sent(world: &mut HomeworkBotWorld, count: usize) {
    assert_eq!(world.sent.lock().unwrap().len(), count);
}

#[then(expr = "notification {int} should contain {string}")]
fn notification_contains(world: &mut HomeworkBotWorld, index: usize, text: String) {
    let sent = world.sent.lock().unwrap();
    let message = &sent[index - 1];
    assert!(message.contains(&text), "{message}");
}

#[then(expr = "exactly {int} error report(s) should mention {string}")]
fn reports_mention(world: &mut HomeworkBotWorld, count: usize, text: String) {
    let reports = world.reports.lock().unwrap();
    assert_eq!(reports.len(), count);
    assert!(reports.iter().all(|r| r.contains(&text)), "{reports:?}");
}
