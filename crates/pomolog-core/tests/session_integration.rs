//! End-to-end session runs against a mock task log service.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use mockito::Matcher;
use pomolog_core::{
    Alarm, DisplayState, Event, Input, RecordingSurface, Session, SessionOptions, SharedSurface,
    TaskLogClient,
};
use tokio::sync::mpsc;

#[derive(Default)]
struct AlarmCounts {
    played: u32,
    silenced: u32,
}

struct CountingAlarm(Arc<Mutex<AlarmCounts>>);

impl Alarm for CountingAlarm {
    fn play(&mut self) {
        self.0.lock().unwrap().played += 1;
    }

    fn silence(&mut self) {
        self.0.lock().unwrap().silenced += 1;
    }
}

struct Harness {
    surface: Arc<Mutex<RecordingSurface>>,
    alarm: Arc<Mutex<AlarmCounts>>,
    inputs: mpsc::UnboundedSender<Input>,
    events: mpsc::UnboundedReceiver<Event>,
    handle: tokio::task::JoinHandle<Session>,
}

fn spawn_session(base_url: &str, duration_secs: u64, description: &str) -> Harness {
    let surface = Arc::new(Mutex::new(RecordingSurface::default()));
    let shared: SharedSurface = surface.clone();
    let alarm = Arc::new(Mutex::new(AlarmCounts::default()));
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let client = TaskLogClient::new(base_url, Duration::from_secs(5)).unwrap();
    let mut session = Session::new(
        SessionOptions {
            duration_secs,
            description: description.to_string(),
        },
        client,
        shared,
        Box::new(CountingAlarm(Arc::clone(&alarm))),
    )
    .with_events(event_tx);

    let handle = tokio::spawn(async move {
        session.run(input_rx).await.unwrap();
        session
    });

    Harness {
        surface,
        alarm,
        inputs: input_tx,
        events: event_rx,
        handle,
    }
}

async fn wait_for<F>(events: &mut mpsc::UnboundedReceiver<Event>, mut pred: F) -> Vec<Event>
where
    F: FnMut(&Event) -> bool,
{
    let mut seen = Vec::new();
    let result = tokio::time::timeout(Duration::from_secs(10), async {
        while let Some(event) = events.recv().await {
            let done = pred(&event);
            seen.push(event);
            if done {
                return;
            }
        }
    })
    .await;
    assert!(result.is_ok(), "timed out, saw {seen:?}");
    seen
}

#[tokio::test]
async fn completed_countdown_is_recorded_and_log_refreshed() {
    let mut server = mockito::Server::new_async().await;
    let post = server
        .mock("POST", "/events")
        .match_query(Matcher::UrlEncoded("desc".into(), "write".into()))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;
    let get = server
        .mock("GET", "/events")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"ts":"11:00","desc":"plan"},{"ts":"12:00","desc":"write"}]"#)
        .expect(2)
        .create_async()
        .await;

    let mut h = spawn_session(&server.url(), 1, "");
    h.inputs.send(Input::SetTask("write".into())).unwrap();
    h.inputs.send(Input::Start).unwrap();
    h.inputs.send(Input::Start).unwrap();

    let seen = wait_for(&mut h.events, |e| matches!(e, Event::CompletionRecorded { .. })).await;
    let starts = seen
        .iter()
        .filter(|e| matches!(e, Event::TimerStarted { .. }))
        .count();
    assert_eq!(starts, 1);
    assert!(seen.iter().any(|e| matches!(e, Event::TimerExpired { .. })));

    // Initial load plus the refresh after recording.
    let mut refreshes = seen
        .iter()
        .filter(|e| matches!(e, Event::LogRefreshed { .. }))
        .count();
    while refreshes < 2 {
        wait_for(&mut h.events, |e| matches!(e, Event::LogRefreshed { .. })).await;
        refreshes += 1;
    }

    h.inputs.send(Input::Quit).unwrap();
    let session = h.handle.await.unwrap();
    assert!(session.timer().expired());
    assert_eq!(session.description(), "write");

    post.assert_async().await;
    get.assert_async().await;

    let surface = h.surface.lock().unwrap();
    assert_eq!(
        surface.clocks,
        vec![
            ("00m 01s".to_string(), DisplayState::Normal),
            ("00m 00s".to_string(), DisplayState::Expired),
        ]
    );
    assert_eq!(
        surface.logs.last().unwrap(),
        &vec!["12:00 | write".to_string(), "11:00 | plan".to_string()]
    );
    assert_eq!(h.alarm.lock().unwrap().played, 1);
}

#[tokio::test]
async fn unreachable_log_leaves_list_untouched() {
    let mut h = spawn_session("http://127.0.0.1:9", 1, "");
    h.inputs.send(Input::Start).unwrap();

    wait_for(&mut h.events, |e| matches!(e, Event::TimerExpired { .. })).await;
    tokio::time::sleep(Duration::from_millis(500)).await;

    h.inputs.send(Input::Silence).unwrap();
    h.inputs.send(Input::Quit).unwrap();
    h.handle.await.unwrap();

    let mut remaining = Vec::new();
    while let Ok(event) = h.events.try_recv() {
        remaining.push(event);
    }
    assert!(!remaining
        .iter()
        .any(|e| matches!(e, Event::CompletionRecorded { .. } | Event::LogRefreshed { .. })));

    let surface = h.surface.lock().unwrap();
    assert!(surface.logs.is_empty());
    assert_eq!(surface.notices, vec!["alarm silenced".to_string()]);

    let alarm = h.alarm.lock().unwrap();
    assert_eq!(alarm.played, 1);
    assert!(alarm.silenced >= 1);
}

#[tokio::test]
async fn failed_refresh_keeps_previous_list() {
    let mut server = mockito::Server::new_async().await;
    let _post = server
        .mock("POST", "/events")
        .match_query(Matcher::Any)
        .with_status(200)
        .create_async()
        .await;
    // Served once for the initial load; later fetches fall through to the
    // malformed body.
    let first = server
        .mock("GET", "/events")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"ts":"11:00","desc":"plan"}]"#)
        .expect(1)
        .create_async()
        .await;
    let broken = server
        .mock("GET", "/events")
        .with_status(200)
        .with_body("not json")
        .expect(1)
        .create_async()
        .await;

    let mut h = spawn_session(&server.url(), 1, "write");
    wait_for(&mut h.events, |e| matches!(e, Event::LogRefreshed { .. })).await;

    h.inputs.send(Input::Start).unwrap();
    wait_for(&mut h.events, |e| matches!(e, Event::CompletionRecorded { .. })).await;

    let fetched = tokio::time::timeout(Duration::from_secs(10), async {
        while !broken.matched_async().await {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await;
    assert!(fetched.is_ok(), "second fetch never arrived");
    tokio::time::sleep(Duration::from_millis(200)).await;

    h.inputs.send(Input::Quit).unwrap();
    h.handle.await.unwrap();

    let mut remaining = Vec::new();
    while let Ok(event) = h.events.try_recv() {
        remaining.push(event);
    }
    assert!(!remaining
        .iter()
        .any(|e| matches!(e, Event::LogRefreshed { .. })));

    first.assert_async().await;
    broken.assert_async().await;

    let surface = h.surface.lock().unwrap();
    assert_eq!(surface.logs, vec![vec!["11:00 | plan".to_string()]]);
}

#[tokio::test]
async fn start_after_expiry_builds_a_fresh_countdown() {
    let mut server = mockito::Server::new_async().await;
    let _post = server
        .mock("POST", "/events")
        .match_query(Matcher::Any)
        .with_status(200)
        .create_async()
        .await;
    let _get = server
        .mock("GET", "/events")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let mut h = spawn_session(&server.url(), 1, "first");
    h.inputs.send(Input::Start).unwrap();
    wait_for(&mut h.events, |e| matches!(e, Event::TimerExpired { .. })).await;

    h.inputs.send(Input::Start).unwrap();
    wait_for(&mut h.events, |e| matches!(e, Event::TimerStarted { .. })).await;
    wait_for(&mut h.events, |e| matches!(e, Event::TimerExpired { .. })).await;

    h.inputs.send(Input::Quit).unwrap();
    h.handle.await.unwrap();

    assert_eq!(h.alarm.lock().unwrap().played, 2);
    let surface = h.surface.lock().unwrap();
    let expired = surface
        .clocks
        .iter()
        .filter(|(_, state)| *state == DisplayState::Expired)
        .count();
    assert_eq!(expired, 2);
}
