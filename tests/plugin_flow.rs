//! End-to-end event flows through the public plugin API.

use pretty_assertions::assert_eq;
use recipe_box::fetch::REQUEST_ID_KEY;
use recipe_box::storage::JsonStorage;
use recipe_box::{handle_event, initialize, Action, App, Config, Event};
use std::collections::BTreeMap;
use tempfile::TempDir;

const BODY: &[u8] = br#"{"hits":[
    {"recipe":{"uri":"r1","label":"Tomato Soup","calories":800,"yield":4,"url":"https://recipes.test/r1"}},
    {"recipe":{"uri":"r2","label":"Pea Soup","calories":300,"yield":2}}
]}"#;

fn send(app: &mut App, event: Event) -> (bool, Vec<Action>) {
    handle_event(app, &event).unwrap()
}

fn granted_app(dir: &TempDir) -> App {
    let mut app = initialize(&Config::default());
    let store = JsonStorage::new(dir.path().to_path_buf()).unwrap();
    app.state.attach_store(Box::new(store));
    app
}

fn search_for(app: &mut App, text: &str) -> Vec<Action> {
    send(app, Event::SearchMode);
    for _ in 0..app.view.input.chars().count() {
        send(app, Event::Backspace);
    }
    for c in text.chars() {
        send(app, Event::Char(c));
    }
    send(app, Event::SubmitSearch).1
}

fn fire_timers(app: &mut App, count: usize) -> Vec<Action> {
    (0..count).flat_map(|_| send(app, Event::Timer).1).collect()
}

fn request_context(actions: &[Action]) -> BTreeMap<String, String> {
    match actions {
        [Action::WebRequest { context, .. }] => context.clone(),
        other => panic!("expected a single web request, got {other:?}"),
    }
}

#[test]
fn first_open_searches_default_query_and_shows_results() {
    let dir = TempDir::new().unwrap();
    let mut app = granted_app(&dir);

    let (_, armed) = send(&mut app, Event::PermissionsResult { granted: true });
    assert_eq!(armed, vec![Action::ArmTimer { millis: 500 }]);

    let requests = fire_timers(&mut app, armed.len());
    let Action::WebRequest { url, context } = &requests[0] else {
        panic!("expected web request, got {requests:?}");
    };
    assert!(url.contains("q=popular"), "{url}");
    assert!(context.contains_key(REQUEST_ID_KEY));
    assert!(app.state.is_loading);

    let (render, _) = send(
        &mut app,
        Event::WebRequestResult {
            status: 200,
            body: BODY.to_vec(),
            context: context.clone(),
        },
    );
    assert!(render);
    assert!(!app.state.is_loading);
    assert_eq!(app.visible_recipes().len(), 2);
}

#[test]
fn favorites_ratings_and_onboarding_survive_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut app = granted_app(&dir);
        let (_, armed) = send(&mut app, Event::PermissionsResult { granted: true });
        let context = request_context(&fire_timers(&mut app, armed.len()));
        send(
            &mut app,
            Event::WebRequestResult {
                status: 200,
                body: BODY.to_vec(),
                context,
            },
        );

        send(&mut app, Event::OnboardingSkip);
        send(&mut app, Event::ToggleFavorite);
        send(&mut app, Event::Rate(4));
        send(&mut app, Event::Rate(9));
    }

    let app = granted_app(&dir);
    assert!(!app.state.show_onboarding);
    assert!(app.state.is_favorite("r1"));
    assert_eq!(app.state.rating("r1"), Some(4));
    assert_eq!(app.state.favorites().len(), 1);
}

#[test]
fn superseded_search_response_is_discarded() {
    let dir = TempDir::new().unwrap();
    let mut app = granted_app(&dir);
    send(&mut app, Event::OnboardingSkip);

    let (_, armed) = send(&mut app, Event::PermissionsResult { granted: true });
    let first = request_context(&fire_timers(&mut app, armed.len()));

    let armed = search_for(&mut app, "pea soup");
    let second = request_context(&fire_timers(&mut app, armed.len()));

    let (render, _) = send(
        &mut app,
        Event::WebRequestResult {
            status: 200,
            body: BODY.to_vec(),
            context: first,
        },
    );
    assert!(!render);
    assert!(app.state.recipes.is_empty());
    assert!(app.state.is_loading);

    let later = br#"{"hits":[{"recipe":{"uri":"r2","label":"Pea Soup"}}]}"#;
    send(
        &mut app,
        Event::WebRequestResult {
            status: 200,
            body: later.to_vec(),
            context: second,
        },
    );
    assert_eq!(app.state.recipes.len(), 1);
    assert_eq!(app.state.recipes[0].label, "Pea Soup");
}

#[test]
fn failed_search_shows_error_and_open_original_needs_a_url() {
    let dir = TempDir::new().unwrap();
    let mut app = granted_app(&dir);
    send(&mut app, Event::OnboardingSkip);

    let (_, armed) = send(&mut app, Event::PermissionsResult { granted: true });
    let context = request_context(&fire_timers(&mut app, armed.len()));
    send(
        &mut app,
        Event::WebRequestResult {
            status: 401,
            body: Vec::new(),
            context,
        },
    );

    assert!(app.state.recipes.is_empty());
    assert_eq!(
        app.state.error.as_deref(),
        Some("Request failed with status code 401")
    );
    assert_eq!(send(&mut app, Event::OpenOriginal).1, vec![]);
}
