//! Integration tests for the daily recommendation flow.
#![allow(clippy::panic, clippy::uninlined_format_args)]

use psychic::llm::{ImageryClient, PLACEHOLDER_IMAGE_URL, StylingProvider};
use psychic::models::{AppState, Category, ClosetItem, GarmentAnalysis, LookRequest};
use psychic::services::StylistService;
use psychic::storage::StateStore;
use psychic::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const PLAN_JSON: &str = r##"{
    "vibeTitle": "Quiet Armor",
    "moodBoost": "Shoulders back.",
    "psychAnalysis": "Structure counters anxiety.",
    "styleName": "Minimalist",
    "silhouette": "Straight and structured",
    "keyItem": "Charcoal Wool Blazer",
    "usedClosetItem": false,
    "hexColors": ["#2F2F2F", "#EAE6E1"],
    "colorPsychology": "Low-chroma neutrals read as steady.",
    "outfitDesc": "Blazer over a fine-gauge knit.",
    "shopTerms": ["charcoal blazer", "merino crew neck"],
    "suggestedCategory": "Tops",
    "suggestedColor": "Blue"
}"##;

/// Stylist that returns a fixed plan, optionally after a delay.
struct ScriptedStylist {
    plan_json: String,
    delay: Duration,
}

impl ScriptedStylist {
    fn new(plan_json: &str) -> Self {
        Self {
            plan_json: plan_json.to_string(),
            delay: Duration::ZERO,
        }
    }

    fn slow(plan_json: &str, delay: Duration) -> Self {
        Self {
            plan_json: plan_json.to_string(),
            delay,
        }
    }
}

impl StylingProvider for ScriptedStylist {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn complete(&self, _prompt: &str) -> Result<String> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        Ok(self.plan_json.clone())
    }

    fn classify_garment(&self, _image_b64: &str) -> Result<GarmentAnalysis> {
        Err(Error::OperationFailed {
            operation: "classify_garment".to_string(),
            cause: "not used by this test".to_string(),
        })
    }
}

/// Stylist that fails every call.
struct FailingStylist;

impl StylingProvider for FailingStylist {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn complete(&self, _prompt: &str) -> Result<String> {
        Err(Error::OperationFailed {
            operation: "complete".to_string(),
            cause: "service unavailable".to_string(),
        })
    }

    fn classify_garment(&self, _image_b64: &str) -> Result<GarmentAnalysis> {
        Err(Error::OperationFailed {
            operation: "classify_garment".to_string(),
            cause: "service unavailable".to_string(),
        })
    }
}

/// Imagery pointed at a closed local port so every probe fails fast.
fn offline_imagery() -> ImageryClient {
    ImageryClient::new().with_base_url("http://127.0.0.1:9/prompt")
}

fn service_with(
    dir: &TempDir,
    provider: Arc<dyn StylingProvider>,
) -> (Arc<StateStore>, StylistService) {
    let store = Arc::new(StateStore::new(dir.path()));
    let service = StylistService::new(Arc::clone(&store), provider, offline_imagery());
    (store, service)
}

fn mood_set(store: &StateStore, mood: &str) -> AppState {
    let mut state = store.load();
    state.current_mood = Some(mood.to_string());
    state
}

fn navy_top() -> ClosetItem {
    ClosetItem {
        id: 1,
        img: String::new(),
        category: Category::Tops,
        color: "Navy Blue".to_string(),
        desc: "Oxford Shirt".to_string(),
    }
}

#[test]
fn missing_mood_is_a_validation_error() {
    let dir = TempDir::new().unwrap();
    let (store, service) = service_with(&dir, Arc::new(ScriptedStylist::new(PLAN_JSON)));

    let mut state = store.load();
    let result = service.request(&mut state, &LookRequest::default());

    assert!(matches!(result, Err(Error::InvalidInput(_))));
    // The operation never started: no history entry.
    assert!(store.load().history.is_empty());
}

#[test]
fn success_appends_exactly_one_history_entry_newest_first() {
    let dir = TempDir::new().unwrap();
    let (store, service) = service_with(&dir, Arc::new(ScriptedStylist::new(PLAN_JSON)));

    let mut state = mood_set(&store, "Anxious");

    for _ in 0..3 {
        service.request(&mut state, &LookRequest::default()).unwrap();
    }

    assert_eq!(state.history.len(), 3);
    // All entries carry the plan title; order and count are the contract.
    assert!(state.history.iter().all(|h| h.title == "Quiet Armor"));

    let reloaded = store.load();
    assert_eq!(reloaded.history.len(), 3);
    assert_eq!(reloaded.history[0], state.history[0]);
}

#[test]
fn newest_entry_is_prepended() {
    let dir = TempDir::new().unwrap();
    let (store, service) = service_with(&dir, Arc::new(ScriptedStylist::new(PLAN_JSON)));

    let mut state = mood_set(&store, "Calm");
    let older = psychic::models::HistoryItem {
        date: "2001-01-01".to_string(),
        title: "Archive Look".to_string(),
        img: "about:blank".to_string(),
    };
    store.save_history(std::slice::from_ref(&older)).unwrap();
    state.history = vec![older.clone()];

    service.request(&mut state, &LookRequest::default()).unwrap();

    assert_eq!(state.history.len(), 2);
    assert_eq!(state.history[0].title, "Quiet Armor");
    assert_eq!(state.history[1], older);
}

#[test]
fn collaborator_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let (store, service) = service_with(&dir, Arc::new(FailingStylist));

    let mut state = mood_set(&store, "Tired");
    let result = service.request(&mut state, &LookRequest::default());

    assert!(matches!(result, Err(Error::OperationFailed { .. })));
    assert!(state.history.is_empty());
    assert!(!dir.path().join("history.json").exists());
}

#[test]
fn malformed_payload_fails_the_whole_operation() {
    let dir = TempDir::new().unwrap();
    let (store, service) = service_with(
        &dir,
        Arc::new(ScriptedStylist::new("Sorry, I cannot style today.")),
    );

    let mut state = mood_set(&store, "Gloomy");
    let result = service.request(&mut state, &LookRequest::default());

    assert!(result.is_err());
    assert!(store.load().history.is_empty());
}

#[test]
fn supplementary_closet_match_found_by_substring() {
    let dir = TempDir::new().unwrap();
    let (store, service) = service_with(&dir, Arc::new(ScriptedStylist::new(PLAN_JSON)));

    // Plan suggests Tops/Blue; the closet holds a Navy Blue top.
    let mut state = mood_set(&store, "Confident");
    state.closet = vec![navy_top()];

    let look = service.request(&mut state, &LookRequest::default()).unwrap();

    assert!(!look.plan.used_closet_item);
    let matched = look.closet_match.expect("expected a closet match");
    assert_eq!(matched.desc, "Oxford Shirt");
}

#[test]
fn closet_sourced_plan_skips_the_supplementary_rescan() {
    let dir = TempDir::new().unwrap();
    let sourced = PLAN_JSON.replace(r#""usedClosetItem": false"#, r#""usedClosetItem": true"#);
    let (store, service) = service_with(&dir, Arc::new(ScriptedStylist::new(&sourced)));

    let mut state = mood_set(&store, "Excited");
    state.closet = vec![navy_top()];

    let look = service.request(&mut state, &LookRequest::default()).unwrap();

    // The key item is cited as closet-sourced; the suggestion fields are
    // irrelevant and no supplementary match is produced.
    assert!(look.plan.used_closet_item);
    assert_eq!(look.plan.key_item, "Charcoal Wool Blazer");
    assert!(look.closet_match.is_none());
}

#[test]
fn unreachable_image_endpoint_falls_back_to_placeholder() {
    let dir = TempDir::new().unwrap();
    let (store, service) = service_with(&dir, Arc::new(ScriptedStylist::new(PLAN_JSON)));

    let mut state = mood_set(&store, "Calm");
    let look = service.request(&mut state, &LookRequest::default()).unwrap();

    assert_eq!(look.image_url, PLACEHOLDER_IMAGE_URL);
    assert_eq!(state.history[0].img, PLACEHOLDER_IMAGE_URL);
}

#[test]
fn second_request_while_one_is_outstanding_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(StateStore::new(dir.path()));
    let service = Arc::new(StylistService::new(
        Arc::clone(&store),
        Arc::new(ScriptedStylist::slow(PLAN_JSON, Duration::from_millis(400))),
        offline_imagery(),
    ));

    let background = {
        let service = Arc::clone(&service);
        let store = Arc::clone(&store);
        std::thread::spawn(move || {
            let mut state = mood_set(&store, "Calm");
            service.request(&mut state, &LookRequest::default())
        })
    };

    // Let the background request take the in-flight slot.
    std::thread::sleep(Duration::from_millis(100));

    let mut state = mood_set(&store, "Calm");
    let duplicate = service.request(&mut state, &LookRequest::default());
    assert!(matches!(duplicate, Err(Error::RequestInFlight { .. })));
    assert!(state.history.is_empty());

    // The first request completes and releases the slot.
    background.join().unwrap().unwrap();
    let retry = service.request(&mut state, &LookRequest::default());
    assert!(retry.is_ok());
}
