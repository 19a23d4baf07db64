//! End-to-end decoding scenarios over the public facade.

use empath::UnionError;
use empath::batch::{BatchJob, Source, StateEmbeddingGeneration, StateInference, Task};
use empath::evi::{ClientEvent, ServerEvent};
use serde_json::{Value, json};

#[test]
fn test_url_source_scenario() {
    let input = json!({"type": "url", "url": "https://example.com/a.wav"});
    let source = Source::from_json(input.clone()).unwrap();

    assert_eq!(source.discriminant(), "url");
    assert_eq!(source.as_url().unwrap().url, "https://example.com/a.wav");

    let encoded = source.to_json().unwrap();
    assert_eq!(encoded.as_object().unwrap().len(), 2);
    assert_eq!(encoded, input);
}

#[test]
fn test_failed_job_state_scenario() {
    let state = StateInference::from_json(json!({
        "status": "FAILED",
        "created_timestamp_ms": 1,
        "started_timestamp_ms": 2,
        "ended_timestamp_ms": 3,
        "message": "oom"
    }))
    .unwrap();

    assert_eq!(state.failed().unwrap().message, "oom");
    assert!(matches!(
        state.queued(),
        Err(UnionError::WrongVariant {
            expected: "QUEUED",
            ..
        })
    ));
}

#[test]
fn test_future_source_scenario() {
    let input = json!({"type": "future_type", "foo": "bar"});
    let source = Source::from_json(input.clone()).unwrap();

    assert!(!source.is_url());
    assert!(!source.is_file());
    assert!(!source.is_text());
    let unknown = source.unknown().unwrap();
    assert_eq!(unknown.get("foo"), Some(&json!("bar")));
    assert_eq!(source.to_json().unwrap(), input);
}

#[test]
fn test_unknown_variants_roundtrip_for_every_union() {
    let input = json!({"type": "added_later", "nested": {"a": [1, 2]}, "flag": null});
    assert_eq!(Source::from_json(input.clone()).unwrap().to_json().unwrap(), input);
    assert_eq!(Task::from_json(input.clone()).unwrap().to_json().unwrap(), input);
    assert_eq!(BatchJob::from_json(input.clone()).unwrap().to_json().unwrap(), input);
    assert_eq!(ServerEvent::from_json(input.clone()).unwrap().to_json().unwrap(), input);
    assert_eq!(ClientEvent::from_json(input.clone()).unwrap().to_json().unwrap(), input);

    let state = json!({"status": "PAUSED", "created_timestamp_ms": 4});
    let decoded = StateEmbeddingGeneration::from_json(state.clone()).unwrap();
    assert!(decoded.is_unknown());
    assert_eq!(decoded.to_json().unwrap(), state);
}

#[test]
fn test_known_variants_roundtrip() {
    let sources = [
        Source::url("https://example.com/b.mp4"),
        Source::text("I'm thrilled"),
        Source::File(Default::default()),
    ];
    for source in sources {
        let decoded = Source::from_json(source.to_json().unwrap()).unwrap();
        assert_eq!(decoded, source);
    }

    let pause = ClientEvent::pause();
    assert_eq!(ClientEvent::from_json(pause.to_json().unwrap()).unwrap(), pause);
}

#[test]
fn test_missing_discriminator_fails_closed() {
    fn assert_missing<T: std::fmt::Debug>(result: Result<T, UnionError>, field: &str) {
        match result {
            Err(UnionError::MissingDiscriminator { field: actual, .. }) => assert_eq!(actual, field),
            other => panic!("Expected MissingDiscriminator, got {other:?}"),
        }
    }

    assert_missing(Source::from_json(json!({})), "type");
    assert_missing(Task::from_json(json!({})), "type");
    assert_missing(BatchJob::from_json(json!({})), "type");
    assert_missing(ServerEvent::from_json(json!({})), "type");
    assert_missing(ClientEvent::from_json(json!({})), "type");
    assert_missing(StateInference::from_json(json!({})), "status");
}

#[test]
fn test_wrong_typed_discriminator_fails_closed() {
    let inputs: [Value; 3] = [json!({"type": 42}), json!({"type": true}), json!({"type": ["url"]})];
    for input in inputs {
        assert!(matches!(
            Source::from_json(input),
            Err(UnionError::InvalidDiscriminatorType { .. })
        ));
    }
    assert!(matches!(
        StateInference::from_json(json!({"status": 42})),
        Err(UnionError::InvalidDiscriminatorType { .. })
    ));
}

#[test]
fn test_constructed_values_carry_their_registered_name() {
    let task = Task::from(empath::batch::TaskRegression::default());
    assert_eq!(task.discriminant(), "regression");
    assert_eq!(task.to_json().unwrap(), json!({"type": "regression"}));
}

#[test]
fn test_bogus_status_is_opaque_not_error() {
    let state = StateInference::from_json(json!({"status": "BOGUS"})).unwrap();
    assert!(state.is_unknown());
    assert_eq!(state.discriminant(), "BOGUS");
}

#[test]
fn test_unions_nest_inside_plain_records() {
    #[derive(serde::Deserialize)]
    struct Envelope {
        events: Vec<ServerEvent>,
    }

    let envelope: Envelope = serde_json::from_value(json!({
        "events": [
            {"type": "assistant_end"},
            {"type": "chat_metadata", "chat_group_id": "g", "chat_id": "c"},
            {"type": "brand_new"}
        ]
    }))
    .unwrap();

    let kinds: Vec<&str> = envelope.events.iter().map(|event| event.discriminant()).collect();
    assert_eq!(kinds, ["assistant_end", "chat_metadata", "brand_new"]);
}
