use crate::classification::core::{
    init, is_stale, transition, ClassificationState, Effect, Model, Msg, RequestId,
};
use crate::config::Config;
use crate::image_classifier::interface::Observation;
use image::DynamicImage;
use std::time::Duration;

fn processing(request_id: RequestId) -> Model {
    Model {
        request_id,
        state: ClassificationState::Processing,
    }
}

fn error(message: &str) -> Box<dyn std::error::Error + Send + Sync> {
    message.into()
}

#[test]
fn test_init() {
    let (model, effects) = init();

    assert_eq!(model.state, ClassificationState::Idle);
    assert!(effects.is_empty());
}

#[test]
fn test_submit_from_idle() {
    let config = Config::default();
    let (model, _) = init();

    let (model, effects) = transition(&config, model, Msg::Submitted { image: vec![1, 2] });

    assert_eq!(model.state, ClassificationState::Processing);
    assert_eq!(model.request_id, RequestId::default().next());
    assert_eq!(
        effects,
        vec![Effect::DecodeImage {
            request_id: model.request_id,
            image: vec![1, 2],
        }]
    );
}

#[test]
fn test_submit_with_timeout() {
    let mut config = Config::default();
    config.classify_timeout = Some(Duration::from_secs(2));
    let (model, _) = init();

    let (model, effects) = transition(&config, model, Msg::Submitted { image: vec![] });

    assert_eq!(effects.len(), 2);
    assert_eq!(
        effects[1],
        Effect::StartTimeout {
            request_id: model.request_id,
            duration: Duration::from_secs(2),
        }
    );
}

#[test]
fn test_submit_from_settled_states() {
    let config = Config::default();
    let request_id = RequestId::default().next();

    for state in [
        ClassificationState::Failed("Processing failed. Please try again.".to_string()),
        ClassificationState::Processing,
    ] {
        let model = Model { request_id, state };

        let (model, effects) = transition(&config, model, Msg::Submitted { image: vec![] });

        assert_eq!(model, processing(request_id.next()));
        assert_eq!(effects.len(), 1);
    }
}

#[test]
fn test_decode_flow() {
    let config = Config::default();
    let request_id = RequestId::default().next();
    let image = DynamicImage::new_rgb8(2, 2);

    let (model, effects) = transition(
        &config,
        processing(request_id),
        Msg::DecodeDone {
            request_id,
            result: Ok(image.clone()),
        },
    );
    assert_eq!(model, processing(request_id));
    assert_eq!(effects, vec![Effect::ClassifyImage { request_id, image }]);

    let (model, effects) = transition(
        &config,
        processing(request_id),
        Msg::DecodeDone {
            request_id,
            result: Err(error("bad header")),
        },
    );
    assert_eq!(
        model.state,
        ClassificationState::Failed("Couldn't read the image data.".to_string())
    );
    assert!(effects.is_empty());
}

#[test]
fn test_classify_flow() {
    let config = Config::default();
    let request_id = RequestId::default().next();

    let (model, effects) = transition(
        &config,
        processing(request_id),
        Msg::ClassifyDone {
            request_id,
            result: Ok(vec![
                Observation::new("plate", 0.6),
                Observation::new("hotdog", 0.25),
                Observation::new("bun", 0.5),
            ]),
        },
    );
    match model.state {
        ClassificationState::Result(verdict) => {
            assert!(verdict.is_hotdog);
            assert_eq!(verdict.primary_label, "Hotdog");
            assert_eq!(verdict.confidence, 0.25);
        }
        state => panic!("Unexpected state {:?}", state),
    }
    assert!(effects.is_empty());

    let (model, _) = transition(
        &config,
        processing(request_id),
        Msg::ClassifyDone {
            request_id,
            result: Ok(vec![]),
        },
    );
    assert_eq!(
        model.state,
        ClassificationState::Failed("Didn't catch anything. Try a clearer photo.".to_string())
    );

    let (model, _) = transition(
        &config,
        processing(request_id),
        Msg::ClassifyDone {
            request_id,
            result: Err(error("inference exploded")),
        },
    );
    assert_eq!(
        model.state,
        ClassificationState::Failed("Processing failed. Please try again.".to_string())
    );
}

#[test]
fn test_superseded_results_are_inert() {
    let config = Config::default();
    let old = RequestId::default().next();
    let current = old.next();

    let messages = vec![
        Msg::DecodeDone {
            request_id: old,
            result: Err(error("bad header")),
        },
        Msg::ClassifyDone {
            request_id: old,
            result: Ok(vec![Observation::new("hotdog", 0.99)]),
        },
        Msg::ClassifyDone {
            request_id: old,
            result: Err(error("inference exploded")),
        },
        Msg::TimedOut { request_id: old },
    ];

    for msg in messages {
        assert!(is_stale(&processing(current), &msg));

        let (model, effects) = transition(&config, processing(current), msg);

        assert_eq!(model, processing(current));
        assert!(effects.is_empty());
    }
}

#[test]
fn test_timeout() {
    let config = Config::default();
    let request_id = RequestId::default().next();

    let (model, _) = transition(&config, processing(request_id), Msg::TimedOut { request_id });
    assert_eq!(
        model.state,
        ClassificationState::Failed("Processing failed. Please try again.".to_string())
    );

    // Late completion after the timeout settled the request.
    let (late, effects) = transition(
        &config,
        model.clone(),
        Msg::ClassifyDone {
            request_id,
            result: Ok(vec![Observation::new("hotdog", 0.9)]),
        },
    );
    assert_eq!(late, model);
    assert!(effects.is_empty());
}

#[test]
fn test_submitted_is_never_stale() {
    let model = processing(RequestId::default().next());

    assert!(!is_stale(&model, &Msg::Submitted { image: vec![] }));
}
