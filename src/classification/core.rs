use crate::config::Config;
use crate::error::ClassificationError;
use crate::image_classifier::interface::Observation;
use crate::verdict::derive::{derive, Verdict};
use image::DynamicImage;
use std::fmt;
use std::time::Duration;

/// Identifies one `submit` call. Only completions carrying the current id can
/// change the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RequestId(u64);

impl RequestId {
    pub fn next(self) -> Self {
        RequestId(self.0 + 1)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ClassificationState {
    #[default]
    Idle,
    Processing,
    Result(Verdict),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    pub request_id: RequestId,
    pub state: ClassificationState,
}

#[derive(Debug)]
pub enum Msg {
    Submitted {
        image: Vec<u8>,
    },
    DecodeDone {
        request_id: RequestId,
        result: Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>>,
    },
    ClassifyDone {
        request_id: RequestId,
        result: Result<Vec<Observation>, Box<dyn std::error::Error + Send + Sync>>,
    },
    TimedOut {
        request_id: RequestId,
    },
}

impl Msg {
    /// `None` for messages that do not complete a request.
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            Msg::Submitted { .. } => None,
            Msg::DecodeDone { request_id, .. }
            | Msg::ClassifyDone { request_id, .. }
            | Msg::TimedOut { request_id } => Some(*request_id),
        }
    }

    pub fn to_display_string(&self) -> String {
        match self {
            Msg::Submitted { image } => format!("Submitted({} bytes)", image.len()),
            Msg::DecodeDone {
                request_id,
                result: Ok(image),
            } => format!(
                "DecodeDone({}, Ok({}x{}))",
                request_id,
                image.width(),
                image.height()
            ),
            Msg::DecodeDone {
                request_id,
                result: Err(e),
            } => format!("DecodeDone({}, Err({}))", request_id, e),
            Msg::ClassifyDone { request_id, result } => {
                format!("ClassifyDone({}, {:?})", request_id, result)
            }
            Msg::TimedOut { request_id } => format!("TimedOut({})", request_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    DecodeImage {
        request_id: RequestId,
        image: Vec<u8>,
    },
    ClassifyImage {
        request_id: RequestId,
        image: DynamicImage,
    },
    StartTimeout {
        request_id: RequestId,
        duration: Duration,
    },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::DecodeImage { request_id, image } => {
                format!("DecodeImage({}, {} bytes)", request_id, image.len())
            }
            Effect::ClassifyImage { request_id, image } => format!(
                "ClassifyImage({}, {}x{})",
                request_id,
                image.width(),
                image.height()
            ),
            Effect::StartTimeout {
                request_id,
                duration,
            } => format!("StartTimeout({}, {:?})", request_id, duration),
        }
    }
}

pub fn init() -> (Model, Vec<Effect>) {
    (Model::default(), vec![])
}

/// A completion is stale when a newer submission replaced its request, or when
/// its request already settled (for instance by timing out).
pub fn is_stale(model: &Model, msg: &Msg) -> bool {
    match msg.request_id() {
        Some(request_id) => {
            request_id != model.request_id || model.state != ClassificationState::Processing
        }
        None => false,
    }
}

pub fn transition(config: &Config, model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    if is_stale(&model, &msg) {
        return (model, vec![]);
    }

    match msg {
        Msg::Submitted { image } => {
            let request_id = model.request_id.next();

            let mut effects = vec![Effect::DecodeImage { request_id, image }];
            if let Some(duration) = config.classify_timeout {
                effects.push(Effect::StartTimeout {
                    request_id,
                    duration,
                });
            }

            (
                Model {
                    request_id,
                    state: ClassificationState::Processing,
                },
                effects,
            )
        }

        Msg::DecodeDone {
            request_id,
            result: Ok(image),
        } => (model, vec![Effect::ClassifyImage { request_id, image }]),

        Msg::DecodeDone { result: Err(_), .. } => {
            (failed(model, ClassificationError::DecodeFailure), vec![])
        }

        Msg::ClassifyDone {
            result: Ok(observations),
            ..
        } => match derive(config, &observations) {
            Ok(verdict) => (
                Model {
                    state: ClassificationState::Result(verdict),
                    ..model
                },
                vec![],
            ),
            Err(error) => (failed(model, error), vec![]),
        },

        Msg::ClassifyDone { result: Err(_), .. } | Msg::TimedOut { .. } => {
            (failed(model, ClassificationError::InferenceFailure), vec![])
        }
    }
}

fn failed(model: Model, error: ClassificationError) -> Model {
    Model {
        state: ClassificationState::Failed(error.to_string()),
        ..model
    }
}
