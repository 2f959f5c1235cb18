use crate::classification::core::{
    init, is_stale, transition, ClassificationState, Effect, Model, Msg, RequestId,
};
use crate::config::Config;
use crate::image_classifier::interface::ImageClassifier;
use crate::image_decoder::interface::ImageDecoder;
use crate::library::logger::interface::Logger;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Subscriber = Arc<dyn Fn(&ClassificationState) + Send + Sync>;

struct Inner {
    model: Model,
    subscribers: Vec<Subscriber>,
    /// Transitions not yet delivered, in the order they were applied.
    pending: VecDeque<ClassificationState>,
    /// Set while some thread is delivering `pending`.
    draining: bool,
}

/// Owns the classification lifecycle.
///
/// `submit` never blocks on decoding or inference: those run as effects on
/// their own threads and report back through `dispatch`. The request id and
/// the state sit behind one lock, so the staleness check and the state update
/// are a single step. Notifications are queued under that lock and delivered
/// after it is released, one thread at a time.
#[derive(Clone)]
pub struct ClassificationController {
    inner: Arc<Mutex<Inner>>,
    pub(super) config: Config,
    pub(super) logger: Arc<dyn Logger + Send + Sync>,
    pub(super) image_decoder: Arc<dyn ImageDecoder + Send + Sync>,
    pub(super) image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
}

impl ClassificationController {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        image_decoder: Arc<dyn ImageDecoder + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Self {
        let (model, effects) = init();

        let controller = Self {
            inner: Arc::new(Mutex::new(Inner {
                model,
                subscribers: vec![],
                pending: VecDeque::new(),
                draining: false,
            })),
            config,
            logger: logger.with_namespace("classification"),
            image_decoder,
            image_classifier,
        };

        controller.run_effects(effects);

        controller
    }

    /// Starts classifying `image` (encoded bytes). Legal from any state; any
    /// earlier request still in flight becomes stale.
    pub fn submit(&self, image: Vec<u8>) -> RequestId {
        self.dispatch(Msg::Submitted { image })
    }

    pub fn current_state(&self) -> ClassificationState {
        self.lock().model.state.clone()
    }

    /// Registers `subscriber` for every subsequent transition.
    ///
    /// Subscribers see transitions in the order they were applied. They run
    /// without the controller's lock held and may call back into it; a
    /// `submit` made from a subscriber is delivered after the current
    /// notification finishes.
    pub fn subscribe(&self, subscriber: impl Fn(&ClassificationState) + Send + Sync + 'static) {
        self.lock().subscribers.push(Arc::new(subscriber));
    }

    pub(super) fn dispatch(&self, msg: Msg) -> RequestId {
        let (request_id, effects) = {
            let mut inner = self.lock();

            let _ = self.logger.info(&format!(
                "msg {} in state {:?}",
                msg.to_display_string(),
                inner.model.state
            ));

            if is_stale(&inner.model, &msg) {
                let _ = self.logger.info(&format!(
                    "discarding stale result for request {:?} (current {})",
                    msg.request_id(),
                    inner.model.request_id
                ));
                return inner.model.request_id;
            }

            let always_notify = matches!(msg, Msg::Submitted { .. });
            let previous = inner.model.state.clone();

            let (model, effects) = transition(&self.config, inner.model.clone(), msg);
            inner.model = model;

            if always_notify || inner.model.state != previous {
                let _ = self.logger.info(&format!(
                    "request {} is now {:?}",
                    inner.model.request_id, inner.model.state
                ));
                let state = inner.model.state.clone();
                inner.pending.push_back(state);
            }

            (inner.model.request_id, effects)
        };

        self.notify_subscribers();
        self.run_effects(effects);

        request_id
    }

    fn notify_subscribers(&self) {
        {
            let mut inner = self.lock();
            if inner.draining {
                return;
            }
            inner.draining = true;
        }

        let _guard = DrainGuard(self);

        loop {
            let next = {
                let mut inner = self.lock();
                match inner.pending.pop_front() {
                    Some(state) => Some((state, inner.subscribers.clone())),
                    None => {
                        inner.draining = false;
                        None
                    }
                }
            };

            let Some((state, subscribers)) = next else {
                break;
            };

            for subscriber in &subscribers {
                subscriber(&state);
            }
        }
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let self_clone = self.clone();
            std::thread::spawn(move || self_clone.run_effect(effect));
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Hands delivery back if a subscriber panics mid-drain.
struct DrainGuard<'a>(&'a ClassificationController);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.lock().draining = false;
        }
    }
}
