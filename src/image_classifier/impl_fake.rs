use crate::image_classifier::interface::{ImageClassifier, Observation};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

struct FakeResponse {
    result: Result<Vec<Observation>, String>,
    gate: Option<Receiver<()>>,
}

/// Answers with scripted responses in call order.
///
/// A gated response holds the calling thread until its sender fires (or is
/// dropped), which lets tests finish requests out of submission order.
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    responses: Mutex<VecDeque<FakeResponse>>,
    calls: AtomicUsize,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            responses: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn respond_with(&self, observations: Vec<Observation>) {
        self.push(FakeResponse {
            result: Ok(observations),
            gate: None,
        });
    }

    pub fn respond_with_gated(&self, observations: Vec<Observation>) -> Sender<()> {
        let (release, gate) = channel();
        self.push(FakeResponse {
            result: Ok(observations),
            gate: Some(gate),
        });
        release
    }

    pub fn fail_with(&self, message: &str) {
        self.push(FakeResponse {
            result: Err(message.to_string()),
            gate: None,
        });
    }

    pub fn fail_with_gated(&self, message: &str) -> Sender<()> {
        let (release, gate) = channel();
        self.push(FakeResponse {
            result: Err(message.to_string()),
            gate: Some(gate),
        });
        release
    }

    /// Number of `classify` invocations that have picked up a response.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(&self, response: FakeResponse) {
        match self.responses.lock() {
            Ok(mut responses) => responses.push_back(response),
            Err(poisoned) => poisoned.into_inner().push_back(response),
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Observation>, Box<dyn std::error::Error + Send + Sync>> {
        let _ = self.logger.info(&format!(
            "Classifying {}x{} image...",
            image.width(),
            image.height()
        ));

        let response = self
            .responses
            .lock()
            .map_err(|e| e.to_string())?
            .pop_front();
        self.calls.fetch_add(1, Ordering::SeqCst);

        let response = response.ok_or("no scripted response left")?;

        if let Some(gate) = response.gate {
            let _ = gate.recv();
        }

        let _ = self.logger.info("Classified image");

        response.result.map_err(|message| message.into())
    }
}
