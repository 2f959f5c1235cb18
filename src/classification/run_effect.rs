use crate::classification::controller::ClassificationController;
use crate::classification::core::{Effect, Msg};
use std::panic::{catch_unwind, AssertUnwindSafe};

impl ClassificationController {
    pub(super) fn run_effect(&self, effect: Effect) {
        let _ = self
            .logger
            .info(&format!("Running effect: {}", effect.to_display_string()));

        match effect {
            Effect::DecodeImage { request_id, image } => {
                // A panicking capability must still settle the request.
                let result = catch_unwind(AssertUnwindSafe(|| {
                    self.image_decoder.decode(&image)
                }))
                .unwrap_or_else(|_| Err("decoder panicked".into()));
                if let Err(e) = &result {
                    let _ = self
                        .logger
                        .error(&format!("decode failed for request {}: {}", request_id, e));
                }
                self.dispatch(Msg::DecodeDone { request_id, result });
            }
            Effect::ClassifyImage { request_id, image } => {
                let result = catch_unwind(AssertUnwindSafe(|| {
                    self.image_classifier.classify(&image)
                }))
                .unwrap_or_else(|_| Err("classifier panicked".into()));
                if let Err(e) = &result {
                    let _ = self.logger.error(&format!(
                        "classification failed for request {}: {}",
                        request_id, e
                    ));
                }
                self.dispatch(Msg::ClassifyDone { request_id, result });
            }
            Effect::StartTimeout {
                request_id,
                duration,
            } => {
                std::thread::sleep(duration);
                self.dispatch(Msg::TimedOut { request_id });
            }
        }
    }
}
