pub mod error;
pub mod orchestrator;
pub mod segmenter;
pub mod service;
pub mod stitcher;

use serde::{Deserialize, Serialize};

pub use error::TtsServiceError;
pub use orchestrator::ProgressFn;
pub use segmenter::{segment, Chunk};
pub use service::{TtsService, TtsServiceApi, TtsSynthesisResult};
pub use stitcher::{stitch, FinalAudio};

/// Request for POST /api/tts/synthesize
#[derive(Debug, Serialize, Deserialize)]
pub struct TtsRequest {
    pub text: String,
}
