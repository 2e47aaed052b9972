/// Coarse milestones of an extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProgressStage {
    Idle,
    RequestConstructed,
    ImageEncoded,
    ResponseReceived,
    ResponseParsed,
    Complete,
}

impl ProgressStage {
    /// Percentage shown for the milestone, in `[0, 100]`.
    pub fn percent(&self) -> u8 {
        match self {
            ProgressStage::Idle => 0,
            ProgressStage::RequestConstructed => 25,
            ProgressStage::ImageEncoded => 50,
            ProgressStage::ResponseReceived => 75,
            ProgressStage::ResponseParsed => 90,
            ProgressStage::Complete => 100,
        }
    }
}

impl std::fmt::Display for ProgressStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressStage::Idle => write!(f, "idle"),
            ProgressStage::RequestConstructed => write!(f, "request_constructed"),
            ProgressStage::ImageEncoded => write!(f, "image_encoded"),
            ProgressStage::ResponseReceived => write!(f, "response_received"),
            ProgressStage::ResponseParsed => write!(f, "response_parsed"),
            ProgressStage::Complete => write!(f, "complete"),
        }
    }
}
