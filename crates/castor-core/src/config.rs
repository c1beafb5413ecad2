//! Engine configuration.

use std::{ops::Range, time::Duration};

/// Demo participant names, cycled by arrival slot.
pub const DEMO_NAMES: [&str; 5] = ["Alice", "Bob", "Charlie", "Diana", "Eve"];

/// Lines posted by the periodic chat generator.
pub const DEMO_MESSAGES: [&str; 6] = [
    "Hello everyone!",
    "Can someone help me with this?",
    "Great presentation!",
    "I have a question...",
    "Thanks for the help!",
    "This is working well!",
];

/// Lines posted in reply to the local user.
pub const DEMO_REPLIES: [&str; 6] = [
    "That's a great point!",
    "I agree with that.",
    "Can you explain more?",
    "Thanks for sharing!",
    "Let me think about that...",
    "Good idea!",
];

/// Presence simulator tuning.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Delay before the first demo arrival.
    pub arrival_offset: Duration,
    /// Gap between consecutive arrivals.
    pub arrival_spacing: Duration,
    /// Fewest demo participants per session.
    pub min_arrivals: usize,
    /// Most demo participants per session.
    pub max_arrivals: usize,
    /// Probability a demo participant arrives muted.
    pub muted_probability: f64,
    /// Probability a demo participant arrives with camera on.
    pub camera_probability: f64,
    /// Period of the chat generator.
    pub chat_period: Duration,
    /// Probability a chat tick posts a message.
    pub chat_probability: f64,
    /// Period of the speaking flicker.
    pub speaking_period: Duration,
    /// Probability a flicker tick toggles the chosen participant.
    pub speaking_probability: f64,
    /// Delay range for the synthetic reply to a local message.
    pub reply_delay: Range<Duration>,
    /// Demo participant names.
    pub names: Vec<String>,
    /// Chat generator lines.
    pub messages: Vec<String>,
    /// Reply lines.
    pub replies: Vec<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            arrival_offset: Duration::from_millis(1000),
            arrival_spacing: Duration::from_millis(2000),
            min_arrivals: 2,
            max_arrivals: 4,
            muted_probability: 0.3,
            camera_probability: 0.5,
            chat_period: Duration::from_millis(5000),
            chat_probability: 0.3,
            speaking_period: Duration::from_millis(3000),
            speaking_probability: 0.2,
            reply_delay: Duration::from_millis(1000)..Duration::from_millis(3000),
            names: DEMO_NAMES.iter().map(ToString::to_string).collect(),
            messages: DEMO_MESSAGES.iter().map(ToString::to_string).collect(),
            replies: DEMO_REPLIES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl DemoConfig {
    /// Deadline of arrival `slot`, relative to demo start.
    pub fn arrival_delay(&self, slot: usize) -> Duration {
        self.arrival_offset + self.arrival_spacing * slot as u32
    }
}

/// Room engine configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Presence simulator tuning.
    pub demo: DemoConfig,
}
