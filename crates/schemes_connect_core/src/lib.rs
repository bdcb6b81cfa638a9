pub mod assistant;
pub mod auth;
pub mod catalog;
pub mod community;
pub mod compare;
pub mod directory;
pub mod domain;
pub mod ports;
pub mod recommendation;
pub mod store;
pub mod voice;

pub use assistant::{ConversationFlow, ConversationState};
pub use auth::{AuthError, LoginForm, RegistrationForm};
pub use community::{Forum, ForumError};
pub use compare::{CompareError, Comparison, ComparisonTable};
pub use directory::{CategoryFilter, SchemeDirectory};
pub use domain::{
    Answer, AuthSession, ChatMessage, Confidence, HealthStatus, Language, ProfileDraft,
    ProfileValidationError, RecommendationRequest, Role, Scheme, UserProfile,
};
pub use ports::{
    AudioSink, HealthService, KeyValueStore, PortError, PortResult, QuestionAnsweringService,
    RecommendationService, SpeechToTextService, TextToSpeechService,
};
pub use recommendation::{Notice, RecommendationFlow, RecommendationState};
pub use store::{MemoryStore, SessionStore};
pub use voice::{Capture, Speaker, VoiceInput, VoiceOutput};
