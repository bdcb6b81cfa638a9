//! services/client/src/state.rs
//!
//! Defines the application state shared by every command: configuration, the
//! local session store and the service ports, wired once at startup.

use crate::adapters::{FileAudioSink, FileStore, HttpBackend, OpenAiSstAdapter, OpenAiTtsAdapter};
use crate::adapters::tts::parse_voice;
use crate::config::{Config, ConfigError};
use crate::error::ClientError;
use async_openai::{config::OpenAIConfig, types::audio::SpeechModel, Client};
use schemes_connect_core::ports::{
    AudioSink, HealthService, QuestionAnsweringService, RecommendationService,
    SpeechToTextService, TextToSpeechService,
};
use schemes_connect_core::{
    ConversationFlow, Language, RecommendationFlow, SessionStore, Speaker, VoiceInput,
    VoiceOutput,
};
use std::sync::Arc;
use tracing::info;

/// The speech adapters, present only when a provider key is configured.
#[derive(Clone)]
pub struct SpeechAdapters {
    pub tts: Arc<dyn TextToSpeechService>,
    pub stt: Arc<dyn SpeechToTextService>,
    pub sink: Arc<dyn AudioSink>,
}

//=========================================================================================
// AppState
//=========================================================================================

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: SessionStore,
    pub health: Arc<dyn HealthService>,
    pub recommender: Arc<dyn RecommendationService>,
    pub qa: Arc<dyn QuestionAnsweringService>,
    pub speech: Option<SpeechAdapters>,
}

impl AppState {
    /// Wires the production adapters described by `config`.
    pub fn from_config(config: Config) -> Result<Self, ClientError> {
        let config = Arc::new(config);

        let backend = Arc::new(HttpBackend::new(&config.api_base_url, config.request_timeout)?);
        let store = SessionStore::new(Arc::new(FileStore::new(config.store_path.clone())));
        info!(backend = %config.api_base_url, store = %config.store_path.display(), "Adapters ready");

        let speech = match config.openai_api_key.as_deref() {
            Some(key) => Some(Self::speech_adapters(&config, key)?),
            None => {
                info!("OPENAI_API_KEY not set; voice input and output are unavailable");
                None
            }
        };

        Ok(Self {
            config,
            store,
            health: backend.clone(),
            recommender: backend.clone(),
            qa: backend,
            speech,
        })
    }

    fn speech_adapters(config: &Config, api_key: &str) -> Result<SpeechAdapters, ConfigError> {
        let voice = parse_voice(&config.tts_voice).ok_or_else(|| {
            ConfigError::InvalidValue(
                "TTS_VOICE".to_string(),
                format!("'{}' is not a supported voice", config.tts_voice),
            )
        })?;
        let openai_client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));

        Ok(SpeechAdapters {
            tts: Arc::new(OpenAiTtsAdapter::new(
                openai_client.clone(),
                SpeechModel::Tts1Hd,
                voice,
            )),
            stt: Arc::new(OpenAiSstAdapter::new(openai_client, config.sst_model.clone())),
            sink: Arc::new(FileAudioSink::new(config.audio_output_dir.clone())),
        })
    }

    pub fn voice_output(&self) -> VoiceOutput {
        match &self.speech {
            Some(speech) => VoiceOutput::Available(Speaker::new(
                Arc::clone(&speech.tts),
                Arc::clone(&speech.sink),
            )),
            None => VoiceOutput::unavailable(),
        }
    }

    pub fn voice_input(&self) -> VoiceInput {
        match &self.speech {
            Some(speech) => VoiceInput::Available(Arc::clone(&speech.stt)),
            None => VoiceInput::unavailable(),
        }
    }

    pub fn recommendation_flow(&self) -> RecommendationFlow {
        RecommendationFlow::new(Arc::clone(&self.recommender))
    }

    /// A fresh conversation. `language` and `voice` override the configured
    /// defaults when given.
    pub fn conversation(&self, language: Option<Language>, voice: Option<bool>) -> ConversationFlow {
        let mut flow = ConversationFlow::new(Arc::clone(&self.qa), self.voice_output());
        flow.set_language(language.unwrap_or(self.config.language));
        flow.set_voice_enabled(voice.unwrap_or(self.config.voice_enabled));
        flow
    }
}
