//! crates/schemes_connect_core/src/voice.rs
//!
//! Optional voice output and input. Either capability may be missing in the
//! running environment; callers always go through the `Available` /
//! `Unavailable` variants and never assume a provider exists.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::domain::Language;
use crate::ports::{AudioSink, PortResult, SpeechToTextService, TextToSpeechService};

pub const VOICE_OUTPUT_UNSUPPORTED: &str = "Voice output is not supported in this environment.";
pub const VOICE_INPUT_UNSUPPORTED: &str =
    "Speech recognition is not supported in this environment.";

//=========================================================================================
// Output
//=========================================================================================

struct Utterance {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Synthesizes text and plays it, one utterance at a time.
pub struct Speaker {
    tts: Arc<dyn TextToSpeechService>,
    sink: Arc<dyn AudioSink>,
    current: Option<Utterance>,
}

impl Speaker {
    pub fn new(tts: Arc<dyn TextToSpeechService>, sink: Arc<dyn AudioSink>) -> Self {
        Self {
            tts,
            sink,
            current: None,
        }
    }

    /// Starts speaking `text`. Whatever was being spoken is cancelled first.
    pub fn speak(&mut self, text: &str, language: Language) {
        self.cancel();

        let token = CancellationToken::new();
        let child = token.clone();
        let tts = Arc::clone(&self.tts);
        let sink = Arc::clone(&self.sink);
        let text = text.to_string();
        let locale = language.locale();

        let handle = tokio::spawn(async move {
            let audio = tokio::select! {
                biased;
                _ = child.cancelled() => return,
                audio = tts.generate_audio(&text, locale) => audio,
            };
            let audio = match audio {
                Ok(audio) => audio,
                Err(e) => {
                    warn!("Speech synthesis failed: {}", e);
                    return;
                }
            };
            tokio::select! {
                biased;
                _ = child.cancelled() => {}
                played = sink.play(audio, locale) => {
                    if let Err(e) = played {
                        warn!("Audio playback failed: {}", e);
                    }
                }
            }
        });

        self.current = Some(Utterance { token, handle });
    }

    /// Stops the utterance in progress, if any.
    pub fn cancel(&mut self) {
        if let Some(utterance) = self.current.take() {
            if !utterance.handle.is_finished() {
                info!("Cancelling utterance in progress");
            }
            utterance.token.cancel();
        }
    }

    pub fn is_speaking(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|utterance| !utterance.handle.is_finished())
    }

    /// Waits for the current utterance to finish playing.
    pub async fn finish(&mut self) {
        if let Some(utterance) = self.current.take() {
            if let Err(e) = utterance.handle.await {
                warn!("Utterance task ended abnormally: {}", e);
            }
        }
    }
}

pub enum VoiceOutput {
    Available(Speaker),
    Unavailable { notified: bool },
}

impl VoiceOutput {
    pub fn unavailable() -> Self {
        VoiceOutput::Unavailable { notified: false }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, VoiceOutput::Available(_))
    }

    /// Speaks `text`, or returns the unsupported notice the first time it is
    /// asked to speak without a provider. Later calls are silent no-ops.
    pub fn speak(&mut self, text: &str, language: Language) -> Option<&'static str> {
        match self {
            VoiceOutput::Available(speaker) => {
                speaker.speak(text, language);
                None
            }
            VoiceOutput::Unavailable { notified } => {
                if *notified {
                    None
                } else {
                    *notified = true;
                    Some(VOICE_OUTPUT_UNSUPPORTED)
                }
            }
        }
    }

    pub fn cancel(&mut self) {
        if let VoiceOutput::Available(speaker) = self {
            speaker.cancel();
        }
    }

    pub async fn finish(&mut self) {
        if let VoiceOutput::Available(speaker) = self {
            speaker.finish().await;
        }
    }
}

//=========================================================================================
// Input
//=========================================================================================

/// Result of a voice capture attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    Transcript(String),
    /// First attempt without a provider; show this once.
    Unsupported(&'static str),
    /// Voice input was already reported unsupported this session.
    Disabled,
}

pub enum VoiceInput {
    Available(Arc<dyn SpeechToTextService>),
    Unavailable { notified: bool },
}

impl VoiceInput {
    pub fn unavailable() -> Self {
        VoiceInput::Unavailable { notified: false }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, VoiceInput::Available(_))
    }

    pub async fn transcribe(&mut self, audio: &[u8]) -> PortResult<Capture> {
        match self {
            VoiceInput::Available(stt) => {
                let text = stt.transcribe_audio(audio).await?;
                Ok(Capture::Transcript(text.trim().to_string()))
            }
            VoiceInput::Unavailable { notified } => {
                if *notified {
                    Ok(Capture::Disabled)
                } else {
                    *notified = true;
                    Ok(Capture::Unsupported(VOICE_INPUT_UNSUPPORTED))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PortError;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Echoes text as audio after an optional delay.
    struct SlowTts {
        delay: Duration,
    }

    #[async_trait]
    impl TextToSpeechService for SlowTts {
        async fn generate_audio(&self, text: &str, _locale: &str) -> PortResult<Bytes> {
            tokio::time::sleep(self.delay).await;
            Ok(Bytes::from(text.to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        played: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl AudioSink for RecordingSink {
        async fn play(&self, audio: Bytes, locale: &str) -> PortResult<()> {
            let text = String::from_utf8_lossy(&audio).to_string();
            self.played.lock().unwrap().push((text, locale.to_string()));
            Ok(())
        }
    }

    struct FixedStt;

    #[async_trait]
    impl SpeechToTextService for FixedStt {
        async fn transcribe_audio(&self, audio_data: &[u8]) -> PortResult<String> {
            if audio_data.is_empty() {
                return Err(PortError::Unexpected("empty recording".to_string()));
            }
            Ok("  housing schemes for farmers \n".to_string())
        }
    }

    #[tokio::test]
    async fn speaks_with_language_locale() {
        let sink = Arc::new(RecordingSink::default());
        let mut speaker = Speaker::new(
            Arc::new(SlowTts {
                delay: Duration::ZERO,
            }),
            sink.clone(),
        );

        speaker.speak("नमस्ते", Language::Hindi);
        speaker.finish().await;

        let played = sink.played.lock().unwrap().clone();
        assert_eq!(played, vec![("नमस्ते".to_string(), "hi-IN".to_string())]);
    }

    #[tokio::test]
    async fn new_utterance_cancels_previous() {
        let sink = Arc::new(RecordingSink::default());
        let mut speaker = Speaker::new(
            Arc::new(SlowTts {
                delay: Duration::from_millis(50),
            }),
            sink.clone(),
        );

        speaker.speak("first", Language::English);
        speaker.speak("second", Language::English);
        speaker.finish().await;
        // Give the cancelled task a chance to run to completion, too.
        tokio::time::sleep(Duration::from_millis(100)).await;

        let played = sink.played.lock().unwrap().clone();
        assert_eq!(played, vec![("second".to_string(), "en-IN".to_string())]);
        assert!(!speaker.is_speaking());
    }

    #[tokio::test]
    async fn unavailable_output_notifies_once() {
        let mut voice = VoiceOutput::unavailable();
        assert!(!voice.is_available());
        assert_eq!(
            voice.speak("hello", Language::English),
            Some(VOICE_OUTPUT_UNSUPPORTED)
        );
        assert_eq!(voice.speak("hello again", Language::English), None);
    }

    #[tokio::test]
    async fn available_input_trims_transcript() {
        let mut input = VoiceInput::Available(Arc::new(FixedStt));
        assert_eq!(
            input.transcribe(b"RIFF").await.unwrap(),
            Capture::Transcript("housing schemes for farmers".to_string())
        );
        assert!(input.transcribe(b"").await.is_err());
    }

    #[tokio::test]
    async fn unavailable_input_notifies_once_then_disables() {
        let mut input = VoiceInput::unavailable();
        assert_eq!(
            input.transcribe(b"RIFF").await.unwrap(),
            Capture::Unsupported(VOICE_INPUT_UNSUPPORTED)
        );
        assert_eq!(input.transcribe(b"RIFF").await.unwrap(), Capture::Disabled);
    }
}
