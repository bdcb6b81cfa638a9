//! crates/schemes_connect_core/src/assistant.rs
//!
//! The conversational query flow: one question at a time to the
//! question-answering backend, with language directives, "I don't know"
//! detection and optional spoken replies.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{ChatMessage, Language};
use crate::ports::QuestionAnsweringService;
use crate::voice::VoiceOutput;

/// Phrases that mark an answer as "the backend doesn't know".
pub const UNKNOWN_ANSWER_PATTERNS: [&str; 4] = [
    "i don't know",
    "no information",
    "not available",
    "cannot find",
];

/// Suggested questions offered on an empty transcript.
pub const QUICK_QUESTIONS: [&str; 5] = [
    "What schemes are available for students?",
    "Health insurance eligibility requirements",
    "Farmer subsidies and agricultural schemes",
    "Housing schemes for low-income families",
    "Senior citizen benefits and pensions",
];

/// The question as sent to the backend: language directive, then the text.
pub fn compose_question(language: Language, text: &str) -> String {
    format!("{}{}", language.instruction(), text)
}

pub fn is_unknown_answer(answer: &str) -> bool {
    // Typographic apostrophes would otherwise dodge "i don't know".
    let normalized = answer.to_lowercase().replace('\u{2019}', "'");
    UNKNOWN_ANSWER_PATTERNS
        .iter()
        .any(|pattern| normalized.contains(pattern))
}

/// The text to display for a raw backend answer.
pub fn finalize_answer(language: Language, raw: &str) -> String {
    if is_unknown_answer(raw) {
        language.fallback_message().to_string()
    } else {
        raw.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    Idle,
    AwaitingResponse,
}

pub struct ConversationFlow {
    service: Arc<dyn QuestionAnsweringService>,
    voice: VoiceOutput,
    language: Language,
    voice_enabled: bool,
    state: ConversationState,
    transcript: Vec<ChatMessage>,
    pending_notice: Option<&'static str>,
}

impl ConversationFlow {
    /// Voice replies start enabled; they only happen if `voice` is available.
    pub fn new(service: Arc<dyn QuestionAnsweringService>, voice: VoiceOutput) -> Self {
        Self {
            service,
            voice,
            language: Language::default(),
            voice_enabled: true,
            state: ConversationState::Idle,
            transcript: Vec::new(),
            pending_notice: None,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn voice_enabled(&self) -> bool {
        self.voice_enabled
    }

    /// Turning voice off also silences whatever is being spoken.
    pub fn set_voice_enabled(&mut self, enabled: bool) {
        self.voice_enabled = enabled;
        if !enabled {
            self.voice.cancel();
        }
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// A one-shot capability notice (voice unsupported), if one is pending.
    pub fn take_notice(&mut self) -> Option<&'static str> {
        self.pending_notice.take()
    }

    /// Sends a question and appends both sides to the transcript.
    ///
    /// Blank input is ignored. Backend failures never surface as errors: the
    /// reply becomes the fallback message for the current language.
    pub async fn send(&mut self, content: &str) -> Option<&ChatMessage> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }

        self.transcript.push(ChatMessage::user(content));
        self.state = ConversationState::AwaitingResponse;

        let language = self.language;
        let question = compose_question(language, content);
        let reply = match self.service.ask(&question).await {
            Ok(answer) => {
                let text = finalize_answer(language, &answer.answer);
                if text != answer.answer {
                    info!("Backend had no answer; showing fallback message");
                }
                ChatMessage::assistant(text, answer.sources)
            }
            Err(e) => {
                warn!("Question answering failed: {}", e);
                ChatMessage::assistant(language.fallback_message(), Vec::new())
            }
        };

        if self.voice_enabled {
            if let Some(notice) = self.voice.speak(&reply.content, language) {
                self.pending_notice = Some(notice);
            }
        }

        self.transcript.push(reply);
        self.state = ConversationState::Idle;
        self.transcript.last()
    }

    /// Waits for a spoken reply to finish (e.g. before the process exits).
    pub async fn finish_speaking(&mut self) {
        self.voice.finish().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Answer, Role};
    use crate::ports::{AudioSink, PortError, PortResult, TextToSpeechService};
    use crate::voice::{Speaker, VOICE_OUTPUT_UNSUPPORTED};
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Mutex;

    /// Mock QA backend that records questions and returns a canned answer.
    struct MockQa {
        answer: Option<Answer>,
        questions: Mutex<Vec<String>>,
    }

    impl MockQa {
        fn answering(answer: &str, sources: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                answer: Some(Answer {
                    answer: answer.to_string(),
                    sources: sources.iter().map(|s| s.to_string()).collect(),
                }),
                questions: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                answer: None,
                questions: Mutex::new(Vec::new()),
            })
        }

        fn questions(&self) -> Vec<String> {
            self.questions.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QuestionAnsweringService for MockQa {
        async fn ask(&self, question: &str) -> PortResult<Answer> {
            self.questions.lock().unwrap().push(question.to_string());
            self.answer
                .clone()
                .ok_or_else(|| PortError::Transport("connection refused".to_string()))
        }
    }

    struct EchoTts;

    #[async_trait]
    impl TextToSpeechService for EchoTts {
        async fn generate_audio(&self, text: &str, _locale: &str) -> PortResult<Bytes> {
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
            self.played
                .lock()
                .unwrap()
                .push((String::from_utf8_lossy(&audio).to_string(), locale.to_string()));
            Ok(())
        }
    }

    #[test]
    fn unknown_patterns_match_any_case() {
        assert!(is_unknown_answer("There is NO INFORMATION about that."));
        assert!(is_unknown_answer("I don’t know."));
        assert!(is_unknown_answer("Details are Not Available in the documents"));
        assert!(!is_unknown_answer("PM Kisan pays ₹6000 a year."));
    }

    #[test]
    fn finalize_substitutes_language_fallback() {
        for language in Language::ALL {
            assert_eq!(
                finalize_answer(language, "Sorry, no information found."),
                language.fallback_message()
            );
        }
        assert_eq!(finalize_answer(Language::Hindi, "ठीक है"), "ठीक है");
    }

    #[test]
    fn compose_prefixes_directive_for_non_default_languages() {
        assert_eq!(compose_question(Language::English, "hi"), "hi");
        assert_eq!(
            compose_question(Language::Marathi, "योजना?"),
            "कृपया उत्तर मराठीत द्या.\n\nयोजना?"
        );
    }

    #[tokio::test]
    async fn answer_and_sources_are_appended_in_order() {
        let qa = MockQa::answering("Apply on the PM Kisan portal.", &["pmkisan.pdf"]);
        let mut flow = ConversationFlow::new(qa.clone(), VoiceOutput::unavailable());
        flow.set_voice_enabled(false);

        let reply = flow.send("  How do I apply for PM Kisan?  ").await.unwrap().clone();

        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "Apply on the PM Kisan portal.");
        assert_eq!(reply.sources, vec!["pmkisan.pdf"]);
        let transcript = flow.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, Role::User);
        assert_eq!(transcript[0].content, "How do I apply for PM Kisan?");
        assert_eq!(qa.questions(), vec!["How do I apply for PM Kisan?"]);
        assert_eq!(flow.state(), ConversationState::Idle);
    }

    #[tokio::test]
    async fn no_information_answer_shows_selected_language_fallback() {
        let qa = MockQa::answering("There is No Information on this scheme.", &["a.pdf"]);
        let mut flow = ConversationFlow::new(qa.clone(), VoiceOutput::unavailable());
        flow.set_voice_enabled(false);
        flow.set_language(Language::Hindi);

        let reply = flow.send("योजना के बारे में बताइए").await.unwrap();

        assert_eq!(reply.content, Language::Hindi.fallback_message());
        assert_eq!(reply.sources, vec!["a.pdf"]);
        assert!(qa.questions()[0].starts_with(Language::Hindi.instruction()));
    }

    #[tokio::test]
    async fn transport_error_appends_fallback_without_sources() {
        let mut flow = ConversationFlow::new(MockQa::failing(), VoiceOutput::unavailable());
        flow.set_voice_enabled(false);
        flow.set_language(Language::Marathi);

        let reply = flow.send("माहिती द्या").await.unwrap();

        assert_eq!(reply.content, Language::Marathi.fallback_message());
        assert!(reply.sources.is_empty());
        assert_eq!(flow.transcript().len(), 2);
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let qa = MockQa::answering("unused", &[]);
        let mut flow = ConversationFlow::new(qa.clone(), VoiceOutput::unavailable());

        assert!(flow.send("   \n").await.is_none());
        assert!(flow.transcript().is_empty());
        assert!(qa.questions().is_empty());
    }

    #[tokio::test]
    async fn spoken_reply_uses_final_text_and_locale() {
        let sink = Arc::new(RecordingSink::default());
        let voice = VoiceOutput::Available(Speaker::new(Arc::new(EchoTts), sink.clone()));
        let qa = MockQa::answering("I don't know.", &[]);
        let mut flow = ConversationFlow::new(qa, voice);
        flow.set_language(Language::Marathi);

        flow.send("प्रश्न").await;
        flow.finish_speaking().await;

        let played = sink.played.lock().unwrap().clone();
        assert_eq!(
            played,
            vec![(
                Language::Marathi.fallback_message().to_string(),
                "mr-IN".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn missing_voice_is_reported_once() {
        let qa = MockQa::answering("Yes.", &[]);
        let mut flow = ConversationFlow::new(qa, VoiceOutput::unavailable());

        flow.send("first").await;
        assert_eq!(flow.take_notice(), Some(VOICE_OUTPUT_UNSUPPORTED));
        flow.send("second").await;
        assert_eq!(flow.take_notice(), None);
    }
}
