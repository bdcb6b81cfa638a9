pub mod audio_sink;
pub mod backend;
pub mod file_store;
pub mod sst;
pub mod tts;

pub use audio_sink::FileAudioSink;
pub use backend::HttpBackend;
pub use file_store::FileStore;
pub use sst::OpenAiSstAdapter;
pub use tts::OpenAiTtsAdapter;
