//! services/client/src/adapters/audio_sink.rs
//!
//! An `AudioSink` that writes each synthesized reply to an MP3 file, for
//! terminals with no audio device of their own.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use schemes_connect_core::ports::{AudioSink, PortError, PortResult};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct FileAudioSink {
    dir: PathBuf,
}

impl FileAudioSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl AudioSink for FileAudioSink {
    async fn play(&self, audio: Bytes, locale: &str) -> PortResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| PortError::Unexpected(format!("{}: {}", self.dir.display(), e)))?;

        let name = format!("reply-{}-{}.mp3", Utc::now().format("%Y%m%dT%H%M%S%.3f"), locale);
        let path = self.dir.join(name);
        tokio::fs::write(&path, &audio)
            .await
            .map_err(|e| PortError::Unexpected(format!("{}: {}", path.display(), e)))?;

        info!(path = %path.display(), bytes = audio.len(), "Spoken reply saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reply_is_written_with_locale_in_the_name() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileAudioSink::new(dir.path().join("audio"));

        sink.play(Bytes::from_static(b"ID3"), "hi-IN").await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(sink.dir())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries.len(), 1);
        let name = entries[0].file_name().unwrap().to_string_lossy().to_string();
        assert!(name.ends_with("-hi-IN.mp3"));
        assert_eq!(std::fs::read(&entries[0]).unwrap(), b"ID3");
    }
}
