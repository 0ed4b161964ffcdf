//! Text-to-speech for couplet text.
//!
//! Input text may carry HTML markup (couplets are stored with `<br>`
//! between their two lines). Tags are replaced by spaces before synthesis,
//! and the resulting MP3 is returned base64-encoded so it can travel inside
//! a JSON document.

use std::{io::Read, sync::LazyLock};

use base64::Engine as _;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, error};

use crate::{
    config::{
        TTS_CONNECT_TIMEOUT, TTS_ENDPOINT, TTS_MAX_CHARS, TTS_READ_TIMEOUT,
    },
    error::SpeechError,
};

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("markup pattern is valid"));

/// Replace every markup tag with a single space.
pub fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, " ").into_owned()
}

/// Languages the speech utility can read couplets in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Tamil,
    English,
}

impl Language {
    /// Map a caller-supplied tag. Anything other than `tamil` is English.
    pub fn from_tag(tag: &str) -> Self {
        if tag == "tamil" {
            Self::Tamil
        } else {
            Self::English
        }
    }

    /// Locale code understood by the synthesis backend.
    pub fn locale(self) -> &'static str {
        match self {
            Self::Tamil => "ta",
            Self::English => "en",
        }
    }
}

/// The JSON document printed by `kural-tts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechPayload {
    pub audio_data: Option<String>,
    pub text: String,
}

/// A backend that turns text into encoded audio bytes.
pub trait Synthesizer {
    fn synthesize(
        &self,
        text: &str,
        language: Language,
    ) -> Result<Vec<u8>, SpeechError>;
}

/// Synthesize `text` and package the result.
///
/// Failures are logged and reported as `audio_data: null`; the cleaned
/// text is returned either way.
pub fn text_to_speech(
    synth: &dyn Synthesizer,
    text: &str,
    tag: &str,
) -> SpeechPayload {
    let clean = strip_markup(text);
    let language = Language::from_tag(tag);

    let audio_data = match synth.synthesize(&clean, language) {
        Ok(bytes) => {
            debug!(bytes = bytes.len(), locale = language.locale(), "synthesized");
            Some(base64::engine::general_purpose::STANDARD.encode(&bytes))
        }
        Err(e) => {
            error!("Error in text_to_speech: {e}");
            None
        }
    };

    SpeechPayload {
        audio_data,
        text: clean,
    }
}

/// Google Translate's public TTS endpoint, one request per text chunk.
pub struct GoogleTts {
    agent: ureq::Agent,
    endpoint: String,
}

impl Default for GoogleTts {
    fn default() -> Self {
        Self::new(TTS_ENDPOINT)
    }
}

impl GoogleTts {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(TTS_CONNECT_TIMEOUT)
            .timeout_read(TTS_READ_TIMEOUT)
            .build();
        Self {
            agent,
            endpoint: endpoint.into(),
        }
    }

    fn fetch(
        &self,
        chunk: &str,
        index: usize,
        total: usize,
        language: Language,
    ) -> Result<Vec<u8>, SpeechError> {
        let resp = self
            .agent
            .get(&self.endpoint)
            .set("User-Agent", "Mozilla/5.0 (kuralsearch)")
            .query("ie", "UTF-8")
            .query("client", "tw-ob")
            .query("tl", language.locale())
            .query("ttsspeed", "1")
            .query("idx", &index.to_string())
            .query("total", &total.to_string())
            .query("textlen", &chunk.chars().count().to_string())
            .query("q", chunk)
            .call()
            .map_err(|e| SpeechError::Http(e.to_string()))?;

        let mut audio = Vec::new();
        resp.into_reader().read_to_end(&mut audio)?;
        Ok(audio)
    }
}

impl Synthesizer for GoogleTts {
    fn synthesize(
        &self,
        text: &str,
        language: Language,
    ) -> Result<Vec<u8>, SpeechError> {
        let chunks = split_chunks(text, TTS_MAX_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let mut audio = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            audio.extend(self.fetch(chunk, i, chunks.len(), language)?);
        }
        Ok(audio)
    }
}

/// Split `text` into whitespace-normalized chunks of at most `max_chars`
/// characters, breaking between words where possible.
pub fn split_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_len > 0 && current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
            continue;
        }

        if current_len > 0 {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len <= max_chars {
            current.push_str(word);
            current_len = word_len;
        } else {
            // Hard-split words longer than a whole chunk.
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
        }
    }

    if current_len > 0 {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Records what it was asked to say and answers with fixed bytes.
    struct FakeSynth {
        reply: Option<Vec<u8>>,
        calls: RefCell<Vec<(String, Language)>>,
    }

    impl FakeSynth {
        fn answering(reply: Option<&[u8]>) -> Self {
            Self {
                reply: reply.map(<[u8]>::to_vec),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Synthesizer for FakeSynth {
        fn synthesize(
            &self,
            text: &str,
            language: Language,
        ) -> Result<Vec<u8>, SpeechError> {
            self.calls.borrow_mut().push((text.to_string(), language));
            self.reply
                .clone()
                .ok_or_else(|| SpeechError::Http("503 unavailable".into()))
        }
    }

    #[test]
    fn tags_become_spaces() {
        assert_eq!(strip_markup("Hello<br>World"), "Hello World");
        assert_eq!(strip_markup("a<br/>b<i>c</i>"), "a b c ");
        assert_eq!(strip_markup("no markup"), "no markup");
    }

    #[test]
    fn markup_match_is_non_greedy() {
        assert_eq!(strip_markup("<b>x</b> y <b>z</b>"), " x  y  z ");
    }

    #[test]
    fn language_tags() {
        assert_eq!(Language::from_tag("tamil"), Language::Tamil);
        assert_eq!(Language::from_tag("english"), Language::English);
        assert_eq!(Language::from_tag("french"), Language::English);
        assert_eq!(Language::Tamil.locale(), "ta");
        assert_eq!(Language::English.locale(), "en");
    }

    #[test]
    fn successful_synthesis_is_base64() {
        let synth = FakeSynth::answering(Some(b"ID3mp3"));
        let payload = text_to_speech(&synth, "Hello<br>World", "english");

        assert_eq!(payload.text, "Hello World");
        assert_eq!(payload.audio_data.as_deref(), Some("SUQzbXAz"));
        assert_eq!(
            synth.calls.borrow().as_slice(),
            &[("Hello World".to_string(), Language::English)]
        );
    }

    #[test]
    fn failed_synthesis_yields_null_audio() {
        let synth = FakeSynth::answering(None);
        let payload = text_to_speech(&synth, "அறம்<br>பொருள்", "tamil");

        assert_eq!(payload.audio_data, None);
        assert_eq!(payload.text, "அறம் பொருள்");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({ "audio_data": null, "text": "அறம் பொருள்" })
        );
    }

    #[test]
    fn chunks_respect_limit_and_word_boundaries() {
        let chunks = split_chunks("one two three four", 9);
        assert_eq!(chunks, vec!["one two", "three", "four"]);
    }

    #[test]
    fn chunks_collapse_whitespace() {
        let chunks = split_chunks("  Hello \n  World  ", 100);
        assert_eq!(chunks, vec!["Hello World"]);
    }

    #[test]
    fn long_words_are_hard_split() {
        let chunks = split_chunks("abcdefgh ij", 3);
        assert_eq!(chunks, vec!["abc", "def", "gh", "ij"]);
    }

    #[test]
    fn chunk_length_counts_characters() {
        // Tamil letters are multi-byte; the limit is in characters.
        let chunks = split_chunks("அறம் அறம்", 9);
        assert_eq!(chunks, vec!["அறம் அறம்"]);
    }

    #[test]
    fn blank_text_has_no_chunks() {
        assert!(split_chunks(" \t ", 100).is_empty());
    }

    #[test]
    fn google_backend_rejects_empty_text() {
        let synth = GoogleTts::new("http://127.0.0.1:9/unused");
        let err = synth.synthesize("   ", Language::English).unwrap_err();
        assert!(matches!(err, SpeechError::EmptyText));
    }
}
