//! Heuristic language detection
//!
//! Scores text against a fixed set of lexical profiles:
//! - Pattern hits, normalized by word count
//! - Share of tokens found in the profile's common-word list
//! - A flat bonus for distinctive characters (umlauts, ñ, French accents)
//!
//! Accepts plain text or a full SRT document; SRT input is reduced to its
//! cue text first.

pub mod profiles;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::srt::extract_srt_text;
use profiles::{all_profiles, LanguageProfile};

/// Minimum score for a language to count as detected
pub const MIN_CONFIDENCE: f64 = 0.1;

/// Minimum score for a language to appear in the suggestions
pub const MIN_SUGGESTION_CONFIDENCE: f64 = 0.05;

/// Maximum number of suggestions returned
pub const MAX_SUGGESTIONS: usize = 3;

const PATTERN_SCALE: f64 = 2.0;
const COMMON_WORD_SCALE: f64 = 3.0;
const PATTERN_WEIGHT: f64 = 0.4;
const COMMON_WORD_WEIGHT: f64 = 0.6;
const DISTINCTIVE_CHAR_BONUS: f64 = 0.3;

/// A scored language candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageMatch {
    pub code: String,
    pub name: String,
    pub confidence: f64,
}

/// Outcome of a detection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub detected: bool,
    pub language: Option<LanguageMatch>,
    pub confidence: f64,
    /// At most three candidates, highest confidence first
    pub suggestions: Vec<LanguageMatch>,
}

impl DetectionResult {
    fn undetected() -> Self {
        Self {
            detected: false,
            language: None,
            confidence: 0.0,
            suggestions: Vec::new(),
        }
    }
}

/// Code and display name of a supported language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub code: String,
    pub name: String,
}

/// Lowercase word tokens longer than one character
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

fn score_profile(profile: &LanguageProfile, text: &str, words: &[String]) -> f64 {
    let denominator = words.len().max(5) as f64;

    let pattern_score = if profile.patterns.is_empty() {
        0.0
    } else {
        let total: f64 = profile
            .patterns
            .iter()
            .map(|re| (re.find_iter(text).count() as f64 / denominator).min(1.0))
            .sum();
        total / profile.patterns.len() as f64 * PATTERN_SCALE
    };

    let common_word_score = if words.is_empty() {
        0.0
    } else {
        let hits = words
            .iter()
            .filter(|word| profile.common_words.contains(word.as_str()))
            .count();
        hits as f64 / words.len() as f64 * COMMON_WORD_SCALE
    };

    let mut score = pattern_score * PATTERN_WEIGHT + common_word_score * COMMON_WORD_WEIGHT;
    if profile
        .distinctive_chars
        .as_ref()
        .is_some_and(|re| re.is_match(text))
    {
        score += DISTINCTIVE_CHAR_BONUS;
    }

    score.clamp(0.0, 1.0)
}

fn to_match(profile: &LanguageProfile, confidence: f64) -> LanguageMatch {
    LanguageMatch {
        code: profile.code.to_string(),
        name: profile.name.to_string(),
        confidence,
    }
}

/// Detect the language of subtitle text or a full SRT document.
pub fn detect_language(content: &str) -> DetectionResult {
    let text = if regex!(r"[0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}\s*-->").is_match(content) {
        extract_srt_text(content)
    } else {
        content.to_string()
    };

    if text.trim().is_empty() {
        return DetectionResult::undetected();
    }

    let words = tokenize(&text);
    let mut scores: Vec<(&LanguageProfile, f64)> = all_profiles()
        .iter()
        .map(|profile| (profile, score_profile(profile, &text, &words)))
        .collect();
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let suggestions: Vec<LanguageMatch> = scores
        .iter()
        .filter(|(_, score)| *score >= MIN_SUGGESTION_CONFIDENCE)
        .take(MAX_SUGGESTIONS)
        .map(|(profile, score)| to_match(profile, *score))
        .collect();

    let (top, confidence) = scores[0];
    let detected = confidence >= MIN_CONFIDENCE;

    tracing::debug!(
        top = top.code,
        confidence,
        words = words.len(),
        "language detection finished"
    );

    DetectionResult {
        detected,
        language: detected.then(|| to_match(top, confidence)),
        confidence,
        suggestions,
    }
}

/// All supported languages, sorted by display name
pub fn list_supported_languages() -> Vec<LanguageInfo> {
    let mut languages: Vec<LanguageInfo> = all_profiles()
        .iter()
        .map(|p| LanguageInfo {
            code: p.code.to_string(),
            name: p.name.to_string(),
        })
        .collect();
    languages.sort_by(|a, b| a.name.cmp(&b.name));
    languages
}

fn find_profile(code: &str) -> Option<&'static LanguageProfile> {
    if code.len() != 2 {
        return None;
    }
    all_profiles()
        .iter()
        .find(|p| p.code.eq_ignore_ascii_case(code))
}

/// Whether `code` is a supported two-letter language code (case-insensitive)
pub fn is_valid_language_code(code: &str) -> bool {
    find_profile(code).is_some()
}

/// Display name for a supported language code
pub fn language_name_for_code(code: &str) -> Option<&'static str> {
    find_profile(code).map(|p| p.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detected_code(text: &str) -> Option<String> {
        detect_language(text).language.map(|l| l.code)
    }

    #[test]
    fn test_detect_english() {
        let result = detect_language(
            "The quick brown fox jumps over the lazy dog. This is a test of the English language detection system.",
        );
        assert!(result.detected);
        assert_eq!(result.language.as_ref().unwrap().code, "en");
        assert!(result.confidence > 0.3);
    }

    #[test]
    fn test_detect_latin_script_languages() {
        assert_eq!(
            detected_code("Ich habe heute keine Zeit, aber wir können morgen zusammen ins Kino gehen. Das ist nicht schlecht.").as_deref(),
            Some("de")
        );
        assert_eq!(
            detected_code("¿Dónde está la estación de tren? Necesito llegar a la ciudad muy pronto porque tengo una reunión.").as_deref(),
            Some("es")
        );
        assert_eq!(
            detected_code("Je ne sais pas où est la gare, mais c'est très loin d'ici.").as_deref(),
            Some("fr")
        );
    }

    #[test]
    fn test_detect_non_latin_scripts() {
        assert_eq!(
            detected_code("Привет, как дела? Я очень рад тебя видеть, это был хороший день.").as_deref(),
            Some("ru")
        );
        assert_eq!(
            detected_code("これは日本語のテキストです。今日はとても良い天気ですね。").as_deref(),
            Some("ja")
        );
        assert_eq!(
            detected_code("我们今天去公园散步，天气非常好。").as_deref(),
            Some("zh")
        );
        assert_eq!(
            detected_code("안녕하세요 저는 학생입니다 감사합니다").as_deref(),
            Some("ko")
        );
    }

    #[test]
    fn test_detect_from_srt_source() {
        let srt = "1\n00:00:01,000 --> 00:00:03,000\nThe weather is nice today and we are going to the park.\n\n2\n00:00:04,000 --> 00:00:06,000\nThey were waiting for us at the gate.\n";
        let result = detect_language(srt);
        assert!(result.detected);
        assert_eq!(result.language.unwrap().code, "en");
    }

    #[test]
    fn test_detect_empty_input() {
        for text in ["", "   \n\t", "1\n00:00:01,000 --> 00:00:02,000\n"] {
            let result = detect_language(text);
            assert_eq!(result, DetectionResult::undetected());
        }
    }

    #[test]
    fn test_detect_nothing_recognizable() {
        let result = detect_language("12345 67890 42");
        assert!(!result.detected);
        assert!(result.language.is_none());
        assert!(result.confidence < MIN_CONFIDENCE);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_detection_invariants() {
        let samples = [
            "The quick brown fox",
            "Der Hund und die Katze",
            "le chat et le chien",
            "ok",
            "Hola, ¿qué tal? Muy bien, gracias.",
            "これはペンです",
            "xyz qrs",
        ];
        for sample in samples {
            let result = detect_language(sample);
            assert!(result.suggestions.len() <= MAX_SUGGESTIONS);
            assert!(result
                .suggestions
                .windows(2)
                .all(|pair| pair[0].confidence >= pair[1].confidence));
            assert!((0.0..=1.0).contains(&result.confidence));
            if result.detected {
                assert!(result.confidence >= MIN_CONFIDENCE);
                assert!(result.language.is_some());
            } else {
                assert!(result.confidence < MIN_CONFIDENCE);
                assert!(result.language.is_none());
            }
        }
    }

    #[test]
    fn test_list_supported_languages_sorted_by_name() {
        let languages = list_supported_languages();
        assert_eq!(languages.len(), 10);
        assert!(languages.windows(2).all(|pair| pair[0].name <= pair[1].name));
        assert_eq!(languages[0].name, "Chinese");
    }

    #[test]
    fn test_language_code_lookup() {
        assert!(is_valid_language_code("en"));
        assert!(is_valid_language_code("DE"));
        assert!(!is_valid_language_code("eng"));
        assert!(!is_valid_language_code("xx"));
        assert!(!is_valid_language_code(""));
        assert_eq!(language_name_for_code("Fr"), Some("French"));
        assert_eq!(language_name_for_code("nl"), None);
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("It's a Test, OK?"),
            vec!["it".to_string(), "test".to_string(), "ok".to_string()]
        );
    }
}
