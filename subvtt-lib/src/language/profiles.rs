//! Static language profiles
//!
//! Built once on first use and shared read-only by every detection call.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Lexical profile of one supported language
#[derive(Debug)]
pub struct LanguageProfile {
    /// ISO 639-1 code
    pub code: &'static str,
    /// English display name
    pub name: &'static str,
    /// Patterns counted against the original-case text
    pub patterns: Vec<Regex>,
    /// Lowercase high-frequency words
    pub common_words: HashSet<&'static str>,
    /// Characters distinctive enough to earn a flat bonus
    pub distinctive_chars: Option<Regex>,
}

struct ProfileSource {
    code: &'static str,
    name: &'static str,
    patterns: &'static [&'static str],
    common_words: &'static [&'static str],
    distinctive_chars: Option<&'static str>,
}

const SOURCES: &[ProfileSource] = &[
    ProfileSource {
        code: "en",
        name: "English",
        patterns: &[
            r"(?i)\b(the|and|is|are|was|were|have|has|will|would)\b",
            r"(?i)\b(this|that|with|from|what|which|there|their)\b",
            r"(?i)\b\w+ing\b",
        ],
        common_words: &[
            "the", "be", "to", "of", "and", "in", "that", "have", "it", "for", "not", "on",
            "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they",
            "we", "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there",
            "their", "what", "so", "up", "out", "if", "about", "who", "get", "which", "go", "me",
            "is", "are", "was", "were", "over", "just", "know", "can", "your",
        ],
        distinctive_chars: None,
    },
    ProfileSource {
        code: "de",
        name: "German",
        patterns: &[
            r"(?i)\b(der|die|das|und|ist|nicht|ein|eine|zu|mit)\b",
            r"(?i)\b(ich|du|wir|sie|auch|aber|noch|schon)\b",
            r"(?i)\b\w+(ung|heit|keit|lich)\b",
        ],
        common_words: &[
            "der", "die", "das", "und", "ist", "nicht", "ein", "eine", "zu", "mit", "ich", "du",
            "er", "sie", "es", "wir", "ihr", "sind", "war", "auf", "für", "von", "den", "dem",
            "des", "sich", "auch", "aber", "noch", "schon", "wie", "was", "wenn", "hier", "dann",
            "doch", "nur", "mal", "ja", "nein", "habe", "hat", "kann", "mein", "dein",
        ],
        distinctive_chars: Some(r"[äöüßÄÖÜ]"),
    },
    ProfileSource {
        code: "es",
        name: "Spanish",
        patterns: &[
            r"(?i)\b(el|la|los|las|que|de|en|por|para|con)\b",
            r"(?i)\b(es|está|son|muy|pero|cuando|porque)\b",
            r"[¿¡]",
        ],
        common_words: &[
            "el", "la", "los", "las", "de", "que", "en", "un", "una", "por", "para", "con", "no",
            "es", "se", "lo", "le", "su", "al", "del", "como", "pero", "más", "muy", "está",
            "estoy", "yo", "tú", "usted", "qué", "sí", "bien", "todo", "porque", "cuando",
            "hola", "gracias",
        ],
        distinctive_chars: Some(r"[ñÑáéíóúÁÉÍÓÚ¿¡]"),
    },
    ProfileSource {
        code: "fr",
        name: "French",
        patterns: &[
            r"(?i)\b(le|la|les|de|des|du|et|est|une?|dans)\b",
            r"(?i)\b(je|tu|il|nous|vous|ils|ce|cette|pas|qui)\b",
            r"(?i)\b[cdjlmnst]'\w+",
        ],
        common_words: &[
            "le", "la", "les", "de", "des", "du", "et", "est", "un", "une", "dans", "je", "tu",
            "il", "elle", "nous", "vous", "ils", "ce", "cette", "pas", "qui", "que", "ne", "en",
            "pour", "avec", "sur", "mais", "où", "très", "bien", "oui", "non", "merci", "suis",
            "sont", "au", "aux",
        ],
        distinctive_chars: Some(r"[àâçèêëîïôùûÿœæÀÂÇÈÊËÎÏÔÙÛŸŒÆ]"),
    },
    ProfileSource {
        code: "it",
        name: "Italian",
        patterns: &[
            r"(?i)\b(il|lo|gli|di|che|è|non|per|una?|sono)\b",
            r"(?i)\b(questo|quello|anche|perché|come|molto|sempre)\b",
            r"(?i)\b\w+(zione|mente|etto|ella)\b",
        ],
        common_words: &[
            "il", "lo", "la", "gli", "le", "di", "che", "è", "non", "per", "un", "una", "sono",
            "ma", "come", "anche", "questo", "quello", "mi", "ti", "si", "ci", "ho", "hai", "ha",
            "del", "della", "nel", "con", "se", "più", "molto", "tutto", "bene", "grazie",
            "perché", "sempre",
        ],
        distinctive_chars: None,
    },
    ProfileSource {
        code: "pt",
        name: "Portuguese",
        patterns: &[
            r"(?i)\b(o|os|as|do|da|dos|das|em|não|que|um|uma)\b",
            r"(?i)\b(você|está|isso|muito|também|obrigado|então)\b",
            r"[ãõç]",
        ],
        common_words: &[
            "o", "os", "as", "de", "do", "da", "dos", "das", "em", "um", "uma", "que", "não",
            "é", "para", "com", "se", "por", "mais", "mas", "eu", "você", "ele", "ela", "isso",
            "está", "muito", "também", "bem", "sim", "obrigado", "então", "na", "no",
        ],
        distinctive_chars: None,
    },
    ProfileSource {
        code: "ru",
        name: "Russian",
        patterns: &[
            r"[а-яА-ЯёЁ]+",
            r"(?i)\b(и|в|не|на|что|я|с|он|это|как)\b",
        ],
        common_words: &[
            "и", "в", "не", "на", "что", "я", "с", "он", "это", "как", "но", "она", "они", "мы",
            "вы", "так", "его", "все", "был", "да", "нет", "ты", "мне", "меня", "здесь",
        ],
        distinctive_chars: None,
    },
    ProfileSource {
        code: "ja",
        name: "Japanese",
        patterns: &[
            r"[\p{Hiragana}\p{Katakana}]",
            r"(は|が|を|に|で|の|です|ます)",
        ],
        common_words: &[
            "これ", "それ", "あれ", "です", "ます", "ない", "する", "いる", "ある", "この",
            "その", "はい", "いいえ",
        ],
        distinctive_chars: None,
    },
    ProfileSource {
        code: "zh",
        name: "Chinese",
        patterns: &[r"\p{Han}", r"[的是了在不有我他这们]"],
        common_words: &[
            "我们", "你们", "他们", "什么", "没有", "这个", "那个", "就是", "可以", "知道",
            "谢谢",
        ],
        distinctive_chars: None,
    },
    ProfileSource {
        code: "ko",
        name: "Korean",
        patterns: &[r"\p{Hangul}", r"(은|는|이|가|을|를|에서|입니다)"],
        common_words: &[
            "그리고", "하지만", "그래서", "이것", "저것", "있다", "없다", "합니다", "입니다",
            "감사합니다", "안녕하세요",
        ],
        distinctive_chars: None,
    },
];

fn compile(source: &ProfileSource) -> LanguageProfile {
    LanguageProfile {
        code: source.code,
        name: source.name,
        patterns: source
            .patterns
            .iter()
            .map(|p| Regex::new(p).unwrap())
            .collect(),
        common_words: source.common_words.iter().copied().collect(),
        distinctive_chars: source.distinctive_chars.map(|p| Regex::new(p).unwrap()),
    }
}

/// All supported language profiles, in declaration order
pub fn all_profiles() -> &'static [LanguageProfile] {
    static PROFILES: OnceLock<Vec<LanguageProfile>> = OnceLock::new();
    PROFILES.get_or_init(|| SOURCES.iter().map(compile).collect())
}
