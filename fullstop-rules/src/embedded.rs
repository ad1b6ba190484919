//! Embedded language tables and code resolution

macro_rules! embed_language_config {
    ($code:expr, $file:expr) => {
        ($code, include_str!(concat!("../configs/languages/", $file)))
    };
}

/// `(code, toml)` for every built-in language, sorted by code
pub(crate) static EMBEDDED_CONFIGS: [(&str, &str); 32] = [
    embed_language_config!("am", "amharic.toml"),
    embed_language_config!("ar", "arabic.toml"),
    embed_language_config!("bg", "bulgarian.toml"),
    embed_language_config!("bn", "bengali.toml"),
    embed_language_config!("ca", "catalan.toml"),
    embed_language_config!("da", "danish.toml"),
    embed_language_config!("de", "german.toml"),
    embed_language_config!("el", "greek.toml"),
    embed_language_config!("en", "english.toml"),
    embed_language_config!("es", "spanish.toml"),
    embed_language_config!("fi", "finnish.toml"),
    embed_language_config!("fr", "french.toml"),
    embed_language_config!("gu", "gujarati.toml"),
    embed_language_config!("hi", "hindi.toml"),
    embed_language_config!("hy", "armenian.toml"),
    embed_language_config!("it", "italian.toml"),
    embed_language_config!("ja", "japanese.toml"),
    embed_language_config!("kk", "kazakh.toml"),
    embed_language_config!("kn", "kannada.toml"),
    embed_language_config!("ml", "malayalam.toml"),
    embed_language_config!("mr", "marathi.toml"),
    embed_language_config!("my", "burmese.toml"),
    embed_language_config!("nl", "dutch.toml"),
    embed_language_config!("or", "odia.toml"),
    embed_language_config!("pa", "punjabi.toml"),
    embed_language_config!("pl", "polish.toml"),
    embed_language_config!("pt", "portuguese.toml"),
    embed_language_config!("ru", "russian.toml"),
    embed_language_config!("sk", "slovak.toml"),
    embed_language_config!("ta", "tamil.toml"),
    embed_language_config!("te", "telugu.toml"),
    embed_language_config!("zh", "chinese.toml"),
];

/// Related languages whose rules are close enough to stand in
const RELATED_LANGUAGES: &[(&str, &str)] = &[
    ("as", "bn"),
    ("mai", "hi"),
    ("nb", "da"),
    ("ne", "hi"),
    ("nn", "da"),
    ("no", "da"),
    ("sa", "hi"),
    ("ur", "ar"),
    ("yue", "zh"),
    ("zh-hans", "zh"),
    ("zh-hant", "zh"),
];

/// Embedded TOML for an exact, normalized code
pub(crate) fn embedded_config(code: &str) -> Option<&'static str> {
    EMBEDDED_CONFIGS
        .iter()
        .find(|(embedded, _)| *embedded == code)
        .map(|(_, toml)| *toml)
}

/// Trim, lowercase and use `-` as subtag separator (`pa_IN` -> `pa-in`)
pub fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase().replace('_', "-")
}

/// Codes to try, in order, for a normalized code: the code itself, its
/// primary subtag, then the related-language table for either.
pub fn resolution_chain(code: &str) -> Vec<String> {
    let mut chain = vec![code.to_string()];
    if let Some((primary, _)) = code.split_once('-') {
        if !primary.is_empty() {
            chain.push(primary.to_string());
        }
    }

    for index in 0..chain.len() {
        if let Some((_, related)) = RELATED_LANGUAGES
            .iter()
            .find(|(from, _)| *from == chain[index])
        {
            chain.push(related.to_string());
        }
    }

    chain.dedup();
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_configs_sorted_and_unique() {
        let codes: Vec<_> = EMBEDDED_CONFIGS.iter().map(|(code, _)| *code).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" EN "), "en");
        assert_eq!(normalize_code("pa_IN"), "pa-in");
        assert_eq!(normalize_code("zh-Hant"), "zh-hant");
    }

    #[test]
    fn test_resolution_chain() {
        assert_eq!(resolution_chain("en"), vec!["en"]);
        assert_eq!(resolution_chain("pa-in"), vec!["pa-in", "pa"]);
        assert_eq!(resolution_chain("ur"), vec!["ur", "ar"]);
        assert_eq!(resolution_chain("zh-hant"), vec!["zh-hant", "zh"]);
        assert_eq!(resolution_chain("ne-np"), vec!["ne-np", "ne", "hi"]);
    }
}
