//! End-to-end tests for the profile-level pipeline

use fullstop_core::{
    classify, reconstruct, scan, split_sentences, ContinuationRules, Decision, EnclosurePair,
    LanguageProfile, RejectReason,
};

fn english() -> LanguageProfile {
    LanguageProfile::builder("en")
        .name("English")
        .terminators(['.', '!', '?'])
        .abbreviations(["Dr", "Mr", "Mrs", "No", "etc", "e.g", "i.e", "U.S", "U.S.A", "vs"])
        .non_breaking_prefixes(["A", "B", "C", "J", "R"])
        .exclamation_words(["Yahoo!", "Jeopardy!"])
        .enclosures(vec![
            EnclosurePair::new('(', ')'),
            EnclosurePair::new('[', ']'),
            EnclosurePair::new('“', '”'),
            EnclosurePair::symmetric('"'),
        ])
        .absorb_closing_enclosures(true)
        .continuation(ContinuationRules::new().with_lowercase(true).with_digit(true))
        .build()
        .unwrap()
}

fn texts<'a>(profile: &LanguageProfile, text: &'a str) -> Vec<&'a str> {
    split_sentences(profile, text)
        .into_iter()
        .map(|s| s.text)
        .collect()
}

#[test]
fn test_abbreviation_does_not_split() {
    assert_eq!(
        texts(&english(), "Dr. Smith went home."),
        vec!["Dr. Smith went home."]
    );
}

#[test]
fn test_capitalized_abbreviation_does_not_hide_plain_word() {
    let profile = english();
    assert_eq!(
        texts(&profile, "The answer was no. She left."),
        vec!["The answer was no.", "She left."]
    );
    assert_eq!(
        texts(&profile, "See No. 5 for details. Then stop."),
        vec!["See No. 5 for details.", "Then stop."]
    );
}

#[test]
fn test_deeply_nested_brackets() {
    let depth = 70_000;
    let text = format!("Start {}x. y{} end.", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(split_sentences(&english(), &text).len(), 1);
}

#[test]
fn test_decimal_does_not_split() {
    assert_eq!(
        texts(&english(), "Pi is 3.14 approximately."),
        vec!["Pi is 3.14 approximately."]
    );
}

#[test]
fn test_dotted_abbreviation_and_domain() {
    let profile = english();
    assert_eq!(
        texts(&profile, "She moved to the U.S. in May. Write to info@example.com today."),
        vec!["She moved to the U.S. in May.", "Write to info@example.com today."]
    );
}

#[test]
fn test_initials_stay_attached() {
    assert_eq!(
        texts(&english(), "J. R. R. Tolkien wrote it. Then he slept."),
        vec!["J. R. R. Tolkien wrote it.", "Then he slept."]
    );
}

#[test]
fn test_exclamation_word() {
    assert_eq!(
        texts(&english(), "He works at Yahoo! Search team. They are big."),
        vec!["He works at Yahoo! Search team.", "They are big."]
    );
}

#[test]
fn test_quoted_sentence_keeps_closing_quote() {
    let profile = english();
    let text = "He said “Stop. Now.” Then he left.";
    assert_eq!(texts(&profile, text), vec!["He said “Stop. Now.”", "Then he left."]);
}

#[test]
fn test_parenthetical_sentences_are_not_split() {
    let profile = english();
    let text = "He teaches (he worked. As an engineer.) at school. Fine.";
    assert_eq!(
        texts(&profile, text),
        vec!["He teaches (he worked. As an engineer.) at school.", "Fine."]
    );
}

#[test]
fn test_stray_quote_does_not_swallow_boundaries() {
    let profile = english();
    let text = "He said \"hello. Then left. Then came back.";
    assert_eq!(texts(&profile, text).len(), 3);
}

#[test]
fn test_citations_stay_with_sentence() {
    let profile = english();
    let text = "It was adopted at large.[7][8] This was a change.";
    assert_eq!(
        texts(&profile, text),
        vec!["It was adopted at large.[7][8]", "This was a change."]
    );
}

#[test]
fn test_punjabi_danda() {
    let profile = LanguageProfile::builder("pa")
        .terminators(['।', '.', '?', '!'])
        .unspaced_terminators(['।'])
        .build()
        .unwrap();
    let text = "ਸਾਊਥ ਅਫ਼ਰੀਕਾ ਵਿੱਚ ਹੋਇਆ ਸੀ। ਉਸ ਦੇ ਪਿਤਾ ਦਾ ਨਾਂ ਅਲਬਰਟ ਸੀ।";
    let sentences = texts(&profile, text);

    assert_eq!(sentences.len(), 2);
    assert!(sentences.iter().all(|s| s.ends_with('।')));
}

#[test]
fn test_chinese_without_spaces() {
    let profile = LanguageProfile::builder("zh")
        .terminators(['。', '！', '？', '.', '!', '?'])
        .unspaced_terminators(['。', '！', '？'])
        .enclosures(vec![EnclosurePair::new('「', '」')])
        .absorb_closing_enclosures(true)
        .build()
        .unwrap();
    let text = "今天天气很好。我们去公园吧！他说「好。」然后走了。";
    assert_eq!(
        texts(&profile, text),
        vec!["今天天气很好。", "我们去公园吧！", "他说「好。」", "然后走了。"]
    );
}

#[test]
fn test_german_ordinal_before_month() {
    let profile = LanguageProfile::builder("de")
        .terminators(['.', '!', '?'])
        .continuation(
            ContinuationRules::new()
                .with_lowercase(true)
                .with_digit(true)
                .with_words(["Januar", "Februar", "März"]),
        )
        .build()
        .unwrap();
    let text = "Er wurde am 13. Februar 1879 geboren. Danach zog er um.";
    assert_eq!(
        texts(&profile, text),
        vec!["Er wurde am 13. Februar 1879 geboren.", "Danach zog er um."]
    );
}

#[test]
fn test_reject_reasons_are_observable() {
    let profile = english();
    let text = "Dr. Who? Yes. Pi is 3.5 points";
    let decisions: Vec<_> = scan(text, &profile)
        .map(|candidate| classify(&candidate, &profile))
        .collect();

    assert_eq!(
        decisions,
        vec![
            Decision::Reject(RejectReason::Abbreviation),
            Decision::Accept,
            Decision::Accept,
            Decision::Reject(RejectReason::DecimalNumber),
        ]
    );
}

#[test]
fn test_reconstruction_with_irregular_whitespace() {
    let profile = english();
    let text = "  One.   Two!\n\n\tThree?  \n";
    let sentences = split_sentences(&profile, text);

    assert_eq!(
        sentences.iter().map(|s| s.text).collect::<Vec<_>>(),
        vec!["One.", "Two!", "Three?"]
    );
    assert_eq!(reconstruct(text, &sentences), text);
}

#[test]
fn test_no_terminator_single_sentence() {
    assert_eq!(
        texts(&english(), "no terminator at all"),
        vec!["no terminator at all"]
    );
}

#[test]
fn test_whitespace_only_input() {
    assert!(split_sentences(&english(), " \n\t ").is_empty());
}
