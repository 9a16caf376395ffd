/*!
 * Tests for language code utilities
 */

use locqa::language_utils::{
    LanguageCodeType, get_language_name, language_codes_match, normalize_to_part1_or_part3,
    primary_subtag, validate_language_code,
};

#[test]
fn test_primarySubtag_shouldStripRegionAndCase() {
    assert_eq!(primary_subtag("pt_BR"), "pt");
    assert_eq!(primary_subtag("zh-Hant-TW"), "zh");
    assert_eq!(primary_subtag(" EN "), "en");
}

#[test]
fn test_validateLanguageCode_withUnknownCodes_shouldFail() {
    assert!(validate_language_code("").is_err());
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("english").is_err());
}

#[test]
fn test_validateLanguageCode_withBibliographicCode_shouldReportPart2B() {
    assert_eq!(validate_language_code("fre").unwrap(), LanguageCodeType::Part2B);
    assert_eq!(validate_language_code("fra").unwrap(), LanguageCodeType::Part2T);
}

#[test]
fn test_normalize_shouldPreferTwoLetterCodes() {
    assert_eq!(normalize_to_part1_or_part3("ger").unwrap(), "de");
    assert_eq!(normalize_to_part1_or_part3("es-MX").unwrap(), "es");
    // Filipino has no ISO 639-1 code
    assert_eq!(normalize_to_part1_or_part3("fil").unwrap(), "fil");
}

#[test]
fn test_languageCodesMatch_shouldIgnoreRegionAndCodeStyle() {
    assert!(language_codes_match("de", "deu"));
    assert!(language_codes_match("ger", "de-AT"));
    assert!(language_codes_match("pt_BR", "pt-PT"));
    assert!(!language_codes_match("de", "nl"));
    assert!(!language_codes_match("de", "invalid"));
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("fr-CA").unwrap(), "French");
    assert_eq!(get_language_name("jpn").unwrap(), "Japanese");
    assert!(get_language_name("zz").is_err());
}
