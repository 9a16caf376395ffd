/*!
 * Tests for translation file formats
 */

use anyhow::Result;
use locqa::errors::FormatError;
use locqa::formats::{self, FileFormat, TranslationFile, TranslationUnit};

use crate::common;

#[test]
fn test_parse_csvSample_shouldReadAllRows() -> Result<()> {
    let file = formats::parse(common::SAMPLE_CSV, FileFormat::Csv)?;

    assert_eq!(file.units.len(), 4);
    assert_eq!(file.translated_count(), 3);
    assert_eq!(file.find("menu.greeting").and_then(|u| u.note.as_deref()), Some("home screen"));
    Ok(())
}

#[test]
fn test_parse_withByteOrderMark_shouldIgnoreIt() -> Result<()> {
    let content = format!("\u{feff}{}", common::SAMPLE_CSV);
    let file = formats::parse(&content, FileFormat::Csv)?;
    assert_eq!(file.units[0].key, "menu.open");
    Ok(())
}

#[test]
fn test_parse_xliffSample_shouldUnescapeText() -> Result<()> {
    let file = formats::parse(common::SAMPLE_XLIFF, FileFormat::Xliff)?;

    assert_eq!(file.target_language.as_deref(), Some("de"));
    assert_eq!(
        file.find("cart.items").map(|u| u.source.as_str()),
        Some("You have 3 items in your <b>cart</b>.")
    );
    Ok(())
}

#[test]
fn test_pair_yamlLocales_shouldJoinByKey() -> Result<()> {
    let source = formats::parse(common::SOURCE_YAML, FileFormat::Yaml)?;
    let target = formats::parse(common::TARGET_YAML, FileFormat::Yaml)?;

    let paired = TranslationFile::pair(source, target);

    assert_eq!(paired.source_language.as_deref(), Some("en"));
    assert_eq!(paired.target_language.as_deref(), Some("es"));
    assert_eq!(paired.units.len(), 3);
    assert_eq!(paired.find("app.tasks").and_then(|u| u.target.as_deref()), Some("Quedan %d tareas"));
    assert!(!paired.find("app.delete").map(TranslationUnit::is_translated).unwrap_or(true));
    Ok(())
}

#[test]
fn test_saveThenLoad_shouldKeepUnitsForEveryFormat() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let units = vec![
        TranslationUnit::new("a", "Hello, \"world\"").with_target("Hallo, „Welt“"),
        TranslationUnit::new("b", "Line 1\nLine 2"),
    ];

    for name in ["out.csv", "out.tsv", "out.xlf", "out.yaml"] {
        let path = temp_dir.path().join(name);
        let format = FileFormat::from_path(&path).expect("known extension");
        formats::save(&path, &TranslationFile::new(format, units.clone()))?;

        let loaded = formats::load(&path)?;
        assert_eq!(loaded.format, format);
        assert_eq!(loaded.units.len(), 2, "{}", name);
        assert_eq!(loaded.units[0].target.as_deref(), Some("Hallo, „Welt“"), "{}", name);
        assert_eq!(loaded.units[1].source, "Line 1\nLine 2", "{}", name);
        assert_eq!(loaded.units[1].target, None, "{}", name);
    }
    Ok(())
}

#[test]
fn test_load_withUnknownExtension_shouldBeUnsupported() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "strings.po", "msgid \"\"")?;

    let err = formats::load(&path).unwrap_err();
    assert!(matches!(err, FormatError::UnsupportedFormat(_)));
    Ok(())
}

#[test]
fn test_load_withNonXliffXml_shouldReportParseError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "res/values/strings.xml",
        "<resources><string name=\"app_name\">Notes</string></resources>",
    )?;

    let err = formats::load(&path).unwrap_err();
    assert!(matches!(err, FormatError::Parse { format: "XLIFF", .. }));
    Ok(())
}
