/*!
 * XLIFF 1.2 reader and writer.
 *
 * Reads `<trans-unit>` elements with their `<source>`, `<target>` and `<note>`
 * children. Languages come from the `<file>` element attributes. Inline
 * elements inside source/target (`<g>`, `<x/>`, HTML tags) are kept as
 * literal tag text so markup checks can compare them.
 */

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::{FileFormat, TranslationFile, TranslationUnit};
use crate::errors::FormatError;

const FORMAT: &str = "XLIFF";

/// Which child of a trans-unit is currently being read
#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Source,
    Target,
    Note,
}

#[derive(Debug, Default)]
struct UnitBuilder {
    key: String,
    source: String,
    target: Option<String>,
    note: Option<String>,
    line: usize,
}

impl UnitBuilder {
    fn push_text(&mut self, field: Field, text: &str) {
        match field {
            Field::Source => self.source.push_str(text),
            Field::Target => self.target.get_or_insert_with(String::new).push_str(text),
            Field::Note => self.note.get_or_insert_with(String::new).push_str(text),
        }
    }

    fn build(self) -> TranslationUnit {
        TranslationUnit {
            key: self.key,
            source: self.source,
            target: self.target.filter(|t| !t.is_empty()),
            note: self.note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
            line: Some(self.line),
        }
    }
}

/// Byte offsets of line starts, for mapping reader positions to line numbers
fn line_starts_of(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    starts.extend(
        text.bytes()
            .enumerate()
            .filter(|(_, b)| *b == b'\n')
            .map(|(i, _)| i + 1),
    );
    starts
}

fn byte_pos_to_line(pos: usize, starts: &[usize]) -> usize {
    starts.partition_point(|&s| s <= pos).max(1)
}

fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, FormatError> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| FormatError::parse(FORMAT, e))?;
        if attr.key.local_name().as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|e| FormatError::parse(FORMAT, e))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn field_for(local_name: &[u8]) -> Option<Field> {
    match local_name {
        b"source" => Some(Field::Source),
        b"target" => Some(Field::Target),
        b"note" => Some(Field::Note),
        _ => None,
    }
}

fn check_root(local_name: &[u8]) -> Result<(), FormatError> {
    if local_name == b"xliff" {
        return Ok(());
    }
    Err(FormatError::parse(
        FORMAT,
        format!(
            "root element is <{}>, expected <xliff>",
            String::from_utf8_lossy(local_name)
        ),
    ))
}

/// Parse an XLIFF 1.2 document
pub fn parse(content: &str) -> Result<TranslationFile, FormatError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(false);

    let line_starts = line_starts_of(content);
    let mut file = TranslationFile::new(FileFormat::Xliff, Vec::new());

    let mut current: Option<UnitBuilder> = None;
    let mut field: Option<Field> = None;
    // nesting depth of inline elements inside the current field
    let mut inline_depth = 0usize;
    // nesting depth of trans-unit children that are not fields (alt-trans, context-group, ...)
    let mut skip_depth = 0usize;
    let mut saw_root = false;

    loop {
        let position = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                if !saw_root {
                    check_root(name.as_ref())?;
                    saw_root = true;
                }
                if let (Some(unit), Some(active)) = (current.as_mut(), field) {
                    inline_depth += 1;
                    unit.push_text(active, &format!("<{}>", String::from_utf8_lossy(&e)));
                    continue;
                }
                match name.as_ref() {
                    b"file" => {
                        if let Some(lang) = attribute(&e, b"source-language")? {
                            file.source_language = Some(lang);
                        }
                        if let Some(lang) = attribute(&e, b"target-language")? {
                            file.target_language = Some(lang);
                        }
                    }
                    b"trans-unit" => {
                        let key = attribute(&e, b"id")?
                            .or(attribute(&e, b"resname")?)
                            .ok_or_else(|| FormatError::parse(FORMAT, "trans-unit without id"))?;
                        current = Some(UnitBuilder {
                            key,
                            line: byte_pos_to_line(position, &line_starts),
                            ..Default::default()
                        });
                    }
                    other => {
                        if current.is_none() {
                            continue;
                        }
                        if skip_depth > 0 {
                            skip_depth += 1;
                            continue;
                        }
                        field = field_for(other);
                        match field {
                            Some(Field::Target) => {
                                if let Some(unit) = current.as_mut() {
                                    unit.target.get_or_insert_with(String::new);
                                }
                            }
                            Some(_) => {}
                            None => skip_depth = 1,
                        }
                    }
                }
            }
            Ok(Event::Empty(e)) => {
                if !saw_root {
                    check_root(e.local_name().as_ref())?;
                    saw_root = true;
                }
                if let (Some(unit), Some(active)) = (current.as_mut(), field) {
                    unit.push_text(active, &format!("<{}/>", String::from_utf8_lossy(&e)));
                }
            }
            Ok(Event::End(e)) => {
                if let (Some(unit), Some(active)) = (current.as_mut(), field) {
                    if inline_depth > 0 {
                        inline_depth -= 1;
                        unit.push_text(
                            active,
                            &format!("</{}>", String::from_utf8_lossy(e.name().as_ref())),
                        );
                        continue;
                    }
                }
                if skip_depth > 0 {
                    skip_depth -= 1;
                    continue;
                }
                match e.local_name().as_ref() {
                    b"trans-unit" => {
                        if let Some(unit) = current.take() {
                            file.units.push(unit.build());
                        }
                        field = None;
                    }
                    b"source" | b"target" | b"note" => field = None,
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                if let (Some(unit), Some(active)) = (current.as_mut(), field) {
                    let text = e.unescape().map_err(|e| FormatError::parse(FORMAT, e))?;
                    unit.push_text(active, &text);
                }
            }
            Ok(Event::CData(e)) => {
                if let (Some(unit), Some(active)) = (current.as_mut(), field) {
                    unit.push_text(active, &String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(FormatError::parse(
                    FORMAT,
                    format!("line {}: {}", byte_pos_to_line(position, &line_starts), e),
                ));
            }
            _ => {}
        }
    }

    if current.is_some() {
        return Err(FormatError::parse(FORMAT, "unterminated trans-unit"));
    }
    if !saw_root {
        return Err(FormatError::parse(FORMAT, "document has no root element"));
    }

    Ok(file)
}

/// Serialize a file as an XLIFF 1.2 document
pub fn serialize(file: &TranslationFile) -> Result<String, FormatError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_err)?;

    writer
        .write_event(Event::Start(BytesStart::new("xliff").with_attributes([
            ("version", "1.2"),
            ("xmlns", "urn:oasis:names:tc:xliff:document:1.2"),
        ])))
        .map_err(write_err)?;

    let mut file_element = BytesStart::new("file").with_attributes([
        ("original", "locqa"),
        ("datatype", "plaintext"),
    ]);
    if let Some(lang) = &file.source_language {
        file_element.push_attribute(("source-language", lang.as_str()));
    }
    if let Some(lang) = &file.target_language {
        file_element.push_attribute(("target-language", lang.as_str()));
    }
    writer.write_event(Event::Start(file_element)).map_err(write_err)?;
    writer.write_event(Event::Start(BytesStart::new("body"))).map_err(write_err)?;

    for unit in &file.units {
        writer
            .write_event(Event::Start(
                BytesStart::new("trans-unit").with_attributes([("id", unit.key.as_str())]),
            ))
            .map_err(write_err)?;

        write_text_element(&mut writer, "source", &unit.source)?;
        if let Some(target) = &unit.target {
            write_text_element(&mut writer, "target", target)?;
        }
        if let Some(note) = &unit.note {
            write_text_element(&mut writer, "note", note)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("trans-unit")))
            .map_err(write_err)?;
    }

    writer.write_event(Event::End(BytesEnd::new("body"))).map_err(write_err)?;
    writer.write_event(Event::End(BytesEnd::new("file"))).map_err(write_err)?;
    writer.write_event(Event::End(BytesEnd::new("xliff"))).map_err(write_err)?;

    String::from_utf8(writer.into_inner().into_inner()).map_err(write_err)
}

fn write_err<E: std::fmt::Display>(error: E) -> FormatError {
    FormatError::serialize(FORMAT, error)
}

fn write_text_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    name: &str,
    text: &str,
) -> Result<(), FormatError> {
    writer.write_event(Event::Start(BytesStart::new(name))).map_err(write_err)?;
    writer.write_event(Event::Text(BytesText::new(text))).map_err(write_err)?;
    writer.write_event(Event::End(BytesEnd::new(name))).map_err(write_err)
}
