//! Event-level XML codec for the externalDependencies.xml document
//!
//! Only the `<component name="ExternalDependencies">` subtree is owned by
//! this tool. Everything else in the document belongs to other tools and must
//! round-trip unchanged, so the codec streams events and splices the owned
//! subtree into place instead of modelling the whole document. Output
//! formatting is deterministic: repeated syncs produce byte-identical files.

use std::io;

use anyhow::{anyhow, bail, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::dependency::version::DottedVersion;
use crate::document::PluginEntry;

/// Name of the component subtree this tool owns.
pub const COMPONENT_NAME: &str = "ExternalDependencies";

/// Decode the plugin entries from an existing document.
///
/// Returns `Ok(None)` when the document is well-formed XML but does not
/// contain the owned component. A corrupt document (unparseable XML, a plugin
/// without an id, or a min-version that is not dotted-numeric) is an error;
/// the store degrades either case to a malformed existing state.
pub fn decode(text: &str) -> Result<Option<Vec<PluginEntry>>> {
    let mut reader = Reader::from_str(text);
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if is_owned_component(&e)? {
                    return decode_component(&mut reader).map(Some);
                }
            }
            Event::Empty(e) => {
                if is_owned_component(&e)? {
                    return Ok(Some(Vec::new()));
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Splice the owned component into an existing document, leaving every other
/// event untouched. When the component is missing it is inserted before the
/// root element closes.
pub fn splice(text: &str, entries: &[PluginEntry]) -> Result<String> {
    let mut reader = Reader::from_str(text);
    let mut writer = Writer::new(Vec::new());
    let mut depth = 0usize;
    let mut replaced = false;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) => {
                if !replaced && is_owned_component(&e)? {
                    write_component(&mut writer, entries)?;
                    reader.read_to_end(e.name())?;
                    replaced = true;
                } else {
                    depth += 1;
                    writer.write_event(Event::Start(e))?;
                }
            }
            Event::Empty(e) => {
                if !replaced && is_owned_component(&e)? {
                    write_component(&mut writer, entries)?;
                    replaced = true;
                } else if depth == 0 && !replaced {
                    // Self-closing root: expand it so the component has a
                    // place to live.
                    let root = e.name().as_ref().to_vec();
                    writer.write_event(Event::Start(e.clone()))?;
                    writer.write_event(Event::Text(BytesText::new("\n  ")))?;
                    write_component(&mut writer, entries)?;
                    writer.write_event(Event::Text(BytesText::new("\n")))?;
                    writer.write_event(Event::End(BytesEnd::new(String::from_utf8(root)?)))?;
                    replaced = true;
                } else {
                    writer.write_event(Event::Empty(e))?;
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if depth == 0 && !replaced {
                    writer.write_event(Event::Text(BytesText::new("  ")))?;
                    write_component(&mut writer, entries)?;
                    writer.write_event(Event::Text(BytesText::new("\n")))?;
                    replaced = true;
                }
                writer.write_event(Event::End(e))?;
            }
            other => writer.write_event(other)?,
        }
    }

    if !replaced {
        bail!("document has no root element to hold the {} component", COMPONENT_NAME);
    }
    finish(writer)
}

/// Render the minimal fresh document: the project wrapper plus the owned
/// component and nothing else.
pub fn render_fresh(entries: &[PluginEntry]) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Text(BytesText::new("\n")))?;

    let mut project = BytesStart::new("project");
    project.push_attribute(("version", "4"));
    writer.write_event(Event::Start(project))?;

    writer.write_event(Event::Text(BytesText::new("\n  ")))?;
    write_component(&mut writer, entries)?;
    writer.write_event(Event::Text(BytesText::new("\n")))?;

    writer.write_event(Event::End(BytesEnd::new("project")))?;
    writer.write_event(Event::Text(BytesText::new("\n")))?;

    finish(writer)
}

fn is_owned_component(e: &BytesStart) -> Result<bool> {
    if e.name().as_ref() != b"component" {
        return Ok(false);
    }
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"name" {
            return Ok(attr.unescape_value()?.as_ref() == COMPONENT_NAME);
        }
    }
    Ok(false)
}

fn decode_component(reader: &mut Reader<&[u8]>) -> Result<Vec<PluginEntry>> {
    let mut entries = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"plugin" => {
                entries.push(decode_plugin(&e)?);
                reader.read_to_end(e.name())?;
            }
            Event::Empty(e) if e.name().as_ref() == b"plugin" => {
                entries.push(decode_plugin(&e)?);
            }
            Event::End(e) if e.name().as_ref() == b"component" => return Ok(entries),
            Event::Eof => {
                bail!("unexpected end of document inside the {} component", COMPONENT_NAME)
            }
            _ => {}
        }
    }
}

fn decode_plugin(e: &BytesStart) -> Result<PluginEntry> {
    let mut id = None;
    let mut min_version = None;

    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"id" => id = Some(attr.unescape_value()?.into_owned()),
            b"min-version" => min_version = Some(attr.unescape_value()?.into_owned()),
            _ => {}
        }
    }

    let id = id.ok_or_else(|| anyhow!("plugin element is missing its id attribute"))?;
    if id.is_empty() {
        bail!("plugin element has an empty id attribute");
    }
    if let Some(version) = &min_version {
        DottedVersion::parse(version)?;
    }

    Ok(PluginEntry::new(id, min_version))
}

fn write_component<W: io::Write>(writer: &mut Writer<W>, entries: &[PluginEntry]) -> Result<()> {
    let mut component = BytesStart::new("component");
    component.push_attribute(("name", COMPONENT_NAME));

    if entries.is_empty() {
        writer.write_event(Event::Empty(component))?;
        return Ok(());
    }

    writer.write_event(Event::Start(component))?;
    for entry in entries {
        writer.write_event(Event::Text(BytesText::new("\n    ")))?;
        let mut plugin = BytesStart::new("plugin");
        plugin.push_attribute(("id", entry.id.as_str()));
        if let Some(version) = &entry.min_version {
            plugin.push_attribute(("min-version", version.as_str()));
        }
        writer.write_event(Event::Empty(plugin))?;
    }
    writer.write_event(Event::Text(BytesText::new("\n  ")))?;
    writer.write_event(Event::End(BytesEnd::new("component")))?;

    Ok(())
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    Ok(String::from_utf8(writer.into_inner())?)
}
