//! XML parsing stage.
//!
//! Turns MJML source text into an [`MjmlNode`] tree. The parser is
//! deliberately thin: it keeps attribute and child order exactly as
//! written, represents interleaved character data as text nodes, and
//! captures the inner content of the verbatim elements (`mj-raw`,
//! `mj-style`, `mj-title`, `mj-preview`) without interpreting it. All
//! semantic work happens in the rendering engine.

use crate::error::ParseError;
use crate::node::MjmlNode;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Elements whose inner content is captured verbatim, markup included.
const VERBATIM_TAGS: &[&str] = &["mj-raw", "mj-style", "mj-title", "mj-preview"];

/// Parses an MJML document into its node tree.
///
/// The root element must be `<mjml>`; anything else is rejected. The
/// presence of `mj-body` is a driver-level concern and is not enforced
/// here.
///
/// # Examples
///
/// ```
/// use mailcomb_core::parse;
///
/// let root = parse("<mjml><mj-body></mj-body></mjml>").unwrap();
/// assert_eq!(root.tag, "mjml");
/// assert_eq!(root.children[0].tag, "mj-body");
/// ```
pub fn parse(source: &str) -> Result<MjmlNode, ParseError> {
    let mut reader = Reader::from_str(source);
    let mut stack: Vec<MjmlNode> = Vec::new();
    let mut root: Option<MjmlNode> = None;

    loop {
        let event_start = reader.buffer_position() as usize;
        match reader.read_event() {
            Err(err) => {
                return Err(ParseError::xml(
                    err.to_string(),
                    line_at(source, reader.buffer_position() as usize),
                ));
            }
            Ok(Event::Start(start)) => {
                let mut node = element_from(&start, line_at(source, event_start))?;
                if VERBATIM_TAGS.contains(&node.tag.as_str()) {
                    let end = start.to_end().into_owned();
                    let text = reader
                        .read_text(end.name())
                        .map_err(|err| {
                            ParseError::xml(
                                err.to_string(),
                                line_at(source, reader.buffer_position() as usize),
                            )
                        })?
                        .into_owned();
                    node.text = Some(text);
                    attach(&mut stack, &mut root, node);
                } else {
                    stack.push(node);
                }
            }
            Ok(Event::Empty(start)) => {
                let node = element_from(&start, line_at(source, event_start))?;
                attach(&mut stack, &mut root, node);
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| ParseError::xml("unexpected closing tag", line_at(source, event_start)))?;
                attach(&mut stack, &mut root, node);
            }
            Ok(Event::Text(text)) => {
                if let Some(parent) = stack.last_mut() {
                    let raw = String::from_utf8_lossy(text.as_ref()).into_owned();
                    if !raw.trim().is_empty() {
                        parent.children.push(MjmlNode::text_node(raw));
                    }
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(parent) = stack.last_mut() {
                    let raw = String::from_utf8_lossy(data.as_ref()).into_owned();
                    parent.children.push(MjmlNode::text_node(raw));
                }
            }
            Ok(Event::Eof) => break,
            // Declarations, processing instructions and comments outside
            // verbatim elements carry no meaning for the engine.
            Ok(_) => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::UnexpectedEof(open.tag));
    }
    let root = root.ok_or(ParseError::Empty)?;
    if root.tag != "mjml" {
        return Err(ParseError::UnexpectedRoot(root.tag));
    }
    Ok(root)
}

fn element_from(start: &BytesStart<'_>, line: usize) -> Result<MjmlNode, ParseError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut node = MjmlNode::element(tag);
    node.line = Some(line);
    for attr in start.attributes().with_checks(false) {
        let attr = attr.map_err(|err| ParseError::xml(err.to_string(), line))?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| ParseError::xml(err.to_string(), line))?
            .into_owned();
        node.attributes.push((name, value));
    }
    Ok(node)
}

fn attach(stack: &mut Vec<MjmlNode>, root: &mut Option<MjmlNode>, node: MjmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            // Only the first top-level element can be the root; trailing
            // siblings would already have failed XML well-formedness.
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}

fn line_at(source: &str, byte_pos: usize) -> usize {
    let upto = byte_pos.min(source.len());
    source[..upto].bytes().filter(|b| *b == b'\n').count() + 1
}
