use std::borrow::Cow;
use std::io::Write;

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Writer;

use dbdoc_engine::DocumentNode;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("'{name}' is not a valid XML {kind} name")]
    InvalidName { kind: &'static str, name: String },

    #[error("attribute '{name}' holds control character U+{code:04X}")]
    ControlCharacter { name: String, code: u32 },
}

// ═══════════════════════════════════════════════════════════════
//  Raw XML rendering
// ═══════════════════════════════════════════════════════════════

/// Render the document as indented UTF-8 XML.
pub fn render(doc: &DocumentNode) -> Result<Vec<u8>, RenderError> {
    let mut buf = Vec::new();
    render_to(doc, &mut buf)?;
    Ok(buf)
}

/// Render the document into `out`.
///
/// Attribute values are escaped here, including tab, CR and LF so that
/// parsers do not normalize them to spaces. Element and attribute names
/// come from source column names and are rejected when they are not valid
/// unprefixed XML names. Elements without children are self-closed.
pub fn render_to<W: Write>(doc: &DocumentNode, out: W) -> Result<(), RenderError> {
    enum Step<'a> {
        Open(&'a DocumentNode),
        Close(&'a str),
    }

    let mut writer = Writer::new_with_indent(out, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut stack = vec![Step::Open(doc)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Open(node) => {
                check_name("element", node.tag())?;
                let mut start = BytesStart::new(node.tag());
                for (name, value) in node.attributes().iter() {
                    check_name("attribute", name)?;
                    start.push_attribute(Attribute {
                        key: QName(name.as_bytes()),
                        value: Cow::Owned(escape_value(name, value)?.into_bytes()),
                    });
                }

                if node.children().is_empty() {
                    writer.write_event(Event::Empty(start))?;
                } else {
                    writer.write_event(Event::Start(start))?;
                    stack.push(Step::Close(node.tag()));
                    stack.extend(node.children().iter().rev().map(Step::Open));
                }
            }
            Step::Close(tag) => {
                writer.write_event(Event::End(BytesEnd::new(tag)))?;
            }
        }
    }

    let mut out = writer.into_inner();
    out.write_all(b"\n")?;
    Ok(())
}

/// Escaped attribute value, ready to be written between double quotes.
fn escape_value(name: &str, value: &str) -> Result<String, RenderError> {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            c if u32::from(c) < 0x20 => {
                return Err(RenderError::ControlCharacter {
                    name: name.to_string(),
                    code: u32::from(c),
                });
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Unprefixed XML 1.0 name, restricted to what catalog column names use.
///
/// `:` is refused: the document declares no namespaces, so a prefixed
/// name would not be namespace-well-formed.
fn check_name(kind: &'static str, name: &str) -> Result<(), RenderError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {
            chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(RenderError::InvalidName {
            kind,
            name: name.to_string(),
        })
    }
}
