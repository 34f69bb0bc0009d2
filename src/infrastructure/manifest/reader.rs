//! Destructive-changes manifest reader

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use crate::domain::entities::{DeletedComponent, DeletionManifest};
use crate::domain::ports::ManifestReader;
use crate::error::{DefuseError, DefuseResult};

const ROOT: &str = "Package";
const WILDCARD: &str = "*";

/// Reads `destructiveChanges.xml` with quick-xml
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlManifestReader;

impl XmlManifestReader {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestReader for XmlManifestReader {
    fn read(&self, path: Option<&Path>) -> DefuseResult<DeletionManifest> {
        let Some(path) = path else {
            return Ok(DeletionManifest::new());
        };
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no destructive manifest");
                return Ok(DeletionManifest::new());
            }
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                return Err(DefuseError::ManifestParse {
                    path: path.to_path_buf(),
                    message: "not valid UTF-8".to_string(),
                })
            }
            Err(e) => return Err(DefuseError::file(path, e)),
        };

        let manifest = parse_manifest(&content).map_err(|message| DefuseError::ManifestParse {
            path: path.to_path_buf(),
            message,
        })?;
        debug!(path = %path.display(), components = manifest.len(), "parsed destructive manifest");
        Ok(manifest)
    }
}

/// Parse package XML content.
///
/// Whitespace-only content is an empty manifest; anything else must be a
/// well-formed document rooted at `<Package>`.
pub fn parse_manifest(content: &str) -> Result<DeletionManifest, String> {
    let mut manifest = DeletionManifest::new();
    if content.trim().is_empty() {
        return Ok(manifest);
    }

    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    let mut saw_root = false;
    let mut text = String::new();
    let mut members: Vec<String> = Vec::new();
    let mut kind: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if stack.is_empty() {
                    check_root(&name, saw_root)?;
                    saw_root = true;
                }
                text.clear();
                stack.push(name);
            }
            Ok(Event::Empty(e)) => {
                if stack.is_empty() {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    check_root(&name, saw_root)?;
                    saw_root = true;
                }
            }
            Ok(Event::Text(e)) => {
                let unescaped = e.unescape().map_err(|e| e.to_string())?;
                text.push_str(&unescaped);
            }
            Ok(Event::CData(e)) => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::End(_)) => {
                let name = stack
                    .pop()
                    .ok_or_else(|| "unexpected closing tag".to_string())?;
                let parent = stack.last().map(String::as_str);
                match (name.as_str(), parent) {
                    ("members", Some("types")) => {
                        let member = text.trim();
                        if !member.is_empty() && member != WILDCARD {
                            members.push(member.to_string());
                        }
                    }
                    ("name", Some("types")) => kind = Some(text.trim().to_string()),
                    ("types", Some(ROOT)) => {
                        for member in members.drain(..) {
                            let component = match &kind {
                                Some(kind) => DeletedComponent::new(member).with_kind(kind.clone()),
                                None => DeletedComponent::new(member),
                            };
                            manifest.push(component);
                        }
                        kind = None;
                    }
                    _ => {}
                }
                text.clear();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(format!("at byte {}: {}", reader.buffer_position(), e)),
        }
    }

    if let Some(open) = stack.last() {
        return Err(format!("unexpected end of document inside <{}>", open));
    }
    if !saw_root {
        return Err(format!("missing <{}> root element", ROOT));
    }
    Ok(manifest)
}

fn check_root(name: &str, saw_root: bool) -> Result<(), String> {
    if saw_root {
        return Err("more than one root element".to_string());
    }
    if name != ROOT {
        return Err(format!("expected <{}> root element, found <{}>", ROOT, name));
    }
    Ok(())
}
