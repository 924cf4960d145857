//! Signature extraction
//!
//! Recognizes `function NAME(params)` headers, optionally preceded by
//! `export`/`async` and by a `/** ... */` block separated only by
//! whitespace. Parameter lists are split on top-level commas, so nested
//! types such as `Map<string, number>` or `(a: number) => void` stay in one
//! entry. Anything that does not fit this shape is skipped silently.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, trace};

use super::annotation::parse_annotations;
use crate::config::is_identifier;
use crate::shared::{FunctionKind, NamingConvention, Signature};

static DECLARATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?:/\*\*(?P<doc>[^*]*\*+(?:[^/*][^*]*\*+)*)/\s*)?",
        r"(?:(?:export|async|declare)\s+)*",
        r"function\b\s*\*?\s*(?P<name>[A-Za-z_$][A-Za-z0-9_$]*)\s*",
        r"(?:<[^<>()]*>\s*)?\(",
    ))
    .expect("valid declaration pattern")
});

/// Ordered function name → signature mapping.
///
/// Re-declaring a name replaces the earlier signature but keeps the
/// position of the first declaration, so output order does not depend on
/// where an override appears.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SignatureSet {
    signatures: Vec<Signature>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SignatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns `true` when an earlier declaration was replaced
    pub fn insert(&mut self, signature: Signature) -> bool {
        match self.index.get(&signature.name) {
            Some(&slot) => {
                self.signatures[slot] = signature;
                true
            }
            None => {
                self.index.insert(signature.name.clone(), self.signatures.len());
                self.signatures.push(signature);
                false
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Signature> {
        self.index.get(name).map(|&slot| &self.signatures[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signature> {
        self.signatures.iter()
    }

    /// Signatures of one kind, declaration order
    pub fn of_kind(&self, kind: FunctionKind) -> impl Iterator<Item = &Signature> {
        self.signatures.iter().filter(move |s| s.kind == kind)
    }

    pub fn names(&self) -> Vec<&str> {
        self.signatures.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

/// Scans source text for target declarations
pub struct SignatureExtractor<'a> {
    convention: NamingConvention<'a>,
    targets: Vec<FunctionKind>,
}

impl<'a> SignatureExtractor<'a> {
    /// Extractor accepting functions of the given kinds
    pub fn new(convention: NamingConvention<'a>, targets: &[FunctionKind]) -> Self {
        Self {
            convention,
            targets: targets.to_vec(),
        }
    }

    /// Extract all accepted declarations from `source`
    pub fn extract(&self, source: &str) -> SignatureSet {
        let mut set = SignatureSet::new();

        for caps in DECLARATION_RE.captures_iter(source) {
            let name = &caps["name"];
            let Some((kind, stem)) = self.convention.classify(name) else {
                continue;
            };
            if !self.targets.contains(&kind) {
                continue;
            }

            // The pattern ends right after the opening parenthesis
            let open = caps.get(0).map(|m| m.end() - 1).unwrap_or(0);
            let Some(entries) = split_parameter_list(source, open) else {
                debug!("Skipping {}: parameter list is not closed", name);
                continue;
            };
            let Some(params) = parameter_names(&entries) else {
                debug!("Skipping {}: unsupported parameter syntax", name);
                continue;
            };

            let annotations = caps
                .name("doc")
                .map(|m| parse_annotations(m.as_str()))
                .unwrap_or_default();

            trace!("Found {} {} ({} params)", kind, name, params.len());
            let replaced = set.insert(Signature {
                name: name.to_string(),
                kind,
                stem: stem.to_string(),
                params,
                annotations,
            });
            if replaced {
                debug!("{} declared again; the later declaration wins", name);
            }
        }

        set
    }
}

/// Split the parameter list whose `(` sits at byte offset `open`.
///
/// Returns the raw top-level entries, or `None` when the list never closes.
pub fn split_parameter_list(source: &str, open: usize) -> Option<Vec<&str>> {
    let body_start = open + 1;
    let bytes = source.as_bytes();
    let mut entries = Vec::new();
    let mut depth: usize = 0;
    let mut entry_start = body_start;
    let mut quote: Option<u8> = None;
    let mut i = body_start;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        match b {
            b'"' | b'\'' | b'`' => quote = Some(b),
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            // `=>` is an arrow, not a closing angle bracket
            b'>' if i > 0 && bytes[i - 1] == b'=' => {}
            b')' | b']' | b'}' | b'>' => {
                if depth == 0 {
                    if b != b')' {
                        return None;
                    }
                    entries.push(&source[entry_start..i]);
                    return Some(
                        entries
                            .into_iter()
                            .map(str::trim)
                            .filter(|e| !e.is_empty())
                            .collect(),
                    );
                }
                depth -= 1;
            }
            b',' if depth == 0 => {
                entries.push(&source[entry_start..i]);
                entry_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Parameter names of raw entries: type annotation and default removed,
/// rest marker and optional marker dropped.
///
/// Returns `None` if an entry does not start with a plain identifier
/// (destructuring patterns cannot be wired by name).
pub fn parameter_names(entries: &[&str]) -> Option<Vec<String>> {
    entries
        .iter()
        .map(|entry| {
            let entry = entry.trim().trim_start_matches("...");
            let cut = entry.find(&[':', '='][..]).unwrap_or(entry.len());
            let name = entry[..cut].trim().trim_end_matches('?').trim();
            is_identifier(name).then(|| name.to_string())
        })
        .collect()
}
