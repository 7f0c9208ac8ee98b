use std::collections::{HashSet, VecDeque};
use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::error::{KataError, KataResult};

/// A `{...}` group located in a candidate string, by byte offsets of its braces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Group {
    open: usize,
    close: usize,
}

impl Group {
    /// Finds the leftmost `{` whose body runs to a `}` without meeting another brace.
    /// Nothing nests inside such a group, so its body is a plain comma separated list.
    /// An empty body is not a group and `{}` stays as literal text.
    fn innermost(text: &str) -> Option<Group> {
        text.match_indices('{').find_map(|(open, _)| {
            let body = &text[open + 1..];
            let len = body.find(|c: char| c == '{' || c == '}')?;
            if len > 0 && body[len..].starts_with('}') {
                Some(Group {
                    open,
                    close: open + 1 + len,
                })
            } else {
                None
            }
        })
    }

    fn alternatives<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        text[self.open + 1..self.close].split(',')
    }

    /// `text` with this group replaced by `alt`
    fn substitute(&self, text: &str, alt: &str) -> String {
        let mut out = String::with_capacity(text.len());
        out.push_str(&text[..self.open]);
        out.push_str(alt);
        out.push_str(&text[self.close + 1..]);
        out
    }
}

/// Checks that every `{` has a matching `}` and vice versa
pub fn validate(expr: &str) -> KataResult<()> {
    let mut open = Vec::new();
    for (i, c) in expr.char_indices() {
        match c {
            '{' => open.push(i),
            '}' => {
                if open.pop().is_none() {
                    return Err(malformed(i, "unmatched '}'"));
                }
            }
            _ => {}
        }
    }
    match open.pop() {
        Some(i) => Err(malformed(i, "unclosed '{'")),
        None => Ok(()),
    }
}

fn malformed(position: usize, reason: &'static str) -> KataError {
    debug!("rejecting brace expression: {} at byte {}", reason, position);
    KataError::MalformedBrace { position, reason }
}

/// Lazy expansion of a brace expression.
///
/// Candidates wait in a FIFO queue. Popping one either splits its innermost group into
/// one new candidate per alternative, or, when no group is left, yields it unless the
/// same string was already yielded.
#[derive(Debug, Clone)]
pub struct BraceExpansion {
    /// Partially expanded strings still to process
    pending: VecDeque<String>,
    /// Fully expanded strings already yielded
    seen: HashSet<String>,
}

impl BraceExpansion {
    pub fn new(expr: &str) -> KataResult<Self> {
        validate(expr)?;
        debug!("expanding {:?}", expr);
        Ok(Self {
            pending: VecDeque::from(vec![expr.to_string()]),
            seen: HashSet::new(),
        })
    }
}

impl Iterator for BraceExpansion {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(candidate) = self.pending.pop_front() {
            match Group::innermost(&candidate) {
                Some(group) => {
                    trace!("splitting {:?} at byte {}", candidate, group.open);
                    for alt in group.alternatives(&candidate) {
                        self.pending.push_back(group.substitute(&candidate, alt));
                    }
                }
                None => {
                    if self.seen.insert(candidate.clone()) {
                        return Some(candidate);
                    }
                }
            }
        }
        None
    }
}

impl FusedIterator for BraceExpansion {}

/// Every string obtained by choosing one alternative from each `{a,b,...}` group.
/// Groups may nest; a `{}` with nothing inside is kept as plain text. Each result is
/// produced once.
pub fn expand_braces(expr: &str) -> KataResult<BraceExpansion> {
    BraceExpansion::new(expr)
}
