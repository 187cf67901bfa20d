//! The CSS selector subset used to address page nodes.
//!
//! Supports compound selectors made of a type (`h3`, `*`), classes
//! (`.event`), an id (`#may`), and attribute tests (`[data-name]`,
//! `[data-name="dates"]`), joined by the descendant combinator. That covers
//! every selector a [`crate::config::PageConfig`] needs; anything else is a
//! [`SelectorError`].

#[cfg(test)]
#[path = "selector_test.rs"]
mod selector_test;

use std::iter::Peekable;
use std::str::CharIndices;

/// Why a selector string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected `{found}` at byte {at} in `{selector}`")]
    Unexpected { selector: String, found: char, at: usize },
    #[error("unterminated attribute test in `{0}`")]
    UnterminatedAttribute(String),
}

/// Attribute test inside `[...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrMatch {
    /// `[name]`
    Present,
    /// `[name=value]`
    Equals(String),
}

/// One compound selector: every listed condition must hold on the same element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compound {
    /// Lowercase tag name; `None` matches any element.
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, AttrMatch)>,
}

/// Read-only view of an element, enough to evaluate a [`Compound`].
pub trait ElementView {
    fn tag(&self) -> &str;
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl Compound {
    /// Whether `element` satisfies every condition of this compound.
    pub fn matches<E: ElementView + ?Sized>(&self, element: &E) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class_attr = element.attribute("class").unwrap_or("");
            if !self.classes.iter().all(|c| class_attr.split_whitespace().any(|p| p == c)) {
                return false;
            }
        }
        self.attributes.iter().all(|(name, test)| match (test, element.attribute(name)) {
            (_, None) => false,
            (AttrMatch::Present, Some(_)) => true,
            (AttrMatch::Equals(expected), Some(actual)) => actual == expected,
        })
    }
}

/// A parsed selector: compounds ordered outermost ancestor first, subject last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<Compound>,
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] for empty input, characters outside the
    /// supported subset, or an unclosed `[...]`.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let unexpected = |found: char, at: usize| SelectorError::Unexpected { selector: input.to_string(), found, at };

        let mut parts = Vec::new();
        let mut current: Option<Compound> = None;
        let mut chars = input.char_indices().peekable();

        while let Some((at, c)) = chars.next() {
            match c {
                c if c.is_whitespace() => {
                    if let Some(done) = current.take() {
                        parts.push(done);
                    }
                }
                '*' => {
                    if current.is_some() {
                        return Err(unexpected(c, at));
                    }
                    current = Some(Compound::default());
                }
                '.' => {
                    let name = read_ident(&mut chars);
                    if name.is_empty() {
                        return Err(unexpected(c, at));
                    }
                    current.get_or_insert_with(Compound::default).classes.push(name);
                }
                '#' => {
                    let name = read_ident(&mut chars);
                    let compound = current.get_or_insert_with(Compound::default);
                    if name.is_empty() || compound.id.is_some() {
                        return Err(unexpected(c, at));
                    }
                    compound.id = Some(name);
                }
                '[' => {
                    let test = read_attribute(input, &mut chars)?;
                    current.get_or_insert_with(Compound::default).attributes.push(test);
                }
                c if is_ident_char(c) => {
                    if current.is_some() {
                        return Err(unexpected(c, at));
                    }
                    let mut name = c.to_string();
                    name.push_str(&read_ident(&mut chars));
                    current = Some(Compound { tag: Some(name.to_ascii_lowercase()), ..Compound::default() });
                }
                other => return Err(unexpected(other, at)),
            }
        }

        if let Some(done) = current {
            parts.push(done);
        }
        if parts.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Self { parts })
    }

    /// Compounds, outermost ancestor first.
    #[must_use]
    pub fn parts(&self) -> &[Compound] {
        &self.parts
    }

    /// Match `element`, whose ancestors are yielded nearest first.
    pub fn matches<'a, E, I>(&self, element: &E, ancestors: I) -> bool
    where
        E: ElementView + 'a,
        I: IntoIterator<Item = &'a E>,
    {
        let Some((subject, rest)) = self.parts.split_last() else {
            return false;
        };
        if !subject.matches(element) {
            return false;
        }
        // Descendant-only chains can be matched greedily against the nearest ancestor.
        let mut pending = rest.iter().rev().peekable();
        for ancestor in ancestors {
            match pending.peek() {
                None => break,
                Some(part) if part.matches(ancestor) => {
                    pending.next();
                }
                Some(_) => {}
            }
        }
        pending.peek().is_none()
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut out = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        out.push(c);
        chars.next();
    }
    out
}

fn skip_whitespace(chars: &mut Peekable<CharIndices<'_>>) {
    while chars.peek().is_some_and(|&(_, c)| c.is_whitespace()) {
        chars.next();
    }
}

fn read_attribute(input: &str, chars: &mut Peekable<CharIndices<'_>>) -> Result<(String, AttrMatch), SelectorError> {
    let unterminated = || SelectorError::UnterminatedAttribute(input.to_string());

    skip_whitespace(chars);
    let name = read_ident(chars).to_ascii_lowercase();
    if name.is_empty() {
        return match chars.peek() {
            Some(&(at, found)) => Err(SelectorError::Unexpected { selector: input.to_string(), found, at }),
            None => Err(unterminated()),
        };
    }
    skip_whitespace(chars);

    let test = match chars.next() {
        Some((_, ']')) => return Ok((name, AttrMatch::Present)),
        Some((_, '=')) => {
            skip_whitespace(chars);
            let value = match chars.peek() {
                Some(&(_, quote @ ('"' | '\''))) => {
                    chars.next();
                    let mut value = String::new();
                    loop {
                        match chars.next() {
                            Some((_, c)) if c == quote => break,
                            Some((_, c)) => value.push(c),
                            None => return Err(unterminated()),
                        }
                    }
                    value
                }
                _ => read_ident(chars),
            };
            AttrMatch::Equals(value)
        }
        Some((at, found)) => return Err(SelectorError::Unexpected { selector: input.to_string(), found, at }),
        None => return Err(unterminated()),
    };

    skip_whitespace(chars);
    match chars.next() {
        Some((_, ']')) => Ok((name, test)),
        Some((at, found)) => Err(SelectorError::Unexpected { selector: input.to_string(), found, at }),
        None => Err(unterminated()),
    }
}
