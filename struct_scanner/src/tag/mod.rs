//! Parser for raw field tag text.
//!
//! A tag is a run of `name:"value"` pairs separated by spaces, e.g.
//! `env:"PORT" default:"8080"`. Names are runs of printable characters other
//! than whitespace, `:` and `"`. Values are double quoted and may escape
//! `\"`, `\\`, `\n`, `\t` and `\r`.

use std::iter::Peekable;
use std::str::CharIndices;

use indexmap::IndexMap;

use crate::TagError;

/// Parsed tags in declaration order.
///
/// A name declared twice keeps its first position and its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(IndexMap<String, String>);

impl Tags {
    /// Parses raw tag text. Empty text yields an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns a [`TagError`] quoting `raw` when the text is malformed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use struct_scanner::Tags;
    ///
    /// let tags = Tags::parse(r#"env:"PORT" default:"8080""#)?;
    /// assert_eq!(tags.get("env"), Some("PORT"));
    /// assert_eq!(tags.len(), 2);
    /// # Ok::<(), struct_scanner::TagError>(())
    /// ```
    pub fn parse(raw: &str) -> Result<Self, TagError> {
        Parser::new(raw).run().map(Self)
    }

    /// Value of the tag `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns `true` when the tag `name` is present, even with an empty value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Iterates `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.into_iter()
    }

    /// Number of distinct tag names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no tags were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn str_pair<'a>((name, value): (&'a String, &'a String)) -> (&'a str, &'a str) {
    (name, value)
}

impl<'a> IntoIterator for &'a Tags {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        indexmap::map::Iter<'a, String, String>,
        fn((&'a String, &'a String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().map(str_pair)
    }
}

fn is_name_char(c: char) -> bool {
    !(c.is_control() || c.is_whitespace() || c == ':' || c == '"')
}

struct Parser<'a> {
    raw: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            chars: raw.char_indices().peekable(),
        }
    }

    fn run(mut self) -> Result<IndexMap<String, String>, TagError> {
        let mut tags = IndexMap::new();
        loop {
            while self.chars.next_if(|&(_, c)| c == ' ').is_some() {}
            let Some(&(start, _)) = self.chars.peek() else {
                return Ok(tags);
            };
            let name = self.name(start)?;
            let value = self.value(name)?;
            tags.insert(name.to_owned(), value);
        }
    }

    /// Reads a tag name and the `:` after it.
    fn name(&mut self, start: usize) -> Result<&'a str, TagError> {
        while self.chars.next_if(|&(_, c)| is_name_char(c)).is_some() {}
        let raw = self.raw;
        let end = self.chars.peek().map_or(raw.len(), |&(offset, _)| offset);
        let name = raw.get(start..end).unwrap_or_default();
        match self.chars.next() {
            Some((offset, c)) if c.is_control() => Err(self.control(c, offset)),
            _ if name.is_empty() => Err(TagError::MissingName {
                tag: self.raw.to_owned(),
                offset: start,
            }),
            Some((_, ':')) => Ok(name),
            _ => Err(self.missing_value(name)),
        }
    }

    /// Reads a quoted value, unescaping it.
    fn value(&mut self, name: &str) -> Result<String, TagError> {
        match self.chars.next() {
            Some((_, '"')) => {}
            Some((offset, c)) if c.is_control() => return Err(self.control(c, offset)),
            Some((offset, ':')) => {
                return Err(TagError::MissingName {
                    tag: self.raw.to_owned(),
                    offset,
                });
            }
            Some(_) => {
                return Err(TagError::MissingQuotes {
                    tag: self.raw.to_owned(),
                    name: name.to_owned(),
                });
            }
            None => return Err(self.missing_value(name)),
        }

        let mut value = String::new();
        loop {
            let c = match self.chars.next() {
                Some((_, '"')) => return Ok(value),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, '"')) => '"',
                    Some((_, '\\')) => '\\',
                    Some((_, 'n')) => '\n',
                    Some((_, 't')) => '\t',
                    Some((_, 'r')) => '\r',
                    Some((_, escape)) => {
                        return Err(TagError::InvalidEscape {
                            tag: self.raw.to_owned(),
                            name: name.to_owned(),
                            escape,
                        });
                    }
                    None => return Err(self.missing_end_quote(name)),
                },
                Some((_, c)) => c,
                None => return Err(self.missing_end_quote(name)),
            };
            value.push(c);
        }
    }

    fn control(&self, c: char, offset: usize) -> TagError {
        TagError::ControlCharacter {
            tag: self.raw.to_owned(),
            code: u32::from(c),
            offset,
        }
    }

    fn missing_value(&self, name: &str) -> TagError {
        TagError::MissingValue {
            tag: self.raw.to_owned(),
            name: name.to_owned(),
        }
    }

    fn missing_end_quote(&self, name: &str) -> TagError {
        TagError::MissingEndQuote {
            tag: self.raw.to_owned(),
            name: name.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests;
