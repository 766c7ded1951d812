// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, trace};

use crate::context::Context;
use crate::error::{Error, Result};

const REQUIRED_OPEN: char = '<';
const REQUIRED_CLOSE: char = '>';
const OPTIONAL_OPEN: char = '[';
const OPTIONAL_CLOSE: char = ']';

fn is_bracket(c: char) -> bool {
    matches!(
        c,
        REQUIRED_OPEN | REQUIRED_CLOSE | OPTIONAL_OPEN | OPTIONAL_CLOSE
    )
}

/// A single named positional placeholder declared in a pattern.
///
/// # Note
///
/// - All members are public for handler convenience. A [Slot] can only be
///   obtained from a validated [Pattern], so it always satisfies the
///   pattern invariants.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Slot {
    /// Name between the brackets.
    pub name: String,
    /// Set for `<name>`, unset for `[name]`.
    pub required: bool,
    /// Zero-based index in declaration order. This is also the index of
    /// the argument the slot binds to.
    pub position: usize,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (open, close) = if self.required {
            (REQUIRED_OPEN, REQUIRED_CLOSE)
        } else {
            (OPTIONAL_OPEN, OPTIONAL_CLOSE)
        };

        write!(f, "{}{}{}", open, self.name, close)
    }
}

/// An ordered, validated sequence of [Slot]s.
///
/// A pattern is created once (see [validate()]) and is never modified
/// afterwards, so it can be shared freely between invocations. Cloning a
/// pattern does not copy the slots.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pattern {
    source: Arc<str>,
    slots: Arc<[Slot]>,
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern {
            source: Arc::from(""),
            slots: Arc::from(Vec::new()),
        }
    }
}

impl Pattern {
    /// The string the pattern was created from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All slots in declaration order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Returns the number of declared slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the pattern declares no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of `<required>` slots. Since required slots always come first,
    /// this is also the minimum number of arguments the pattern accepts.
    pub fn required_count(&self) -> usize {
        self.slots.iter().filter(|s| s.required).count()
    }

    /// Returns the [Slot] with the specified name.
    pub fn get(&self, name: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.name == name)
    }

    /// Bind the specified arguments to the slots of this pattern.
    ///
    /// See [Context::new()].
    pub fn match_args(&self, args: Vec<String>) -> Result<Context> {
        Context::new(self, args)
    }
}

impl fmt::Display for Pattern {
    /// Canonical form: slots only, separated by a single space.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let slots: Vec<String> = self.slots.iter().map(|s| s.to_string()).collect();

        write!(f, "{}", slots.join(" "))
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        validate(s)
    }
}

enum Token<'t> {
    Slot { name: &'t str, required: bool },
    Annotation,
}

/// Returns `None` if the token is malformed.
fn parse_token(token: &str) -> Option<Token<'_>> {
    let (close, required) = match token.chars().next() {
        Some(REQUIRED_OPEN) => (REQUIRED_CLOSE, true),
        Some(OPTIONAL_OPEN) => (OPTIONAL_CLOSE, false),
        _ => {
            // Free text such as "..." is allowed, stray brackets are not.
            if token.contains(is_bracket) {
                return None;
            }

            return Some(Token::Annotation);
        }
    };

    // Both openers are single byte.
    let body = &token[1..];

    let end = body.find(close)?;

    let name = &body[..end];
    let decoration = &body[end + close.len_utf8()..];

    if name.is_empty() || name.contains(is_bracket) || decoration.contains(is_bracket) {
        return None;
    }

    Some(Token::Slot { name, required })
}

/// Parse and validate a pattern string such as `"<id> [path] [name]"`.
///
/// The pattern is a whitespace separated list of tokens:
///
/// - `<name>`: a required slot.
/// - `[name]`: an optional slot.
///
/// Text following the closing bracket (`[path](optional)`) and tokens
/// without any brackets (`...`) are treated as annotations and ignored.
///
/// # Errors
///
/// - [Error::Parse] if a token is malformed (for example `<name`).
/// - [Error::OptionalOrder] if a required slot follows an optional one.
/// - [Error::DuplicatedName] if two slots share the same name.
pub fn validate(pattern: &str) -> Result<Pattern> {
    let mut slots = Vec::<Slot>::new();

    for token in pattern.split_whitespace() {
        match parse_token(token) {
            Some(Token::Slot { name, required }) => slots.push(Slot {
                name: name.into(),
                required,
                position: slots.len(),
            }),
            Some(Token::Annotation) => trace!("ignoring annotation {:?}", token),
            None => return Err(Error::Parse(pattern.into())),
        }
    }

    let mut seen_optional = false;
    let mut names = HashSet::<&str>::new();

    for slot in slots.iter() {
        if slot.required && seen_optional {
            return Err(Error::OptionalOrder);
        }

        if !slot.required {
            seen_optional = true;
        }

        if !names.insert(slot.name.as_str()) {
            return Err(Error::DuplicatedName);
        }
    }

    debug!("validated pattern {:?}: {} slot(s)", pattern, slots.len());

    Ok(Pattern {
        source: pattern.into(),
        slots: slots.into(),
    })
}
