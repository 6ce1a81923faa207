//! Free-text filter expressions.
//!
//! A filter string is a whitespace-separated list of terms, all of which
//! must match (conjunction). `list:`, `tag:`, `priority:`, and `status:`
//! terms match structured fields; any other term is a case-insensitive
//! substring match against the task name.

use thiserror::Error;

use crate::task::{Task, MAX_PRIORITY};

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("invalid priority '{0}' (expected a number 0..={max})", max = MAX_PRIORITY)]
    InvalidPriority(String),

    #[error("unknown status '{0}' (expected 'active' or 'done')")]
    UnknownStatus(String),

    #[error("empty value for '{0}:' term")]
    EmptyValue(String),
}

/// One parsed term of a filter expression.
#[derive(Debug, Clone, PartialEq)]
enum Term {
    /// Containing list name, compared case-insensitively.
    List(String),
    /// Any tag, compared case-insensitively.
    Tag(String),
    /// Exact priority level.
    Priority(u8),
    /// Completion state; true matches done tasks.
    Done(bool),
    /// Case-insensitive substring of the task name.
    Name(String),
}

impl Term {
    fn matches(&self, task: &Task) -> bool {
        match self {
            Term::List(name) => task.list.to_lowercase() == *name,
            Term::Tag(name) => task.tags.iter().any(|t| t.to_lowercase() == *name),
            Term::Priority(p) => task.priority == *p,
            Term::Done(done) => task.is_done() == *done,
            Term::Name(word) => task.name.to_lowercase().contains(word),
        }
    }
}

/// A parsed filter expression. The default filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    terms: Vec<Term>,
}

impl Filter {
    /// Parse a raw filter string. Blank input yields the match-all filter.
    pub fn parse(input: &str) -> Result<Self, FilterError> {
        let mut terms = Vec::new();

        for word in input.split_whitespace() {
            terms.push(parse_term(word)?);
        }

        Ok(Self { terms })
    }

    /// Returns true if every term matches `task`.
    pub fn matches(&self, task: &Task) -> bool {
        self.terms.iter().all(|t| t.matches(task))
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

fn parse_term(word: &str) -> Result<Term, FilterError> {
    if let Some((key, value)) = word.split_once(':') {
        let key = key.to_lowercase();
        match key.as_str() {
            "list" | "l" | "tag" | "t" | "priority" | "p" | "status" | "s" => {
                if value.is_empty() {
                    return Err(FilterError::EmptyValue(key));
                }
            }
            // Unknown keys fall through to a plain name match.
            _ => return Ok(Term::Name(word.to_lowercase())),
        }

        return match key.as_str() {
            "list" | "l" => Ok(Term::List(value.to_lowercase())),
            "tag" | "t" => Ok(Term::Tag(value.to_lowercase())),
            "priority" | "p" => match value.parse::<u8>() {
                Ok(p) if p <= MAX_PRIORITY => Ok(Term::Priority(p)),
                _ => Err(FilterError::InvalidPriority(value.to_string())),
            },
            _ => match value.to_lowercase().as_str() {
                "done" | "complete" | "completed" => Ok(Term::Done(true)),
                "active" | "pending" | "todo" => Ok(Term::Done(false)),
                other => Err(FilterError::UnknownStatus(other.to_string())),
            },
        };
    }

    Ok(Term::Name(word.to_lowercase()))
}
