//! Filter predicates over user records
//!
//! A predicate is a conjunction of clauses. A clause is either an exact
//! equality on one field or a disjunction of case-insensitive pattern
//! matches across several fields (the free-text search).

use regex::RegexBuilder;
use serde_json::{json, Map, Value};

use crate::domain::entities::{User, UserField, UserValue};

/// Fields the free-text search looks at
pub const SEARCH_FIELDS: [UserField; 2] = [UserField::Name, UserField::Email];

/// Value compared by an equality clause
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

impl FieldValue {
    fn matches(&self, value: &UserValue<'_>) -> bool {
        match (self, value) {
            (FieldValue::Text(expected), UserValue::Text(Some(actual))) => expected == actual,
            (FieldValue::Bool(expected), UserValue::Bool(actual)) => expected == actual,
            _ => false,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Bool(b) => Value::Bool(*b),
        }
    }
}

/// Case-insensitive regular expression match on a text field
#[derive(Debug, Clone, PartialEq)]
pub struct TextMatch {
    pub field: UserField,
    /// Regex source; user input is escaped before it lands here
    pub pattern: String,
}

impl TextMatch {
    fn matches(&self, user: &User) -> bool {
        let UserValue::Text(Some(text)) = user.value(self.field) else {
            return false;
        };
        RegexBuilder::new(&self.pattern)
            .case_insensitive(true)
            .build()
            .map(|re| re.is_match(text))
            .unwrap_or(false)
    }
}

/// One conjunct of a predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// At least one of the matches must hold
    AnyMatches(Vec<TextMatch>),
    /// The field must equal the value exactly
    Equals(UserField, FieldValue),
}

impl Clause {
    fn matches(&self, user: &User) -> bool {
        match self {
            Clause::AnyMatches(matches) => matches.iter().any(|m| m.matches(user)),
            Clause::Equals(field, expected) => expected.matches(&user.value(*field)),
        }
    }
}

/// Conjunction of clauses. The empty predicate matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPredicate {
    clauses: Vec<Clause>,
}

impl FilterPredicate {
    /// Predicate that matches every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Require a case-insensitive substring match on any search field.
    /// The search text is matched literally.
    pub fn search(mut self, text: &str) -> Self {
        let pattern = regex::escape(text);
        let matches = SEARCH_FIELDS
            .iter()
            .map(|field| TextMatch {
                field: *field,
                pattern: pattern.clone(),
            })
            .collect();
        self.clauses.push(Clause::AnyMatches(matches));
        self
    }

    /// Require exact equality on a field
    pub fn equals(mut self, field: UserField, value: FieldValue) -> Self {
        self.clauses.push(Clause::Equals(field, value));
        self
    }

    /// Evaluate the predicate against a record
    pub fn matches(&self, user: &User) -> bool {
        self.clauses.iter().all(|clause| clause.matches(user))
    }

    /// Render as a document-store query document
    pub fn to_document(&self) -> Value {
        let mut doc = Map::new();
        for clause in &self.clauses {
            match clause {
                Clause::AnyMatches(matches) => {
                    let alternatives: Vec<Value> = matches
                        .iter()
                        .map(|m| {
                            json!({ m.field.as_str(): { "$regex": m.pattern, "$options": "i" } })
                        })
                        .collect();
                    doc.insert("$or".to_string(), Value::Array(alternatives));
                }
                Clause::Equals(field, value) => {
                    doc.insert(field.as_str().to_string(), value.to_json());
                }
            }
        }
        Value::Object(doc)
    }
}

impl std::fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_document())
    }
}

/// Build the user-listing predicate from the optional filters.
///
/// Empty strings count as absent for `search` and `role`; `is_active`
/// filters on both `true` and `false`.
pub fn build_filter(
    search: Option<&str>,
    role: Option<&str>,
    is_active: Option<bool>,
) -> FilterPredicate {
    let mut predicate = FilterPredicate::all();

    if let Some(text) = search.filter(|s| !s.is_empty()) {
        predicate = predicate.search(text);
    }

    if let Some(role) = role.filter(|r| !r.is_empty()) {
        predicate = predicate.equals(UserField::Role, FieldValue::Text(role.to_string()));
    }

    if let Some(active) = is_active {
        predicate = predicate.equals(UserField::IsActive, FieldValue::Bool(active));
    }

    predicate
}
