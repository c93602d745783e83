//! Schema builder for fluent validation API.

use chrono::NaiveDate;

use super::result::ValidationErrors;
use crate::model::FieldPath;

/// Type alias for rule closures. A rule sees the extracted value, the whole
/// target, and the evaluation context.
type Rule<T, V> = Box<dyn Fn(&V, &T, &ValidationContext) -> bool + Send + Sync>;

/// Type alias for value extractors.
type Extract<T, V> = Box<dyn Fn(&T) -> V + Send + Sync>;

/// Type alias for field conditions.
type Condition<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Internal representation of a finalized field (or nested list).
struct FieldEntry<T, K: Ord> {
    validate: Box<dyn Fn(&T, &ValidationContext, &mut ValidationErrors<K>) + Send + Sync>,
}

/// Inputs to a validation run that do not come from the target itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    today: NaiveDate,
}

impl ValidationContext {
    /// Creates a context evaluated as of `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Creates a context for the local current date.
    pub fn now() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    /// The date rules treat as today.
    pub fn today(&self) -> NaiveDate {
        self.today
    }
}

/// A set of field rules over targets of type `T`, keyed by `K`.
///
/// Build one with [`Schema::new`] and chained [`field`](Schema::field) calls.
pub struct Schema<T, K: Ord = FieldPath> {
    fields: Vec<FieldEntry<T, K>>,
}

impl<T: 'static, K: Ord + Clone + Send + Sync + 'static> Schema<T, K> {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field, extracting its value from the target with `extract`.
    pub fn field<V, F>(self, key: K, extract: F) -> FieldBuilder<T, V, K>
    where
        V: 'static,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        FieldBuilder {
            schema: self,
            key,
            extract: Box::new(extract),
            condition: None,
            rules: Vec::new(),
        }
    }

    /// Validate every item of a list with a nested schema.
    ///
    /// Item errors are re-keyed with `key(index, item_key)`.
    pub fn each<E, K2>(
        mut self,
        items: fn(&T) -> &[E],
        schema: Schema<E, K2>,
        key: fn(usize, K2) -> K,
    ) -> Self
    where
        E: 'static,
        K2: Ord + Clone + Send + Sync + 'static,
    {
        self.fields.push(FieldEntry {
            validate: Box::new(move |target, cx, errors| {
                for (index, item) in items(target).iter().enumerate() {
                    for (item_key, message) in schema.validate(item, cx) {
                        errors.insert(key(index, item_key), message);
                    }
                }
            }),
        });
        self
    }

    /// Run every rule against `target`.
    pub fn validate(&self, target: &T, cx: &ValidationContext) -> ValidationErrors<K> {
        let mut errors = ValidationErrors::new();
        for field in &self.fields {
            (field.validate)(target, cx, &mut errors);
        }
        errors
    }

    /// Number of fields (nested lists count once).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T: 'static, K: Ord + Clone + Send + Sync + 'static> Default for Schema<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: Ord> std::fmt::Debug for Schema<T, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.fields.len())
            .finish()
    }
}

/// Builder for adding validation rules to a single field.
pub struct FieldBuilder<T, V, K: Ord = FieldPath> {
    schema: Schema<T, K>,
    key: K,
    extract: Extract<T, V>,
    condition: Option<Condition<T>>,
    rules: Vec<(Rule<T, V>, String)>,
}

impl<T: 'static, V: 'static, K: Ord + Clone + Send + Sync + 'static> FieldBuilder<T, V, K> {
    /// Add a rule over the field value alone.
    pub fn rule<F>(self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.rule_with(move |v, _, _| f(v), msg)
    }

    /// Add a rule that can also read the whole target and the context.
    pub fn rule_with<F>(mut self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&V, &T, &ValidationContext) -> bool + Send + Sync + 'static,
    {
        self.rules.push((Box::new(f), msg.into()));
        self
    }

    /// Only validate this field when `f` holds for the target.
    pub fn when<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.condition = Some(Box::new(f));
        self
    }

    /// Continue to the next field.
    pub fn field<V2, F>(self, key: K, extract: F) -> FieldBuilder<T, V2, K>
    where
        V2: 'static,
        F: Fn(&T) -> V2 + Send + Sync + 'static,
    {
        self.finalize().field(key, extract)
    }

    /// Finalize this field and continue with a nested list.
    pub fn each<E, K2>(
        self,
        items: fn(&T) -> &[E],
        schema: Schema<E, K2>,
        key: fn(usize, K2) -> K,
    ) -> Schema<T, K>
    where
        E: 'static,
        K2: Ord + Clone + Send + Sync + 'static,
    {
        self.finalize().each(items, schema, key)
    }

    /// Finalize and return the schema.
    pub fn build(self) -> Schema<T, K> {
        self.finalize()
    }

    fn finalize(self) -> Schema<T, K> {
        let FieldBuilder {
            mut schema,
            key,
            extract,
            condition,
            rules,
        } = self;

        schema.fields.push(FieldEntry {
            validate: Box::new(move |target, cx, errors| {
                if let Some(condition) = &condition
                    && !condition(target)
                {
                    return;
                }
                let value = extract(target);
                if let Some((_, msg)) = rules.iter().find(|(rule, _)| !rule(&value, target, cx)) {
                    errors.insert(key.clone(), msg.clone());
                }
            }),
        });

        schema
    }
}

// Built-in rules for String values
impl<T: 'static, K: Ord + Clone + Send + Sync + 'static> FieldBuilder<T, String, K> {
    /// Require the field to be non-empty.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(|v| !v.trim().is_empty(), msg)
    }

    /// Require minimum length (in characters).
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.chars().count() >= min, msg)
    }

    /// Require maximum length (in characters).
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.chars().count() <= max, msg)
    }

    /// Require a valid email address.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.rule(
            |v| {
                if v.is_empty() {
                    true // Empty is valid; use required() for non-empty
                } else {
                    email_address::EmailAddress::is_valid(v)
                }
            },
            msg,
        )
    }
}

// Built-in rules for Option values
impl<T: 'static, U: 'static, K: Ord + Clone + Send + Sync + 'static> FieldBuilder<T, Option<U>, K> {
    /// Require a value to be present.
    pub fn present(self, msg: impl Into<String>) -> Self {
        self.rule(|v| v.is_some(), msg)
    }
}
