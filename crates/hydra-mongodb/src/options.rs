//! Query options decoded from an untyped options bag
//!
//! Scripts pass `{ sort, projection, limit, skip, hint }` as a plain object.
//! Every field is optional; absent or null means "store default". A field that
//! is present with the wrong runtime type is rejected with `OptionType` instead
//! of being silently dropped. Unknown keys are ignored.

use bson::Document as BsonDocument;
use hydra_common::{HydraError, Result};
use mongodb::options::{FindOptions, Hint};
use serde_json::{Map, Value};

use crate::coercion::coerce_document;

/// Options bag as handed over by the host runtime
pub type OptionsBag = Map<String, Value>;

/// Options for a find operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    sort: Option<BsonDocument>,
    projection: Option<BsonDocument>,
    limit: Option<i64>,
    skip: Option<i64>,
    hint: Option<String>,
}

impl QueryOptions {
    /// Create options with every field left at the store default
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an options bag
    ///
    /// Performs no I/O.
    ///
    /// # Errors
    /// - `DocumentCoercion` if `sort` or `projection` cannot be coerced to a document
    /// - `OptionType` if `limit`/`skip` is not a 64-bit integer, `skip` is negative,
    ///   or `hint` is not a string
    pub fn from_bag(bag: &OptionsBag) -> Result<Self> {
        let mut options = Self::new();

        if let Some(sort) = present(bag, "sort") {
            options.sort = Some(coerce_document(sort)?);
        }
        if let Some(projection) = present(bag, "projection") {
            options.projection = Some(coerce_document(projection)?);
        }
        if let Some(limit) = present(bag, "limit") {
            options.limit = Some(integer_option("limit", limit)?);
        }
        if let Some(skip) = present(bag, "skip") {
            let skip_val = integer_option("skip", skip)?;
            if skip_val < 0 {
                return Err(HydraError::OptionType(format!(
                    "'skip' must be non-negative, got {}",
                    skip_val
                )));
            }
            options.skip = Some(skip_val);
        }
        if let Some(hint) = present(bag, "hint") {
            let hint_val = hint
                .as_str()
                .ok_or_else(|| HydraError::option_type("hint", "a string", hint))?;
            options.hint = Some(hint_val.to_string());
        }

        Ok(options)
    }

    /// Decode an options bag that may itself be missing or of the wrong type
    ///
    /// `null` yields default options.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(bag) => Self::from_bag(bag),
            other => Err(HydraError::option_type("options", "an object", other)),
        }
    }

    /// Set the sort order
    pub fn sort(mut self, sort: BsonDocument) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Set the projection
    pub fn projection(mut self, projection: BsonDocument) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Set the maximum number of documents to return
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the number of documents to skip
    pub fn skip(mut self, skip: i64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Set the index hint by index name
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn get_sort(&self) -> Option<&BsonDocument> {
        self.sort.as_ref()
    }

    pub fn get_projection(&self) -> Option<&BsonDocument> {
        self.projection.as_ref()
    }

    pub fn get_limit(&self) -> Option<i64> {
        self.limit
    }

    pub fn get_skip(&self) -> Option<i64> {
        self.skip
    }

    pub fn get_hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Returns true if no field is set
    pub fn is_default(&self) -> bool {
        self == &Self::default()
    }

    /// Convert into the driver's find options
    pub fn into_find_options(self) -> FindOptions {
        let mut find_options = FindOptions::default();
        find_options.sort = self.sort;
        find_options.projection = self.projection;
        // Decoding rejects negative skips; one set through the builder is dropped
        find_options.skip = self.skip.and_then(|s| u64::try_from(s).ok());
        if let Some(limit_val) = self.limit {
            find_options.limit = Some(limit_val);
            // Fetch a positive limit in one batch
            if limit_val > 0 {
                find_options.batch_size = u32::try_from(limit_val).ok();
            }
        }
        find_options.hint = self.hint.map(Hint::Name);
        find_options
    }
}

impl TryFrom<&OptionsBag> for QueryOptions {
    type Error = HydraError;

    fn try_from(bag: &OptionsBag) -> Result<Self> {
        Self::from_bag(bag)
    }
}

impl From<QueryOptions> for FindOptions {
    fn from(options: QueryOptions) -> Self {
        options.into_find_options()
    }
}

/// Look up a key, treating explicit null the same as absence
fn present<'a>(bag: &'a OptionsBag, key: &str) -> Option<&'a Value> {
    bag.get(key).filter(|v| !v.is_null())
}

fn integer_option(name: &str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| HydraError::option_type(name, "a 64-bit integer", value))
}
