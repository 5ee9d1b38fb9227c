//! Value validators used by the rule engine.

use regex::Regex;

/// Trait for checks that only need the field's value.
pub trait Validator: Send + Sync {
    /// Validates a value and returns an error message if invalid.
    fn validate(&self, value: &str) -> Result<(), String>;
}

/// Validator that requires a non-blank value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a new `RequiredValidator` with default message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: "can't be blank".to_string(),
        }
    }

    /// Creates a new `RequiredValidator` with custom message.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }
}

/// Which bound a [`LengthValidator`] enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthBound {
    Minimum(usize),
    Maximum(usize),
    Exactly(usize),
}

/// Validator that enforces a length bound, counted in characters.
#[derive(Debug, Clone)]
pub struct LengthValidator {
    bound: LengthBound,
    message: String,
}

impl LengthValidator {
    /// Creates a new `LengthValidator` with the default message for `bound`.
    #[must_use]
    pub fn new(bound: LengthBound) -> Self {
        let message = match bound {
            LengthBound::Minimum(n) => format!("is too short (minimum is {n} characters)"),
            LengthBound::Maximum(n) => format!("is too long (maximum is {n} characters)"),
            LengthBound::Exactly(n) => format!("is the wrong length (should be {n} characters)"),
        };
        Self { bound, message }
    }

    /// Creates a new `LengthValidator` with custom message.
    #[must_use]
    pub fn with_message(bound: LengthBound, message: impl Into<String>) -> Self {
        Self {
            bound,
            message: message.into(),
        }
    }
}

impl Validator for LengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let len = value.chars().count();
        let ok = match self.bound {
            LengthBound::Minimum(n) => len >= n,
            LengthBound::Maximum(n) => len <= n,
            LengthBound::Exactly(n) => len == n,
        };
        if ok {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Validator using a custom regex pattern.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: Regex,
    must_match: bool,
    message: String,
}

impl RegexValidator {
    /// Creates a validator requiring the value to match `pattern`.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            must_match: true,
            message: message.into(),
        })
    }

    /// Creates a validator requiring the value not to match `pattern`.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile.
    pub fn rejecting(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            must_match: false,
            ..Self::new(pattern, message)?
        })
    }
}

impl Validator for RegexValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.pattern.is_match(value) == self.must_match {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Comparison a [`NumericalityValidator`] enforces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericBound {
    GreaterThan(f64),
    GreaterThanOrEqualTo(f64),
    LessThan(f64),
    LessThanOrEqualTo(f64),
}

impl NumericBound {
    const fn holds(self, num: f64) -> bool {
        match self {
            Self::GreaterThan(n) => num > n,
            Self::GreaterThanOrEqualTo(n) => num >= n,
            Self::LessThan(n) => num < n,
            Self::LessThanOrEqualTo(n) => num <= n,
        }
    }

    /// Returns the message shown when the bound fails.
    #[must_use]
    pub fn default_message(self) -> String {
        match self {
            Self::GreaterThan(n) => format!("must be greater than {n}"),
            Self::GreaterThanOrEqualTo(n) => format!("must be greater than or equal to {n}"),
            Self::LessThan(n) => format!("must be less than {n}"),
            Self::LessThanOrEqualTo(n) => format!("must be less than or equal to {n}"),
        }
    }
}

/// Validator for numeric values with optional integer and range checks.
#[derive(Debug, Clone)]
pub struct NumericalityValidator {
    only_integer: bool,
    bounds: Vec<(NumericBound, String)>,
    not_a_number: String,
    not_an_integer: String,
}

impl Default for NumericalityValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl NumericalityValidator {
    /// Creates a validator accepting any number.
    #[must_use]
    pub fn new() -> Self {
        Self {
            only_integer: false,
            bounds: Vec::new(),
            not_a_number: "is not a number".to_string(),
            not_an_integer: "must be an integer".to_string(),
        }
    }

    /// Rejects numbers with a fractional part.
    #[must_use]
    pub const fn only_integer(mut self) -> Self {
        self.only_integer = true;
        self
    }

    /// Adds a bound with its default message.
    #[must_use]
    pub fn bound(mut self, bound: NumericBound) -> Self {
        let message = bound.default_message();
        self.bounds.push((bound, message));
        self
    }

    /// Adds a bound with a custom message.
    #[must_use]
    pub fn bound_with_message(mut self, bound: NumericBound, message: impl Into<String>) -> Self {
        self.bounds.push((bound, message.into()));
        self
    }

    /// Overrides the non-numeric and non-integer messages.
    #[must_use]
    pub fn messages(
        mut self,
        not_a_number: Option<String>,
        not_an_integer: Option<String>,
    ) -> Self {
        if let Some(message) = not_a_number {
            self.not_a_number = message;
        }
        if let Some(message) = not_an_integer {
            self.not_an_integer = message;
        }
        self
    }
}

impl Validator for NumericalityValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let num: f64 = value
            .trim()
            .parse()
            .map_err(|_| self.not_a_number.clone())?;

        if self.only_integer && num.fract() != 0.0 {
            return Err(self.not_an_integer.clone());
        }

        for (bound, message) in &self.bounds {
            if !bound.holds(num) {
                return Err(message.clone());
            }
        }

        Ok(())
    }
}

/// Validator requiring membership (or non-membership) in a list.
#[derive(Debug, Clone)]
pub struct ListValidator {
    values: Vec<String>,
    must_contain: bool,
    message: String,
}

impl ListValidator {
    /// The value must be one of `values`.
    #[must_use]
    pub fn inclusion(values: Vec<String>) -> Self {
        Self {
            values,
            must_contain: true,
            message: "is not included in the list".to_string(),
        }
    }

    /// The value must not be one of `values`.
    #[must_use]
    pub fn exclusion(values: Vec<String>) -> Self {
        Self {
            values,
            must_contain: false,
            message: "is reserved".to_string(),
        }
    }

    /// Sets a custom message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator for ListValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.values.iter().any(|v| v == value) == self.must_contain {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}
