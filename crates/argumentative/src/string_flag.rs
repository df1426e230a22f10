use crate::usage;
use crate::value::StringValue;

/// An option that takes the following argument as its value.
#[derive(Debug, Clone)]
pub struct StringFlag {
    long: String,
    short: Option<char>,
    description: String,
    required: bool,
    default: String,
    value: StringValue,
}

impl StringFlag {
    /// The bound value starts out as `default` (empty when no default is given).
    pub fn new(
        long: impl Into<String>,
        short: Option<char>,
        required: bool,
        default: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let default = default.into();
        Self {
            long: long.into(),
            short,
            description: description.into(),
            required,
            value: StringValue::new(default.clone()),
            default,
        }
    }

    pub fn long(&self) -> &str {
        &self.long
    }

    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> &str {
        &self.default
    }

    pub fn value(&self) -> &StringValue {
        &self.value
    }

    /// Row for the `Options:` section.
    pub fn long_description(&self) -> String {
        usage::usage_row(
            &usage::flag_names(&self.long, self.short),
            &self.description,
            &self.default,
        )
    }

    /// Token for the `Usage:` line; bracketed unless required.
    pub fn short_description(&self) -> String {
        usage::usage_token(
            &usage::preferred_name(&self.long, self.short),
            self.required,
        )
    }
}
