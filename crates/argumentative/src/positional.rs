use crate::usage;
use crate::value::StringValue;

/// A bare argument matched by position. Positionals are filled in the order
/// they were registered.
#[derive(Debug, Clone)]
pub struct Positional {
    name: String,
    description: String,
    required: bool,
    default: String,
    value: StringValue,
}

impl Positional {
    pub fn new(
        name: impl Into<String>,
        required: bool,
        default: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let default = default.into();
        Self {
            name: name.into(),
            description: description.into(),
            required,
            value: StringValue::new(default.clone()),
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
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

    /// Row for the `Positional arguments:` section.
    pub fn long_description(&self) -> String {
        usage::usage_row(&self.name, &self.description, &self.default)
    }

    pub fn short_description(&self) -> String {
        usage::usage_token(&self.name, self.required)
    }
}
