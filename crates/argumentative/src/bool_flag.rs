use crate::usage;
use crate::value::BoolValue;

/// A boolean switch. Its value starts at `false` and is set to `true` whenever
/// the flag appears in the argument list.
#[derive(Debug, Clone)]
pub struct BoolFlag {
    long: String,
    short: Option<char>,
    description: String,
    value: BoolValue,
}

impl BoolFlag {
    pub fn new(
        long: impl Into<String>,
        short: Option<char>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            long: long.into(),
            short,
            description: description.into(),
            value: BoolValue::new(false),
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

    pub fn value(&self) -> &BoolValue {
        &self.value
    }

    /// Row for the `Flags:` section.
    pub fn long_description(&self) -> String {
        usage::usage_row(
            &usage::flag_names(&self.long, self.short),
            &self.description,
            "",
        )
    }

    /// Token for the `Usage:` line. Switches are always optional.
    pub fn short_description(&self) -> String {
        usage::usage_token(&usage::preferred_name(&self.long, self.short), false)
    }
}
