use std::collections::HashMap;

use indexmap::IndexMap;

use crate::bool_flag::BoolFlag;
use crate::error::{ParseError, ParseResult};
use crate::positional::Positional;
use crate::string_flag::StringFlag;
use crate::value::{BoolValue, StringValue};

/// Registry of declared flags and the parser that fills them.
///
/// Long names are looked up across both the boolean and string maps, so a
/// name should be registered as one kind only. Short aliases live in a single
/// table shared by both kinds.
#[derive(Debug, Default)]
pub struct Flags {
    bool_flags: IndexMap<String, BoolFlag>,
    string_flags: IndexMap<String, StringFlag>,
    positionals: Vec<Positional>,
    short_flags: HashMap<char, String>,
}

fn is_flag(token: &str) -> bool {
    token.starts_with('-')
}

fn is_long_flag(token: &str) -> bool {
    token.starts_with("--") && token.chars().count() >= 3
}

impl Flags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a string option and return the handle its value is written to.
    pub fn add_string(
        &mut self,
        long: impl Into<String>,
        short: Option<char>,
        required: bool,
        default: impl Into<String>,
        description: impl Into<String>,
    ) -> StringValue {
        let flag = StringFlag::new(long, short, required, default, description);
        let value = flag.value().clone();
        self.register_alias(short, flag.long());
        self.string_flags.insert(flag.long().to_string(), flag);
        value
    }

    /// Register a boolean switch and return the handle its value is written to.
    pub fn add_bool(
        &mut self,
        long: impl Into<String>,
        short: Option<char>,
        description: impl Into<String>,
    ) -> BoolValue {
        let flag = BoolFlag::new(long, short, description);
        let value = flag.value().clone();
        self.register_alias(short, flag.long());
        self.bool_flags.insert(flag.long().to_string(), flag);
        value
    }

    /// Register the next positional argument.
    pub fn add_positional(
        &mut self,
        name: impl Into<String>,
        required: bool,
        default: impl Into<String>,
        description: impl Into<String>,
    ) -> StringValue {
        let positional = Positional::new(name, required, default, description);
        let value = positional.value().clone();
        self.positionals.push(positional);
        value
    }

    /// Map `short` to `long`. A later registration of the same alias wins.
    fn register_alias(&mut self, short: Option<char>, long: &str) {
        let Some(c) = short else {
            return;
        };
        if let Some(prev) = self.short_flags.insert(c, long.to_string()) {
            if prev != long {
                tracing::trace!(alias = %c, from = %prev, to = %long, "short alias reassigned");
            }
        } else {
            tracing::trace!(alias = %c, flag = %long, "short alias registered");
        }
    }

    pub fn bool_flags(&self) -> impl Iterator<Item = &BoolFlag> {
        self.bool_flags.values()
    }

    pub fn string_flags(&self) -> impl Iterator<Item = &StringFlag> {
        self.string_flags.values()
    }

    pub fn positionals(&self) -> &[Positional] {
        &self.positionals
    }

    /// Resolve the flag name a token refers to.
    ///
    /// For `--name` this is `name`, whether or not it is registered. For a
    /// short token it is the long name registered for the alias at character
    /// position `pos`. Returns `None` when nothing resolves.
    pub fn flag_name<'a>(&'a self, token: &'a str, pos: usize) -> Option<&'a str> {
        if is_long_flag(token) {
            return token.get(2..);
        }
        if !is_flag(token) {
            return None;
        }
        let alias = token.chars().nth(pos)?;
        self.short_flags.get(&alias).map(String::as_str)
    }

    /// Parse `args`, writing matched values into the registered handles.
    ///
    /// `args[0]` is the program name and is skipped. Parsing stops at the first
    /// error; values written before that point are kept. Handles are not reset
    /// between calls, so parsing again only overwrites what the new list
    /// mentions.
    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> ParseResult<()> {
        let mut positional = 0usize;
        let mut i = 1usize;

        while i < args.len() {
            let arg = args[i].as_ref();

            if is_flag(arg) {
                let option = self
                    .flag_name(arg, 1)
                    .and_then(|name| self.string_flags.get(name));

                if let Some(flag) = option {
                    if !is_long_flag(arg) && arg.chars().count() > 2 {
                        return Err(ParseError::CombinedParameter(arg.to_string()));
                    }
                    let Some(value) = args.get(i + 1) else {
                        return Err(ParseError::MissingValue(arg.to_string()));
                    };
                    let value = value.as_ref();
                    tracing::debug!(flag = %flag.long(), %value, "matched option");
                    flag.value().set(value.to_string());
                    i += 1;
                } else if is_long_flag(arg) {
                    let switch = self
                        .flag_name(arg, 1)
                        .and_then(|name| self.bool_flags.get(name));
                    let Some(flag) = switch else {
                        return Err(ParseError::UnknownFlag(arg.to_string()));
                    };
                    tracing::debug!(flag = %flag.long(), "matched switch");
                    flag.value().set(true);
                } else {
                    self.parse_cluster(arg)?;
                }
            } else if let Some(slot) = self.positionals.get(positional) {
                tracing::debug!(positional = %slot.name(), value = %arg, "matched positional");
                slot.value().set(arg.to_string());
                positional += 1;
            } else {
                return Err(ParseError::UnknownPositional(arg.to_string()));
            }

            i += 1;
        }

        self.validate()
    }

    /// Switch on every alias in a `-xyz` token, failing on the first alias
    /// that is unknown or names a string option.
    fn parse_cluster(&self, token: &str) -> ParseResult<()> {
        for alias in token.chars().skip(1) {
            let name = self.short_flags.get(&alias).map(String::as_str);

            if let Some(flag) = name.and_then(|n| self.bool_flags.get(n)) {
                tracing::debug!(flag = %flag.long(), %alias, "matched switch in cluster");
                flag.value().set(true);
                continue;
            }

            if name.is_some_and(|n| self.string_flags.contains_key(n)) {
                return Err(ParseError::CombinedParameterInCluster {
                    alias,
                    token: token.to_string(),
                });
            }
            return Err(ParseError::UnknownAlias(alias));
        }
        Ok(())
    }

    /// Check that every required option and positional holds a non-empty value.
    ///
    /// Options are checked before positionals; only the first miss is reported.
    /// An option explicitly set to `""` counts as missing.
    pub fn validate(&self) -> ParseResult<()> {
        for flag in self.string_flags.values() {
            if flag.required() && flag.value().is_empty() {
                tracing::debug!(flag = %flag.long(), "required option missing");
                return Err(ParseError::MissingRequiredFlag(flag.long().to_string()));
            }
        }
        for positional in &self.positionals {
            if positional.required() && positional.value().is_empty() {
                tracing::debug!(positional = %positional.name(), "required positional missing");
                return Err(ParseError::MissingRequiredPositional(
                    positional.name().to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switches() -> (Flags, BoolValue, BoolValue, BoolValue) {
        let mut flags = Flags::new();
        let x = flags.add_bool("optx", Some('x'), "Option X");
        let y = flags.add_bool("opty", Some('y'), "Option Y");
        let z = flags.add_bool("optz", Some('z'), "Option Z");
        (flags, x, y, z)
    }

    #[test]
    fn unmentioned_flags_keep_defaults() {
        let mut flags = Flags::new();
        let s = flags.add_string("output", Some('o'), false, "out.txt", "");
        let b = flags.add_bool("verbose", Some('v'), "");
        let p = flags.add_positional("input", false, "-", "");
        let empty = flags.add_string("name", None, false, "", "");

        flags.parse(&["prog"]).unwrap();
        assert_eq!(s.get(), "out.txt");
        assert!(!b.get());
        assert_eq!(p.get(), "-");
        assert_eq!(empty.get(), "");
    }

    #[test]
    fn alias_and_long_name_are_equivalent() {
        let (flags, x, _, _) = switches();
        flags.parse(&["prog", "--optx"]).unwrap();
        assert!(x.get());

        let (flags, x, _, _) = switches();
        flags.parse(&["prog", "-x"]).unwrap();
        assert!(x.get());

        let mut by_long = Flags::new();
        let a = by_long.add_string("output", Some('o'), false, "", "");
        by_long.parse(&["prog", "--output", "file"]).unwrap();

        let mut by_alias = Flags::new();
        let b = by_alias.add_string("output", Some('o'), false, "", "");
        by_alias.parse(&["prog", "-o", "file"]).unwrap();

        assert_eq!(a.get(), b.get());
    }

    #[test]
    fn cluster_sets_each_switch() {
        let (flags, x, y, z) = switches();
        flags.parse(&["prog", "-xy"]).unwrap();
        assert!(x.get());
        assert!(y.get());
        assert!(!z.get());
    }

    #[test]
    fn option_alias_leading_a_cluster_is_rejected() {
        let (mut flags, _, _, z) = switches();
        flags.add_string("stringname", Some('s'), true, "", "");
        let err = flags.parse(&["prog", "-sz"]).unwrap_err();
        assert_eq!(err.to_string(), "options with parameters can not be combined -sz");
        assert!(!z.get());
    }

    #[test]
    fn option_alias_inside_a_cluster_is_rejected_after_earlier_switches() {
        let (mut flags, x, _, z) = switches();
        flags.add_string("stringname", Some('s'), false, "", "");
        let err = flags.parse(&["prog", "-xsz"]).unwrap_err();
        match &err {
            ParseError::CombinedParameterInCluster { alias, token } => {
                assert_eq!(*alias, 's');
                assert_eq!(token, "-xsz");
            }
            other => panic!("expected CombinedParameterInCluster, got: {other:?}"),
        }
        assert_eq!(err.to_string(), "options with parameters can not be combined: s in -xsz");
        // No rollback within the cluster.
        assert!(x.get());
        assert!(!z.get());
    }

    #[test]
    fn unknown_flags_are_reported() {
        let (flags, x, _, _) = switches();
        let err = flags.parse(&["prog", "--nope"]).unwrap_err();
        assert_eq!(err, ParseError::UnknownFlag("--nope".to_string()));

        let err = flags.parse(&["prog", "-xq"]).unwrap_err();
        assert_eq!(err.to_string(), "unknown flag -q");
        assert!(x.get());

        let err = flags.parse(&["prog", "-q"]).unwrap_err();
        assert_eq!(err, ParseError::UnknownAlias('q'));
    }

    #[test]
    fn long_switch_name_registered_as_option_takes_a_value() {
        let mut flags = Flags::new();
        let s = flags.add_string("name", None, false, "", "");
        flags.parse(&["prog", "--name", "--looks-like-a-flag"]).unwrap();
        assert_eq!(s.get(), "--looks-like-a-flag");
    }

    #[test]
    fn trailing_option_without_value_is_an_error() {
        let mut flags = Flags::new();
        flags.add_string("output", Some('o'), false, "", "");
        let err = flags.parse(&["prog", "-o"]).unwrap_err();
        assert_eq!(err, ParseError::MissingValue("-o".to_string()));
        let err = flags.parse(&["prog", "--output"]).unwrap_err();
        assert_eq!(err.to_string(), "missing value for --output");
    }

    #[test]
    fn positionals_fill_in_registration_order() {
        let mut flags = Flags::new();
        let p1 = flags.add_positional("p1", false, "", "");
        let p2 = flags.add_positional("p2", false, "", "");

        flags.parse(&["prog", "a", "b"]).unwrap();
        assert_eq!(p1.get(), "a");
        assert_eq!(p2.get(), "b");

        let err = flags.parse(&["prog", "a", "b", "c"]).unwrap_err();
        assert_eq!(err.to_string(), "unknown positional argument c");
    }

    #[test]
    fn required_checks_options_then_positionals() {
        let mut flags = Flags::new();
        flags.add_positional("input", true, "", "");
        let out = flags.add_string("output", None, true, "", "");

        let err = flags.parse(&["prog"]).unwrap_err();
        assert_eq!(err.to_string(), "required flag --output missing");

        out.set("x".to_string());
        let err = flags.validate().unwrap_err();
        assert_eq!(err.to_string(), "required positional argument [input] missing");
    }

    #[test]
    fn explicit_empty_value_counts_as_missing() {
        let mut flags = Flags::new();
        flags.add_string("output", None, true, "", "");
        let err = flags.parse(&["prog", "--output", ""]).unwrap_err();
        assert_eq!(err, ParseError::MissingRequiredFlag("output".to_string()));
    }

    #[test]
    fn last_alias_registration_wins() {
        let mut flags = Flags::new();
        let first = flags.add_bool("first", Some('f'), "");
        let second = flags.add_bool("second", Some('f'), "");
        flags.parse(&["prog", "-f"]).unwrap();
        assert!(!first.get());
        assert!(second.get());
    }

    #[test]
    fn alias_moved_from_option_to_switch() {
        let mut flags = Flags::new();
        let option = flags.add_string("option", Some('s'), false, "", "");
        let switch = flags.add_bool("switch", Some('s'), "");

        let err = flags.parse(&["prog", "-s", "x"]).unwrap_err();
        assert_eq!(err.to_string(), "unknown positional argument x");
        assert!(switch.get());
        assert_eq!(option.get(), "");
    }

    #[test]
    fn alias_moved_from_switch_to_option() {
        let mut flags = Flags::new();
        let switch = flags.add_bool("switch", Some('s'), "");
        let option = flags.add_string("option", Some('s'), false, "", "");

        flags.parse(&["prog", "-s", "x"]).unwrap();
        assert_eq!(option.get(), "x");
        assert!(!switch.get());
    }

    #[test]
    fn long_name_shared_by_both_kinds_resolves_to_option() {
        let mut flags = Flags::new();
        let switch = flags.add_bool("name", None, "");
        let option = flags.add_string("name", None, false, "", "");

        flags.parse(&["prog", "--name", "value"]).unwrap();
        assert_eq!(option.get(), "value");
        assert!(!switch.get());
    }

    #[test]
    fn handles_survive_later_registrations() {
        let mut flags = Flags::new();
        let first = flags.add_positional("p0", false, "", "");
        let rest: Vec<_> = (1..64)
            .map(|i| flags.add_positional(format!("p{i}"), false, "", ""))
            .collect();
        flags.parse(&["prog", "zero", "one"]).unwrap();
        assert_eq!(first.get(), "zero");
        assert_eq!(rest[0].get(), "one");
    }

    #[test]
    fn flag_name_resolution() {
        let (flags, _, _, _) = switches();
        assert_eq!(flags.flag_name("--optx", 1), Some("optx"));
        assert_eq!(flags.flag_name("--unregistered", 1), Some("unregistered"));
        assert_eq!(flags.flag_name("-xy", 2), Some("opty"));
        assert_eq!(flags.flag_name("-xy", 5), None);
        assert_eq!(flags.flag_name("-q", 1), None);
        assert_eq!(flags.flag_name("plain", 1), None);
    }

    #[test]
    fn odd_dash_tokens() {
        let (flags, x, _, _) = switches();
        flags.parse(&["prog", "-"]).unwrap();
        assert!(!x.get());

        let err = flags.parse(&["prog", "--"]).unwrap_err();
        assert_eq!(err.to_string(), "unknown flag --");
    }

    #[test]
    fn empty_token_is_positional() {
        let mut flags = Flags::new();
        let p = flags.add_positional("p", false, "default", "");
        flags.parse(&["prog", ""]).unwrap();
        assert_eq!(p.get(), "");
    }

    #[test]
    fn reparse_overwrites_without_resetting() {
        let (flags, x, y, _) = switches();
        flags.parse(&["prog", "-x"]).unwrap();
        flags.parse(&["prog", "-y"]).unwrap();
        assert!(x.get());
        assert!(y.get());
    }
}
