use std::io::{self, Write};

use crate::error::ParseError;
use crate::flags::Flags;

/// Width the name column of every usage row is padded to.
pub const NAME_COLUMN_WIDTH: usize = 25;

/// `-s, --long` or `--long`, as shown in the left column of a usage row.
pub(crate) fn flag_names(long: &str, short: Option<char>) -> String {
    match short {
        Some(c) => format!("-{c}, --{long}"),
        None => format!("--{long}"),
    }
}

/// `-s` when an alias exists, `--long` otherwise.
pub(crate) fn preferred_name(long: &str, short: Option<char>) -> String {
    match short {
        Some(c) => format!("-{c}"),
        None => format!("--{long}"),
    }
}

/// Token for the `Usage:` line, with the leading separator space.
pub(crate) fn usage_token(name: &str, required: bool) -> String {
    if required {
        format!(" {name}")
    } else {
        format!(" [{name}]")
    }
}

/// A full usage row: padded name column, description, then the default.
pub(crate) fn usage_row(names: &str, description: &str, default: &str) -> String {
    let mut out = format!("{names:<width$}", width = NAME_COLUMN_WIDTH);
    out.push_str(description);
    if !default.is_empty() {
        out.push_str(&format!(" (Default: {default})"));
    }
    out
}

impl Flags {
    /// Render the usage text.
    ///
    /// The first line is the error when one is given, otherwise the program
    /// name and description. The `Usage:` line and the `Flags:`, `Options:`
    /// and `Positional arguments:` sections follow; empty sections are left
    /// out.
    pub fn usage(&self, name: &str, description: &str, err: Option<&ParseError>) -> String {
        let mut out = match err {
            Some(err) => format!("Error: {err}\n"),
            None => format!("{name}\n{description}\n"),
        };

        out.push_str(&format!("\nUsage: {name}"));
        for flag in self.bool_flags() {
            out.push_str(&flag.short_description());
        }
        for flag in self.string_flags() {
            out.push_str(&flag.short_description());
        }
        for positional in self.positionals() {
            out.push_str(&positional.short_description());
        }
        out.push('\n');

        let rows: Vec<String> = self.bool_flags().map(|f| f.long_description()).collect();
        push_section(&mut out, "Flags:", &rows);
        let rows: Vec<String> = self.string_flags().map(|f| f.long_description()).collect();
        push_section(&mut out, "Options:", &rows);
        let rows: Vec<String> = self
            .positionals()
            .iter()
            .map(|p| p.long_description())
            .collect();
        push_section(&mut out, "Positional arguments:", &rows);

        out
    }

    /// Write the usage text to `w`.
    pub fn write_usage<W: Write>(
        &self,
        mut w: W,
        name: &str,
        description: &str,
        err: Option<&ParseError>,
    ) -> io::Result<()> {
        w.write_all(self.usage(name, description, err).as_bytes())?;
        w.flush()
    }

    /// Write the usage text to stdout.
    pub fn print_usage(
        &self,
        name: &str,
        description: &str,
        err: Option<&ParseError>,
    ) -> io::Result<()> {
        self.write_usage(io::stdout().lock(), name, description, err)
    }
}

fn push_section(out: &mut String, title: &str, rows: &[String]) {
    if rows.is_empty() {
        return;
    }
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Flags {
        let mut flags = Flags::new();
        flags.add_string("stringname", Some('s'), true, "", "stringdescription");
        flags.add_bool("boolname", Some('b'), "booldescription");
        flags.add_positional(
            "positionalname",
            false,
            "positionaldefault",
            "positionaldescription",
        );
        flags
    }

    #[test]
    fn usage_lists_every_section_in_order() {
        let want = "\
title
description

Usage: title [-b] -s [positionalname]

Flags:
-b, --boolname           booldescription

Options:
-s, --stringname         stringdescription

Positional arguments:
positionalname           positionaldescription (Default: positionaldefault)
";
        assert_eq!(sample().usage("title", "description", None), want);
    }

    #[test]
    fn usage_leads_with_the_error() {
        let err = ParseError::MissingRequiredFlag("stringname".to_string());
        let text = sample().usage("title", "description", Some(&err));
        assert!(text.starts_with("Error: required flag --stringname missing\n\nUsage: title"));
        assert!(!text.contains("description\n\nUsage"));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let mut flags = Flags::new();
        flags.add_positional("file", true, "", "File to read");
        let text = flags.usage("cat", "print files", None);
        assert_eq!(
            text,
            "cat\nprint files\n\nUsage: cat file\n\nPositional arguments:\nfile                     File to read\n"
        );
    }

    #[test]
    fn write_usage_matches_usage() {
        let flags = sample();
        let mut buf = Vec::new();
        flags.write_usage(&mut buf, "title", "description", None).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            flags.usage("title", "description", None)
        );
    }

    #[test]
    fn rows_pad_to_the_name_column() {
        let row = usage_row("--long", "text", "");
        assert_eq!(row, format!("--long{}text", " ".repeat(19)));
    }

    #[test]
    fn long_names_are_not_truncated() {
        let names = "-x, --a-very-long-flag-name-indeed";
        assert_eq!(usage_row(names, "d", ""), format!("{names}d"));
    }

    #[test]
    fn default_is_appended_even_without_description() {
        assert_eq!(
            usage_row("pos", "", "x"),
            format!("pos{} (Default: x)", " ".repeat(22))
        );
    }
}
