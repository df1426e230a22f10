//! Small flag registry and argument parser.
//!
//! Flags are declared up front on a [`Flags`] registry. Each registration hands
//! back a value handle the caller keeps; [`Flags::parse`] then walks an argument
//! list and writes matched values into those handles in place.
//!
//! Three kinds of arguments are supported:
//! - boolean switches (`--verbose`, `-v`, combinable as `-xvz`)
//! - string-valued options (`--output out.txt`, `-o out.txt`)
//! - positional arguments, filled strictly in registration order
//!
//! ```
//! use argumentative::Flags;
//!
//! let mut flags = Flags::new();
//! let output = flags.add_string("output", Some('o'), true, "", "Output file");
//! let verbose = flags.add_bool("verbose", Some('v'), "Verbose output");
//! let input = flags.add_positional("input", false, "-", "Input file");
//!
//! flags.parse(&["prog", "-o", "out.txt", "-v", "in.txt"]).unwrap();
//! assert_eq!(output.get(), "out.txt");
//! assert!(verbose.get());
//! assert_eq!(input.get(), "in.txt");
//! ```

mod bool_flag;
mod error;
mod flags;
mod positional;
pub mod schema;
mod string_flag;
mod usage;
mod value;

pub use bool_flag::BoolFlag;
pub use error::{ParseError, ParseResult};
pub use flags::Flags;
pub use positional::Positional;
pub use schema::{FlagSchema, SchemaBindings, SchemaError};
pub use string_flag::StringFlag;
pub use usage::NAME_COLUMN_WIDTH;
pub use value::{BoolValue, StringValue, Value};
