// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::collections::HashMap;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::pattern::Pattern;

/// The full positional argument vector for an invocation, including any
/// arguments beyond the declared slots.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawArgs(Vec<String>);

impl RawArgs {
    /// Create a new set of raw arguments.
    pub fn new(args: Vec<String>) -> Self {
        RawArgs(args)
    }

    /// Returns the argument at the specified zero-based index, or an empty
    /// string if there is no such argument.
    ///
    /// # Note
    ///
    /// An empty string is also a valid argument value: use [RawArgs::len()]
    /// if the distinction matters.
    pub fn get(&self, index: usize) -> &str {
        self.0.get(index).map(String::as_str).unwrap_or_default()
    }

    /// Returns the first argument (or an empty string).
    pub fn first(&self) -> &str {
        self.get(0)
    }

    /// Returns all arguments except the first.
    pub fn tail(&self) -> &[String] {
        self.0.get(1..).unwrap_or_default()
    }

    /// Returns the number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if at least one argument was specified.
    pub fn present(&self) -> bool {
        !self.is_empty()
    }

    /// Iterate over all arguments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for RawArgs {
    fn from(args: Vec<String>) -> Self {
        RawArgs::new(args)
    }
}

/// The value bound to a single slot.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Binding {
    /// Value of the argument (empty if not present).
    pub value: String,
    /// Set if an argument was specified at the slot's position, even if
    /// that argument was an empty string.
    pub present: bool,
}

/// The result of matching an argument vector against a [Pattern].
///
/// A context is created for a single invocation and handed to the handler.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Context {
    pattern: Pattern,
    raw: RawArgs,
    bindings: HashMap<String, Binding>,
}

impl Context {
    /// Bind `args` to the slots of `pattern`.
    ///
    /// Slots are filled strictly left to right: the slot at position `i`
    /// takes `args[i]`. Optional slots beyond the end of `args` are
    /// absent. Extra arguments are not bound to any slot but remain
    /// available via [Context::args()].
    ///
    /// # Errors
    ///
    /// [Error::InsufficientArgs] if there are fewer arguments than
    /// required slots.
    pub fn new(pattern: &Pattern, args: Vec<String>) -> Result<Self> {
        let required = pattern.required_count();

        if args.len() < required {
            debug!(
                "pattern {:?} needs {} arg(s), got {}",
                pattern.source(),
                required,
                args.len()
            );

            return Err(Error::InsufficientArgs);
        }

        let mut bindings = HashMap::<String, Binding>::with_capacity(pattern.len());

        for slot in pattern.slots() {
            let binding = match args.get(slot.position) {
                Some(value) => Binding {
                    value: value.clone(),
                    present: true,
                },
                None => Binding::default(),
            };

            trace!("slot {} bound to {:?}", slot, binding);

            bindings.insert(slot.name.clone(), binding);
        }

        if args.len() > pattern.len() {
            trace!(
                "{} arg(s) not bound to any slot",
                args.len() - pattern.len()
            );
        }

        Ok(Context {
            pattern: pattern.clone(),
            raw: RawArgs::new(args),
            bindings,
        })
    }

    /// Returns the value and presence of the named slot.
    ///
    /// Both an undeclared name and an optional slot with no argument
    /// return `("", false)`. Use [Context::is_declared()] to tell them apart.
    pub fn arg_for(&self, name: &str) -> (&str, bool) {
        match self.bindings.get(name) {
            Some(b) => (b.value.as_str(), b.present),
            None => ("", false),
        }
    }

    /// Returns the value of the named slot if an argument was specified
    /// for it.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.bindings
            .get(name)
            .filter(|b| b.present)
            .map(|b| b.value.as_str())
    }

    /// Returns true if an argument was specified for the named slot.
    pub fn is_present(&self, name: &str) -> bool {
        self.arg_for(name).1
    }

    /// Returns true if the pattern declares a slot with this name.
    pub fn is_declared(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// The full argument vector, unmodified.
    pub fn args(&self) -> &RawArgs {
        &self.raw
    }

    /// The pattern this context was matched against.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::pattern::validate;

    fn to_args(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_raw_args() {
        let raw = RawArgs::from(to_args(&["abc", "", "_"]));

        assert_eq!(raw.len(), 3);
        assert!(!raw.is_empty());
        assert!(raw.present());
        assert_eq!(raw.get(0), "abc");
        assert_eq!(raw.get(1), "");
        assert_eq!(raw.get(2), "_");
        assert_eq!(raw.get(3), "");
        assert_eq!(raw.get(usize::MAX), "");
        assert_eq!(raw.first(), "abc");
        assert_eq!(raw.tail(), to_args(&["", "_"]).as_slice());

        let collected: Vec<&String> = raw.iter().collect();
        assert_eq!(collected.len(), 3);

        let empty = RawArgs::default();

        assert_eq!(empty.len(), 0);
        assert!(empty.is_empty());
        assert!(!empty.present());
        assert_eq!(empty.first(), "");
        assert!(empty.tail().is_empty());
    }

    #[test]
    fn test_match_args() {
        #[derive(Debug)]
        struct TestData<'a> {
            pattern: &'a str,
            args: Vec<&'a str>,
            result: Result<()>,
            // (name, value, present)
            lookups: Vec<(&'a str, &'a str, bool)>,
        }

        let tests = &[
            TestData {
                pattern: "",
                args: vec![],
                result: Ok(()),
                lookups: vec![("any", "", false)],
            },
            TestData {
                pattern: "<tall>",
                args: vec![],
                result: Err(Error::InsufficientArgs),
                lookups: vec![],
            },
            TestData {
                pattern: "<name>",
                args: vec!["Lig"],
                result: Ok(()),
                lookups: vec![("name", "Lig", true)],
            },
            TestData {
                pattern: "<age>",
                args: vec![""],
                result: Ok(()),
                lookups: vec![("age", "", true)],
            },
            TestData {
                pattern: "[path]",
                args: vec![""],
                result: Ok(()),
                lookups: vec![("path", "", true)],
            },
            TestData {
                pattern: "[path]",
                args: vec![],
                result: Ok(()),
                lookups: vec![("path", "", false)],
            },
            TestData {
                pattern: "<path> [id]",
                args: vec!["a", "b"],
                result: Ok(()),
                lookups: vec![("path", "a", true), ("id", "b", true)],
            },
            TestData {
                pattern: "<path> [id]",
                args: vec!["", ""],
                result: Ok(()),
                lookups: vec![("path", "", true), ("id", "", true)],
            },
            TestData {
                pattern: "[path] [id]",
                args: vec![],
                result: Ok(()),
                lookups: vec![("path", "", false), ("id", "", false)],
            },
            TestData {
                pattern: "[path] [id]",
                args: vec!["x"],
                result: Ok(()),
                lookups: vec![("path", "x", true), ("id", "", false)],
            },
            TestData {
                pattern: "<date>",
                args: vec!["2014-09-22", ""],
                result: Ok(()),
                lookups: vec![("date", "2014-09-22", true), ("day", "", false)],
            },
            TestData {
                pattern: "<path>",
                args: vec![],
                result: Err(Error::InsufficientArgs),
                lookups: vec![],
            },
            TestData {
                pattern: "<path> <id>",
                args: vec!["/tmp"],
                result: Err(Error::InsufficientArgs),
                lookups: vec![],
            },
            TestData {
                pattern: "<path> <id>",
                args: vec!["/tmp", "123"],
                result: Ok(()),
                lookups: vec![("path", "/tmp", true), ("id", "123", true)],
            },
            TestData {
                pattern: "<id> [path] [name]",
                args: vec!["1234", "/tmp"],
                result: Ok(()),
                lookups: vec![
                    ("id", "1234", true),
                    ("path", "/tmp", true),
                    ("name", "", false),
                ],
            },
            TestData {
                pattern: "<id> [path](optional) ...",
                args: vec!["abc", ".", "_"],
                result: Ok(()),
                lookups: vec![("id", "abc", true), ("path", ".", true), ("_", "", false)],
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            let pattern = validate(d.pattern).unwrap();

            let result = pattern.match_args(to_args(&d.args));

            let msg = format!("{}, result: {:?}", msg, result);

            if d.result.is_err() {
                assert!(result.is_err(), "{}", msg);

                let expected_err = format!("{:?}", d.result.as_ref().err());
                let actual_err = format!("{:?}", result.as_ref().err());
                assert_eq!(expected_err, actual_err, "{}", msg);

                continue;
            }

            assert!(result.is_ok(), "{}", msg);

            let ctx = result.unwrap();

            assert_eq!(ctx.args().len(), d.args.len(), "{}", msg);
            assert_eq!(ctx.pattern(), &pattern, "{}", msg);

            for (name, value, present) in d.lookups.iter() {
                let lookup_msg = format!("{}, name: {:?}", msg, name);

                assert_eq!(ctx.arg_for(name), (*value, *present), "{}", lookup_msg);
            }
        }
    }

    #[test]
    fn test_one_binding_per_slot() {
        let pattern = validate("<a> [b] [c] [d]").unwrap();

        for n in 1..6 {
            let args: Vec<String> = (0..n).map(|i| i.to_string()).collect();

            let ctx = pattern.match_args(args).unwrap();

            assert_eq!(ctx.bindings.len(), pattern.len(), "n: {}", n);

            for slot in pattern.slots() {
                let msg = format!("n: {}, slot: {}", n, slot);

                assert!(ctx.is_declared(&slot.name), "{}", msg);
                assert_eq!(ctx.is_present(&slot.name), slot.position < n, "{}", msg);
            }
        }
    }

    #[test]
    fn test_overflow() {
        let pattern = validate("<id> [path](optional) ...").unwrap();

        let ctx = Context::new(&pattern, to_args(&["abc", ".", "_", "z"])).unwrap();

        assert_eq!(ctx.arg_for("id"), ("abc", true));
        assert_eq!(ctx.arg_for("path"), (".", true));
        assert_eq!(ctx.args().get(2), "_");
        assert_eq!(ctx.args().get(3), "z");
        assert_eq!(ctx.args().get(4), "");
        assert!(!ctx.is_declared("_"));
    }

    #[test]
    fn test_unknown_vs_absent() {
        let pattern = validate("[path]").unwrap();
        let ctx = pattern.match_args(vec![]).unwrap();

        // Indistinguishable through arg_for()
        assert_eq!(ctx.arg_for("path"), ctx.arg_for("unknown"));

        assert!(ctx.is_declared("path"));
        assert!(!ctx.is_declared("unknown"));
    }

    #[test]
    fn test_value_of() {
        let pattern = validate("<path> [id] [name]").unwrap();
        let ctx = pattern.match_args(to_args(&["", "7"])).unwrap();

        assert_eq!(ctx.value_of("path"), Some(""));
        assert_eq!(ctx.value_of("id"), Some("7"));
        assert_eq!(ctx.value_of("name"), None);
        assert_eq!(ctx.value_of("unknown"), None);
    }
}
