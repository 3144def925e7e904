//! Argument parsing.

/// A single command-line argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// (flag, rest of the flag cluster, index)
    Short(char, String, usize),
    /// (name, inline value given with '=', index)
    Long(String, Option<String>, usize),
    /// (positional_arg, index)
    Positional(String, usize),
}

/// A reference to [`Arg`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArgRef<'a> {
    /// A single matched char.
    Short(char),
    /// A long option.
    Long(&'a str),
    /// Positional argument.
    Positional,
}

impl Arg {
    /// Convert into a [`ArgRef`].
    pub fn as_ref(&self) -> ArgRef<'_> {
        match self {
            Arg::Short(c, _, _) => ArgRef::Short(*c),
            Arg::Long(ref s, _, _) => ArgRef::Long(s),
            Arg::Positional(_, _) => ArgRef::Positional,
        }
    }

    /// Get the argument as it was written (eg. --foo=bar).
    pub fn entire_match(self) -> String {
        match self {
            Arg::Short(c, rest, _) => format!("-{}{}", c, rest),
            Arg::Long(name, None, _) => format!("--{}", name),
            Arg::Long(name, Some(value), _) => format!("--{}={}", name, value),
            Arg::Positional(s, _) => s,
        }
    }

    /// Get the index of this argument.
    pub fn index(&self) -> usize {
        match self {
            Arg::Short(_, _, i) | Arg::Long(_, _, i) | Arg::Positional(_, i) => *i,
        }
    }
}

/// Parse arguments from `args`.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Vec<Arg> {
    let mut result = Vec::new();
    let mut iter = args.iter().map(|s| s.as_ref()).enumerate();

    while let Some((index, s)) = iter.next() {
        let index = index + 1;
        if s == "-" {
            result.push(Arg::Positional(s.to_string(), index));
        } else if s == "--" {
            // The rest of parameters are positionals
            break;
        } else if let Some(long) = s.strip_prefix("--") {
            match long.split_once('=') {
                Some((name, value)) => {
                    result.push(Arg::Long(name.to_string(), Some(value.to_string()), index))
                }
                None => result.push(Arg::Long(long.to_string(), None, index)),
            }
        } else if let Some(cluster) = s.strip_prefix('-') {
            let mut chars = cluster.chars();
            while let Some(c) = chars.next() {
                result.push(Arg::Short(c, chars.as_str().to_string(), index));
            }
        } else {
            result.push(Arg::Positional(s.to_string(), index));
        }
    }

    for (index, s) in iter {
        result.push(Arg::Positional(s.to_string(), index + 1));
    }

    result
}
