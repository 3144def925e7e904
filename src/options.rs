//! Options parsing and handling.

use crate::argparse::{parse_args, Arg, ArgRef};
use crate::extract::Variant;
use itertools::Itertools;
use lazy_static::lazy_static;
use log::warn;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::iter::Peekable;
use std::path::Path;

/// How results are printed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per call site.
    Text,
    /// A JSON array of call sites.
    Json,
}

/// Parsed options.
#[derive(Clone, Debug)]
pub struct Options {
    /// Root paths to scan.
    pub paths: Vec<String>,
    /// Name of the notification function (eg. "toast").
    pub identifier: String,
    /// Members recognized after the identifier (eg. `toast.error`).
    pub variants: Vec<Variant>,
    /// File name suffixes to scan, including the leading dot.
    pub extensions: BTreeSet<String>,
    /// Directories whose path contains one of these strings are skipped.
    pub excluded_markers: BTreeSet<String>,
    /// Argument summaries longer than this many characters are truncated.
    pub summary_max_length: usize,
    /// Ignore calls inside string literals and comments.
    pub skip_literals: bool,
    /// Honour .gitignore files and skip hidden files.
    pub respect_gitignore: bool,

    /// Output format.
    pub format: OutputFormat,
    /// Force colors on or off. None means color when stdout is a terminal.
    pub color: Option<bool>,
}

#[derive(Clone, Debug)]
enum OptionCommand {
    Identifier(String),
    Variants(Vec<Variant>),
    AddExtension(String),
    RemoveExtension(String),
    AddExclude(String),
    RemoveExclude(String),
    MaxLength(usize),
    SkipLiterals,
    Gitignore,
    Json,
    Color(bool),
    PrintOptionsAndQuit,
}

/// Lexical settings of a language, used to find string literals and comments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageSettings {
    /// Strings which start and end a string literal (eg. "'"), in matching priority.
    pub string_delimiters: Vec<String>,
    /// Delimiters from `string_delimiters` whose literals may span several lines.
    pub multiline_strings: Vec<String>,
    /// Strings which start a single-line comment (eg. "//").
    pub single_line_comments: Vec<String>,
    /// Strings which start and end a multi-line comment (eg. ("/*", "*/")).
    pub multi_line_comments: Vec<(String, String)>,
}

impl Default for LanguageSettings {
    fn default() -> LanguageSettings {
        LanguageSettings {
            string_delimiters: vec!["\"".to_string(), "'".to_string()],
            multiline_strings: Vec::new(),
            single_line_comments: vec!["//".to_string()],
            multi_line_comments: vec![("/*".to_string(), "*/".to_string())],
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct Defaults {
    extensions: Vec<String>,
    strings: Vec<String>,
    #[serde(default)]
    multiline_strings: Vec<String>,
    single_comments: Vec<String>,
    multi_comments: Vec<(String, String)>,
}

const BUILTIN_DATABASE: &str = include_str!("../config.json");

/// Default identifier.
pub const DEFAULT_IDENTIFIER: &str = "toast";
/// Default file name suffixes.
pub const DEFAULT_EXTENSIONS: [&str; 4] = [".tsx", ".ts", ".js", ".jsx"];
/// Default excluded directory markers.
pub const DEFAULT_EXCLUDED_MARKERS: [&str; 2] = ["node_modules", ".git"];
/// Default summary truncation threshold.
pub const DEFAULT_SUMMARY_MAX_LENGTH: usize = 100;

lazy_static! {
    static ref PARSED_DB: BTreeMap<String, Defaults> = serde_json::from_str(BUILTIN_DATABASE)
        .unwrap_or_else(|e| {
            warn!("Built-in JSON database has a syntax error: {}", e);
            BTreeMap::new()
        });
    static ref EXTENSION_TO_SETTINGS: HashMap<String, LanguageSettings> = {
        let mut res = HashMap::new();

        for ty in PARSED_DB.values() {
            let settings = LanguageSettings {
                string_delimiters: ty.strings.clone(),
                multiline_strings: ty.multiline_strings.clone(),
                single_line_comments: ty.single_comments.clone(),
                multi_line_comments: ty.multi_comments.clone(),
            };

            for ext in &ty.extensions {
                res.insert(ext.to_string(), settings.clone());
            }
        }

        res
    };
    static ref DEFAULT_SETTINGS: LanguageSettings = LanguageSettings::default();
}

/// Lexical settings for `path`, chosen by its extension.
///
/// ```
/// use std::path::Path;
/// use toastscan::options::language_settings;
/// let settings = language_settings(Path::new("src/App.tsx"));
/// assert!(settings.string_delimiters.contains(&"`".to_string()));
/// ```
pub fn language_settings(path: &Path) -> &'static LanguageSettings {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| EXTENSION_TO_SETTINGS.get(ext))
        .unwrap_or(&*DEFAULT_SETTINGS)
}

impl Default for Options {
    fn default() -> Options {
        Options {
            paths: Vec::new(),
            identifier: DEFAULT_IDENTIFIER.to_string(),
            variants: Variant::MEMBERS.to_vec(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            excluded_markers: DEFAULT_EXCLUDED_MARKERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            summary_max_length: DEFAULT_SUMMARY_MAX_LENGTH,
            skip_literals: false,
            respect_gitignore: false,

            format: OutputFormat::Text,
            color: None,
        }
    }
}

fn print_help(long: bool, status: i32) -> ! {
    let filename = std::env::args()
        .next()
        .unwrap_or_else(|| "toastscan".to_string());
    if !long {
        println!(
            "Usage: {} [OPTION]... [PATH]...
Pass --help for more information.",
            filename
        );
    } else {
        println!(
            r#"Usage: {} [OPTION]... [PATH]...
Find notification calls (toast(...), toast.error(...), ...) in PATHs.
PATH defaults to the current directory.

Options:
  -h, --help                  Display this message
  -i, --identifier NAME       Name of the notification function (default: {})
  --variants LIST             Comma-separated members to detect
                              (default: {})

  -e, --[no-]ext EXT          Add or remove EXT from scanned file suffixes
  -x, --[no-]exclude MARKER   Add or remove MARKER from excluded directory markers
  --gitignore                 Honour .gitignore files and skip hidden files

  -n, --max-length N          Truncate argument summaries to N characters
  -s, --skip-literals         Ignore calls inside string literals and comments
  --json                      Print results as JSON
  --[no-]color                Force colored output on or off
  --options                   Print what options would have been used
"#,
            filename,
            DEFAULT_IDENTIFIER,
            Variant::MEMBERS.iter().join(",")
        );
    }
    std::process::exit(status)
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    print_help(false, 2)
}

fn print_options(options: Options) -> ! {
    println!(
        r#"Using following options:
- Identifier: {}
- Variants: {}
- Extensions: {}
- Excluded directory markers: {}
- Summary length: {}
- Skip literals: {}
- Respect .gitignore: {}
Known languages for --skip-literals:"#,
        options.identifier,
        options.variants.iter().join(", "),
        options.extensions.iter().join(", "),
        options.excluded_markers.iter().join(", "),
        options.summary_max_length,
        options.skip_literals,
        options.respect_gitignore,
    );
    for (lang, defs) in PARSED_DB.iter() {
        println!("- {} [{}]", lang, defs.extensions.join(", "));
    }

    std::process::exit(0);
}

fn get_whole_arg<I: Iterator<Item = Arg>>(iter: &mut Peekable<I>) -> Option<String> {
    let arg = iter.next()?;
    let index = arg.index();
    while iter.peek().map(|a| a.index()) == Some(index) {
        iter.next();
    }
    Some(arg.entire_match())
}

/// Value of a flag: `--flag=value`, `-fvalue` or the following argument.
fn get_value<I: Iterator<Item = Arg>>(arg: &Arg, iter: &mut Peekable<I>) -> Option<String> {
    match arg {
        Arg::Long(_, Some(value), _) => Some(value.clone()),
        Arg::Short(_, rest, index) if !rest.is_empty() => {
            while iter.peek().map(|a| a.index()) == Some(*index) {
                iter.next();
            }
            Some(rest.clone())
        }
        _ => get_whole_arg(iter),
    }
}

fn require_value<I: Iterator<Item = Arg>>(
    arg: &Arg,
    iter: &mut Peekable<I>,
    flag: &str,
) -> String {
    get_value(arg, iter).unwrap_or_else(|| usage_error(&format!("Missing argument for {}", flag)))
}

fn parse_variants(list: &str) -> Vec<Variant> {
    let mut variants: Vec<Variant> = Vec::new();
    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match name.parse::<Variant>() {
            Ok(Variant::Default) => {}
            Ok(variant) => {
                if !variants.contains(&variant) {
                    variants.push(variant);
                }
            }
            Err(e) => usage_error(&format!(
                "{}, expected one of: {}",
                e,
                Variant::MEMBERS.iter().join(", ")
            )),
        }
    }
    variants
}

fn normalize_extension(ext: String) -> String {
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

fn parse_options<S: AsRef<str>>(args: &[S]) -> (Vec<OptionCommand>, Vec<String>) {
    let mut opts = Vec::new();
    let mut positionals = Vec::new();
    let parsed = parse_args(args.get(1..).unwrap_or_default());
    let mut arg_iter = parsed.into_iter().peekable();

    while let Some(arg) = arg_iter.next() {
        let cmd = match arg.as_ref() {
            ArgRef::Short('h') => print_help(false, 0),
            ArgRef::Long("help") => print_help(true, 0),

            ArgRef::Short('i') | ArgRef::Long("identifier") => {
                let name = require_value(&arg, &mut arg_iter, "--identifier");
                if name.is_empty() {
                    usage_error("The identifier must not be empty");
                }
                OptionCommand::Identifier(name)
            }
            ArgRef::Long("variants") => {
                let list = require_value(&arg, &mut arg_iter, "--variants");
                OptionCommand::Variants(parse_variants(&list))
            }

            ArgRef::Short('e') | ArgRef::Long("ext") => OptionCommand::AddExtension(
                normalize_extension(require_value(&arg, &mut arg_iter, "--ext")),
            ),
            ArgRef::Long("no-ext") => OptionCommand::RemoveExtension(normalize_extension(
                require_value(&arg, &mut arg_iter, "--no-ext"),
            )),

            ArgRef::Short('x') | ArgRef::Long("exclude") => {
                OptionCommand::AddExclude(require_value(&arg, &mut arg_iter, "--exclude"))
            }
            ArgRef::Long("no-exclude") => {
                OptionCommand::RemoveExclude(require_value(&arg, &mut arg_iter, "--no-exclude"))
            }

            ArgRef::Short('n') | ArgRef::Long("max-length") => {
                let value = require_value(&arg, &mut arg_iter, "--max-length");
                match value.parse::<usize>() {
                    Ok(n) => OptionCommand::MaxLength(n),
                    Err(e) => usage_error(&format!("Invalid --max-length '{}': {}", value, e)),
                }
            }

            ArgRef::Short('s') | ArgRef::Long("skip-literals") => OptionCommand::SkipLiterals,
            ArgRef::Long("gitignore") => OptionCommand::Gitignore,
            ArgRef::Long("json") => OptionCommand::Json,
            ArgRef::Long("color") => OptionCommand::Color(true),
            ArgRef::Long("no-color") => OptionCommand::Color(false),

            ArgRef::Long("options") => OptionCommand::PrintOptionsAndQuit,

            ArgRef::Positional => {
                positionals.push(arg.entire_match());
                continue;
            }

            ArgRef::Short(s) => usage_error(&format!("Unknown flag: -{}", s)),
            ArgRef::Long(s) => usage_error(&format!("Unknown flag: --{}", s)),
        };
        opts.push(cmd);
    }

    (opts, positionals)
}

impl Options {
    /// Parse options from `args`. The first element is the program name.
    ///
    /// ```
    /// use toastscan::options::Options;
    /// let options = Options::new(&["toastscan", "-i", "notify", "src"]);
    /// assert_eq!(options.identifier, "notify");
    /// assert_eq!(options.paths, vec!["src"]);
    /// assert_eq!(options.skip_literals, false);
    /// ```
    pub fn new<S: AsRef<str>>(args: &[S]) -> Options {
        let (cmds, positionals) = parse_options(args);
        let mut opts = Options::default();
        let mut print_and_quit = false;

        for cmd in cmds {
            match cmd {
                OptionCommand::Identifier(name) => opts.identifier = name,
                OptionCommand::Variants(variants) => opts.variants = variants,
                OptionCommand::AddExtension(ext) => {
                    opts.extensions.insert(ext);
                }
                OptionCommand::RemoveExtension(ext) => {
                    opts.extensions.remove(&ext);
                }
                OptionCommand::AddExclude(marker) => {
                    opts.excluded_markers.insert(marker);
                }
                OptionCommand::RemoveExclude(marker) => {
                    opts.excluded_markers.remove(&marker);
                }
                OptionCommand::MaxLength(n) => opts.summary_max_length = n,
                OptionCommand::SkipLiterals => opts.skip_literals = true,
                OptionCommand::Gitignore => opts.respect_gitignore = true,
                OptionCommand::Json => opts.format = OutputFormat::Json,
                OptionCommand::Color(on) => opts.color = Some(on),
                OptionCommand::PrintOptionsAndQuit => print_and_quit = true,
            }
        }

        if print_and_quit {
            print_options(opts);
        }

        opts.paths = if positionals.is_empty() {
            vec!["./".to_string()]
        } else {
            positionals
        };

        opts
    }

    /// Does the file name of `path` end in one of the scanned suffixes?
    ///
    /// ```
    /// use std::path::Path;
    /// use toastscan::options::Options;
    /// let options = Options::default();
    /// assert!(options.is_source_file(Path::new("src/App.tsx")));
    /// assert!(!options.is_source_file(Path::new("src/App.css")));
    /// ```
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| {
            let name = name.to_string_lossy();
            self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
        })
    }

    /// Does `dir` contain one of the excluded directory markers?
    ///
    /// ```
    /// use std::path::Path;
    /// use toastscan::options::Options;
    /// let options = Options::default();
    /// assert!(options.is_excluded_dir(Path::new("web/node_modules/react")));
    /// assert!(!options.is_excluded_dir(Path::new("web/src")));
    /// ```
    pub fn is_excluded_dir(&self, dir: &Path) -> bool {
        let dir = dir.to_string_lossy();
        self.excluded_markers
            .iter()
            .any(|marker| dir.contains(marker.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_options() {
        let options = Options::new(&["toastscan", "src"]);
        assert_eq!(options.identifier, "toast");
        assert_eq!(options.paths, vec!["src"]);
        assert_eq!(options.variants, Variant::MEMBERS.to_vec());
        assert_eq!(options.summary_max_length, 100);
        assert_eq!(options.format, OutputFormat::Text);
        assert_eq!(options.color, None);
    }

    #[test]
    fn default_path() {
        let options = Options::new(&["toastscan"]);
        assert_eq!(options.paths, vec!["./"]);
    }

    #[test]
    fn flags() {
        let options = Options::new(&[
            "toastscan",
            "--identifier=notify",
            "--variants",
            "error, warning,error",
            "-e",
            "vue",
            "--no-ext",
            ".jsx",
            "-x",
            "dist",
            "--no-exclude=.git",
            "-sn",
            "40",
            "--json",
            "--no-color",
            "a",
            "b",
        ]);
        assert_eq!(options.identifier, "notify");
        assert_eq!(options.variants, vec![Variant::Error, Variant::Warning]);
        assert_eq!(
            options.extensions.iter().collect::<Vec<_>>(),
            vec![".js", ".ts", ".tsx", ".vue"]
        );
        assert_eq!(
            options.excluded_markers.iter().collect::<Vec<_>>(),
            vec!["dist", "node_modules"]
        );
        assert!(options.skip_literals);
        assert_eq!(options.summary_max_length, 40);
        assert_eq!(options.format, OutputFormat::Json);
        assert_eq!(options.color, Some(false));
        assert_eq!(options.paths, vec!["a", "b"]);
    }

    #[test]
    fn attached_short_value() {
        let options = Options::new(&["toastscan", "-n80", "-inotify"]);
        assert_eq!(options.summary_max_length, 80);
        assert_eq!(options.identifier, "notify");
    }

    #[test]
    fn source_files() {
        let options = Options::default();
        assert!(options.is_source_file(Path::new("a/b.ts")));
        assert!(options.is_source_file(Path::new("a/b.d.ts")));
        assert!(options.is_source_file(Path::new("b.jsx")));
        assert!(!options.is_source_file(Path::new("b.json")));
        assert!(!options.is_source_file(Path::new("ts")));
    }

    #[test]
    fn excluded_dirs() {
        let options = Options::default();
        assert!(options.is_excluded_dir(Path::new("./node_modules")));
        assert!(options.is_excluded_dir(Path::new("./.git/objects")));
        assert!(options.is_excluded_dir(Path::new("/home/me/.github")));
        assert!(!options.is_excluded_dir(Path::new("./src/components")));
    }

    #[test]
    fn language_lookup() {
        let ts = language_settings(Path::new("a.tsx"));
        assert_eq!(ts.multiline_strings, vec!["`"]);
        let py = language_settings(Path::new("a.py"));
        assert_eq!(py.single_line_comments, vec!["#"]);
        assert_eq!(
            language_settings(Path::new("Makefile")),
            &LanguageSettings::default()
        );
    }

    #[test]
    fn builtin_json_is_valid() {
        serde_json::from_str::<BTreeMap<String, Defaults>>(BUILTIN_DATABASE).unwrap();
    }
}
