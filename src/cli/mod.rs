//! Command-line interface.

pub mod output;

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use clap::{Command, CommandFactory, Parser};

use crate::core::constants::native_kdf_iterations;
use crate::core::locator::ConfigLocator;
use crate::core::pipeline::Pipeline;
use crate::core::store;
use crate::core::types::{PasswordSource, RunConfig};
use crate::error::Result;

/// Sigkey - recover the Signal Desktop database key.
#[derive(Parser, Debug)]
#[command(
    name = "sigkey",
    about = "Recover the Signal Desktop database key from the OS secret store",
    version,
    after_help = "The key goes to stdout unless --output is given. Unrecognized flags are ignored."
)]
pub struct Cli {
    /// Write the key to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print progress on stderr (never the key)
    #[arg(short, long)]
    pub verbose: bool,

    /// Signal config.json to read instead of the platform default
    #[arg(short, long, value_name = "PATH", env = "SIGKEY_CONFIG")]
    pub config: Option<PathBuf>,

    /// File holding the safe-storage password, bypassing the OS secret store
    #[arg(short, long, value_name = "PATH", env = "SIGKEY_PASSWORD_FILE")]
    pub password_file: Option<PathBuf>,

    /// PBKDF2 rounds for --password-file [default: 1003 on macOS, 1 elsewhere]
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub iterations: Option<u32>,
}

impl Cli {
    /// Freeze the parsed arguments into the run configuration.
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            output: self.output.clone(),
            verbose: self.verbose,
            config: self.config.clone(),
            password: self.password_file.clone().map(|path| PasswordSource {
                path,
                iterations: self.iterations.unwrap_or_else(native_kdf_iterations),
            }),
        }
    }
}

/// How a recognized token relates to the argument that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// A flag, or an option carrying its value inline.
    Complete,
    /// An option whose value is the next argument, by long name.
    NeedsValue(String),
}

/// Arguments split into what `Cli` understands and what it does not.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Retained {
    pub args: Vec<OsString>,
    pub ignored: Vec<OsString>,
}

/// Drop arguments `Cli` does not recognize.
///
/// An option always takes the next argument as its value, even when it
/// looks like a flag, and is dropped when there is none. The first element
/// is the binary name and is always kept.
pub fn retain_known<I, T>(args: I) -> Retained
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut cmd = Cli::command();
    cmd.build();

    let mut args = args.into_iter().map(Into::into);
    let mut retained = Retained {
        args: args.next().into_iter().collect(),
        ignored: Vec::new(),
    };

    while let Some(arg) = args.next() {
        let token = arg.to_str().and_then(|text| classify(&cmd, text));
        match token {
            Some(Token::Complete) => retained.args.push(arg),
            Some(Token::NeedsValue(long)) => match args.next() {
                Some(value) => {
                    let mut joined = OsString::from(format!("--{long}="));
                    joined.push(value);
                    retained.args.push(joined);
                }
                None => retained.ignored.push(arg),
            },
            None => retained.ignored.push(arg),
        }
    }

    retained
}

fn classify(cmd: &Command, text: &str) -> Option<Token> {
    if let Some(long) = text.strip_prefix("--") {
        let (name, inline) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };
        let arg = cmd.get_arguments().find(|a| a.get_long() == Some(name))?;
        return match (arg.get_action().takes_values(), inline) {
            (true, true) => Some(Token::Complete),
            (true, false) => Some(Token::NeedsValue(name.to_string())),
            (false, false) => Some(Token::Complete),
            (false, true) => None,
        };
    }

    let mut chars = text.strip_prefix('-')?.chars();
    let short = chars.next()?;
    let rest = chars.as_str();
    let arg = cmd.get_arguments().find(|a| a.get_short() == Some(short))?;
    match (arg.get_action().takes_values(), rest.is_empty()) {
        (true, true) => arg
            .get_long()
            .map(|long| Token::NeedsValue(long.to_string())),
        (true, false) => Some(Token::Complete),
        (false, true) => Some(Token::Complete),
        (false, false) => None,
    }
}

/// Run the extraction for `config`, writing the key to stdout or a file.
pub fn execute(config: &RunConfig) -> Result<()> {
    let locator = ConfigLocator::new(config.config.clone());
    let backend = store::default_backend(config, &locator);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    Pipeline::new(locator, backend).run(config.output.as_deref(), &mut handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(retain_known(args.iter().copied()).args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["sigkey"]);
        assert!(!cli.verbose);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_short_and_long_flags() {
        let cli = parse(&["sigkey", "-v", "-o", "key.txt"]);
        assert!(cli.verbose);
        assert_eq!(cli.output, Some(PathBuf::from("key.txt")));

        let cli = parse(&["sigkey", "--verbose", "--output", "key.txt"]);
        assert!(cli.verbose);
        assert_eq!(cli.output, Some(PathBuf::from("key.txt")));
    }

    #[test]
    fn test_inline_values() {
        let cli = parse(&["sigkey", "--output=key.txt", "-cconfig.json"]);
        assert_eq!(cli.output, Some(PathBuf::from("key.txt")));
        assert_eq!(cli.config, Some(PathBuf::from("config.json")));
    }

    #[test]
    fn test_unknown_flags_ignored() {
        let cli = parse(&["sigkey", "--frobnicate", "-x", "stray", "-v", "-o", "key.txt"]);
        assert!(cli.verbose);
        assert_eq!(cli.output, Some(PathBuf::from("key.txt")));
    }

    #[test]
    fn test_dangling_output_ignored() {
        let cli = parse(&["sigkey", "-v", "-o"]);
        assert!(cli.verbose);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_option_value_may_look_like_a_flag() {
        let cli = parse(&["sigkey", "-o", "-v"]);
        assert!(!cli.verbose);
        assert_eq!(cli.output, Some(PathBuf::from("-v")));

        let cli = parse(&["sigkey", "--output", "--frobnicate", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.output, Some(PathBuf::from("--frobnicate")));
    }

    #[test]
    fn test_ignored_arguments_are_reported() {
        let retained = retain_known(["sigkey", "--frobnicate", "-v", "stray", "-o"]);
        assert_eq!(
            retained.args,
            vec![OsString::from("sigkey"), OsString::from("-v")]
        );
        assert_eq!(
            retained.ignored,
            vec![
                OsString::from("--frobnicate"),
                OsString::from("stray"),
                OsString::from("-o"),
            ]
        );
    }

    #[test]
    fn test_flag_with_inline_value_ignored() {
        let retained = retain_known(["sigkey", "--verbose=yes"]);
        assert_eq!(retained.args, vec![OsString::from("sigkey")]);
        assert_eq!(retained.ignored, vec![OsString::from("--verbose=yes")]);
    }

    #[test]
    fn test_help_is_recognized() {
        let retained = retain_known(["sigkey", "--help"]);
        assert_eq!(retained.args.len(), 2);
    }

    #[test]
    fn test_run_config_password_source() {
        let cli = parse(&["sigkey", "-p", "pw.txt", "--iterations", "1003"]);
        let config = cli.run_config();
        assert_eq!(
            config.password,
            Some(PasswordSource {
                path: PathBuf::from("pw.txt"),
                iterations: 1003,
            })
        );
    }

    #[test]
    fn test_run_config_native_iterations() {
        let config = parse(&["sigkey", "--password-file", "pw.txt"]).run_config();
        assert_eq!(
            config.password.map(|p| p.iterations),
            Some(native_kdf_iterations())
        );
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(Cli::try_parse_from(["sigkey", "-p", "pw.txt", "--iterations", "0"]).is_err());
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
