//! CLI argument parsing module
//!
//! This module handles command-line argument parsing and the `cookiekit`
//! entry point. Every command runs the cookie accessor against a JSON jar file.

use crate::config::{ConfigOptions, CookieOptions, Expiration};
use crate::cookies::{CookieValue, Cookies};
use crate::error::CookieError;
use crate::exit_code::{exit_code_for_error, NOT_FOUND};
use crate::store::{CookieSource, FileCookieStore};
use crate::utils::FileUtils;
use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::{self, Write};

/// Main entry point for the CLI application
pub fn run() {
    let matches = create_app().get_matches();
    crate::logging::init(matches.get_flag("verbose"));

    let mut stdout = io::stdout().lock();
    let code = match run_with_args(&matches, &mut stdout) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("cookiekit: error: {:#}", err);
            err.downcast_ref::<CookieError>()
                .map(exit_code_for_error)
                .unwrap_or(1)
        }
    };
    let _ = stdout.flush();
    std::process::exit(code);
}

/// Run a parsed command line, writing results to `out`. Returns the exit code.
pub fn run_with_args(matches: &ArgMatches, out: &mut dyn Write) -> anyhow::Result<i32> {
    let jar_path = match matches.get_one::<String>("jar") {
        Some(path) => FileUtils::expand_path(path)?,
        None => FileUtils::default_jar_path()?,
    };
    let store = FileCookieStore::open(&jar_path)
        .with_context(|| format!("Failed to open cookie jar {}", jar_path.display()))?;
    let mut cookies = Cookies::new(store);
    cookies.config(config_from_args(matches));

    match matches.subcommand() {
        Some(("get", sub)) => {
            let key = required(sub, "key")?;
            match cookies.get(key) {
                Some(value) => {
                    writeln!(out, "{}", value)?;
                    Ok(0)
                }
                None => Ok(NOT_FOUND),
            }
        }
        Some(("set", sub)) => {
            let key = required(sub, "key")?;
            let raw = required(sub, "value")?;
            let value = if sub.get_flag("json") {
                CookieValue::Json(serde_json::from_str(raw).map_err(CookieError::from)?)
            } else {
                CookieValue::from(raw)
            };
            let mut options = CookieOptions::new().secure(sub.get_flag("secure"));
            options.expires = sub.get_one::<Expiration>("expires").cloned();
            options.path = sub.get_one::<String>("path").cloned();
            options.domain = sub.get_one::<String>("domain").cloned();

            if sub.get_flag("dry-run") {
                writeln!(out, "{}", cookies.build_set_line(key, &value, &options)?)?;
            } else {
                cookies.set(key, value, options)?;
                cookies.source().flush()?;
            }
            Ok(0)
        }
        Some(("remove", sub)) => {
            let key = required(sub, "key")?;
            let mut options = CookieOptions::new();
            options.path = sub.get_one::<String>("path").cloned();
            options.domain = sub.get_one::<String>("domain").cloned();
            if cookies.remove(key, options).is_none() {
                return Ok(NOT_FOUND);
            }
            cookies.source().flush()?;
            Ok(0)
        }
        Some(("is-key", sub)) => {
            let found = cookies.is_key(required(sub, "key")?);
            writeln!(out, "{}", found)?;
            Ok(if found { 0 } else { NOT_FOUND })
        }
        Some(("keys", _)) => {
            for key in cookies.keys() {
                writeln!(out, "{}", key)?;
            }
            Ok(0)
        }
        Some(("dump", _)) => {
            writeln!(out, "{}", cookies.source().read_all())?;
            Ok(0)
        }
        _ => Err(CookieError::Config("No command given".to_string()).into()),
    }
}

/// Create the CLI application structure
pub fn create_app() -> Command {
    let expires_arg = |help: &'static str| {
        Arg::new("expires")
            .long("expires")
            .value_name("EXPIRES")
            .help(help)
            .allow_hyphen_values(true)
            .value_parser(|s: &str| s.parse::<Expiration>())
    };
    let key_arg = || {
        Arg::new("key")
            .help("Cookie key")
            .required(true)
            .index(1)
    };

    Command::new("cookiekit")
        .version(crate::VERSION)
        .about("Read and write cookies in a cookie jar file")
        .subcommand_required(true)
        .arg(
            Arg::new("jar")
                .long("jar")
                .value_name("FILE")
                .env("COOKIEKIT_JAR")
                .help("Cookie jar file (default: ~/.cookiekit/jar.json)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(expires_arg(
            "Default expiration: 10d, 2h, 30min, seconds, -1/infinity, or a date",
        ))
        .arg(
            Arg::new("path")
                .long("path")
                .value_name("PATH")
                .help("Default cookie path; an empty string omits the path attribute"),
        )
        .subcommand(
            Command::new("get")
                .about("Print the value of a cookie")
                .arg(key_arg()),
        )
        .subcommand(
            Command::new("set")
                .about("Set a cookie")
                .arg(key_arg())
                .arg(Arg::new("value").help("Cookie value").required(true).index(2))
                .arg(expires_arg("Expiration for this cookie"))
                .arg(Arg::new("path").long("path").value_name("PATH").help("Cookie path"))
                .arg(
                    Arg::new("domain")
                        .long("domain")
                        .value_name("DOMAIN")
                        .help("Cookie domain"),
                )
                .arg(
                    Arg::new("secure")
                        .long("secure")
                        .help("Mark the cookie secure")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Parse VALUE as JSON")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Print the cookie line instead of writing it")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a cookie")
                .arg(key_arg())
                .arg(Arg::new("path").long("path").value_name("PATH").help("Cookie path"))
                .arg(
                    Arg::new("domain")
                        .long("domain")
                        .value_name("DOMAIN")
                        .help("Cookie domain"),
                ),
        )
        .subcommand(
            Command::new("is-key")
                .about("Report whether a cookie exists")
                .arg(key_arg()),
        )
        .subcommand(Command::new("keys").about("List cookie keys"))
        .subcommand(Command::new("dump").about("Print the raw cookie string"))
}

fn config_from_args(matches: &ArgMatches) -> ConfigOptions {
    ConfigOptions {
        expires: matches.get_one::<Expiration>("expires").cloned(),
        path: matches.get_one::<String>("path").cloned(),
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, CookieError> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| CookieError::Config(format!("Missing argument: {}", name)))
}
