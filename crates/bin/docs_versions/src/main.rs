use anyhow::{Context as _, Result, anyhow};
use clap::{Parser, Subcommand};
use docs_versions_config::AppConfig as _;
use docs_versions_registry::{Config, Version, VersionRegistry};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};
use tracing::info;

fn main() {
    let guard = docs_versions_logging::Config::from_environment()
        .and_then(docs_versions_logging::init)
        .expect("error initializing logging");

    if let Err(err) = CommandLine::parse().handle_args() {
        eprintln!("error running docs-versions: {err:?}");
        drop(guard);
        std::process::exit(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    version,
    rename_all = "kebab-case",
)]
struct CommandLine {
    /// Version manifest to load, takes precedence over DOCSVERSIONS_MANIFEST
    #[arg(long, global = true, value_name = "PATH")]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Command {
    /// List all versions, newest first
    List,

    /// Print the record of a version as JSON
    Show {
        #[arg(name = "VERSION")]
        version: Version,
    },

    /// Print the version shown when none is selected
    Default,

    /// Write the registry as JSON for the site
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Single-line output
        #[arg(long)]
        compact: bool,
    },

    /// Load the registry and report whether it is valid
    Check,
}

impl CommandLine {
    fn handle_args(self) -> Result<()> {
        let mut config = Config::from_environment()?;
        if self.manifest.is_some() {
            config.manifest = self.manifest;
        }

        let registry =
            VersionRegistry::load(&config).context("error loading version registry")?;

        let stdout = io::stdout();
        self.command.run(&registry, &mut stdout.lock())
    }
}

impl Command {
    fn run(self, registry: &VersionRegistry, out: &mut impl Write) -> Result<()> {
        match self {
            Self::List => {
                for entry in registry.entries() {
                    let marker = match (entry.is_default, entry.record.prerelease()) {
                        (true, _) => " (default)",
                        (false, true) => " (prerelease)",
                        (false, false) => "",
                    };
                    writeln!(
                        out,
                        "{:<12} {}{}",
                        entry.version.to_string(),
                        entry.record.title(),
                        marker
                    )?;
                }
            }
            Self::Show { version } => {
                let record = registry
                    .get(&version)
                    .ok_or_else(|| anyhow!("version {version} is not registered"))?;
                serde_json::to_writer_pretty(&mut *out, record)?;
                writeln!(out)?;
            }
            Self::Default => {
                let version = registry
                    .default_version()
                    .context("no generally available version is registered")?;
                writeln!(out, "{version}")?;
            }
            Self::Export { output, compact } => match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    let mut writer = BufWriter::new(file);
                    registry.write_json(&mut writer, !compact)?;
                    writeln!(writer)?;
                    writer.flush()?;
                    info!(path = %path.display(), versions = registry.len(), "exported versions");
                }
                None => {
                    registry.write_json(&mut *out, !compact)?;
                    writeln!(out)?;
                }
            },
            Self::Check => {
                info!(
                    versions = registry.len(),
                    default = ?registry.default_version().map(ToString::to_string),
                    latest = ?registry.latest().map(ToString::to_string),
                    "version registry is valid"
                );
                match registry.default_version() {
                    Some(default) => writeln!(
                        out,
                        "ok: {} versions, default {default}",
                        registry.len()
                    )?,
                    None => writeln!(
                        out,
                        "ok: {} versions, no generally available version",
                        registry.len()
                    )?,
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docs_versions_registry::history;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn run(args: &[&str]) -> Result<String> {
        let cli = CommandLine::try_parse_from(
            std::iter::once("docs_versions").chain(args.iter().copied()),
        )?;
        let registry = history::builtin()?;
        let mut out = Vec::new();
        cli.command.run(&registry, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        CommandLine::command().debug_assert();
    }

    #[test]
    fn list() {
        assert_eq!(
            run(&["list"]).unwrap(),
            "4.1.0        4.1.0.Beta1 (prerelease)\n4.0.3        4.0.3 (default)\n"
        );
    }

    #[test]
    fn show() {
        let output: serde_json::Value =
            serde_json::from_str(&run(&["show", "4.1.0"]).unwrap()).unwrap();
        assert_eq!(
            output,
            serde_json::json!({ "version": "4.0.3", "prerelease": true, "title": "4.1.0.Beta1" })
        );
    }

    #[test_case(&["show", "4.2.0"], "version 4.2.0 is not registered")]
    #[test_case(&["show", "4.1"], "invalid value '4.1'")]
    fn show_errors(args: &[&str], message: &str) {
        let err = run(args).unwrap_err();
        assert!(err.to_string().contains(message), "{err}");
    }

    #[test]
    fn default() {
        assert_eq!(run(&["default"]).unwrap(), "4.0.3\n");
    }

    #[test]
    fn check() {
        assert_eq!(run(&["check"]).unwrap(), "ok: 2 versions, default 4.0.3\n");
    }

    #[test]
    fn export_to_stdout() {
        let compact = run(&["export", "--compact"]).unwrap();
        assert_eq!(compact.lines().count(), 1);

        let output: serde_json::Value = serde_json::from_str(&compact).unwrap();
        assert_eq!(output["default"], "4.0.3");
        assert_eq!(output["versions"][0]["version"], "4.1.0");
    }

    #[test]
    fn export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("versions.json");

        let stdout = run(&["export", "--output", path.to_str().unwrap()]).unwrap();
        assert!(stdout.is_empty());

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, history::builtin().unwrap().to_json().unwrap());
    }

    #[test]
    fn manifest_is_a_global_flag() {
        let cli =
            CommandLine::try_parse_from(["docs_versions", "list", "--manifest", "versions.toml"])
                .unwrap();
        assert_eq!(cli.manifest, Some(PathBuf::from("versions.toml")));
        assert_eq!(cli.command, Command::List);
    }
}
