use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "regis",
    about = "Regis: hierarchical configuration registry and encrypted keychain",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: $REGIS_CONFIG, then ./regis.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an empty keychain file
    Init(KeychainArgs),
    /// Add a new keychain entry
    Add(EntryArgs),
    /// Change an existing keychain entry
    Change(EntryArgs),
    /// Delete a keychain entry
    Delete(NameArgs),
    /// Print one keychain entry
    Read(NameArgs),
    /// List keychain entries
    List(ListArgs),
    /// Generate a key file for encrypted keychains
    Keygen(KeygenArgs),
    /// Print the value at a path in a registry file
    Get(GetArgs),
    /// Print every leaf of a registry file as `path = value`
    Flatten(FlattenArgs),
    /// Re-encode a registry file in another format
    Convert(ConvertArgs),
}

/// Keychain location and cipher selection shared by keychain commands.
#[derive(Args, Debug, Clone, Default)]
pub struct KeychainArgs {
    /// Keychain file
    #[arg(long)]
    pub keychain: Option<PathBuf>,

    /// Key file for the secret-box cipher
    #[arg(long, conflicts_with = "plain")]
    pub key_file: Option<PathBuf>,

    /// Store the keychain unencrypted
    #[arg(long)]
    pub plain: bool,
}

#[derive(Args)]
pub struct EntryArgs {
    #[command(flatten)]
    pub keychain: KeychainArgs,
    pub name: String,
    pub value: String,
}

#[derive(Args)]
pub struct NameArgs {
    #[command(flatten)]
    pub keychain: KeychainArgs,
    pub name: String,
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub keychain: KeychainArgs,
    #[arg(long)]
    pub print_values: bool,
}

#[derive(Args)]
pub struct KeygenArgs {
    pub path: PathBuf,
    /// Overwrite an existing key file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct GetArgs {
    pub file: PathBuf,
    pub path: String,
    /// Input format (default: from the file extension)
    #[arg(long)]
    pub format: Option<String>,
}

#[derive(Args)]
pub struct FlattenArgs {
    pub file: PathBuf,
    #[arg(long)]
    pub format: Option<String>,
    #[arg(long, default_value = ".")]
    pub separator: String,
}

#[derive(Args)]
pub struct ConvertArgs {
    pub file: PathBuf,
    /// Output format (default: `format` from the config file)
    #[arg(long)]
    pub to: Option<String>,
    /// Input format (default: from the file extension)
    #[arg(long)]
    pub from: Option<String>,
    #[arg(long)]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::try_parse_from(["regis", "init", "--keychain", "k.kc", "--plain"]).unwrap();
        if let Command::Init(args) = cli.command {
            assert_eq!(args.keychain, Some(PathBuf::from("k.kc")));
            assert!(args.plain);
            assert_eq!(args.key_file, None);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_add() {
        let cli = Cli::try_parse_from([
            "regis", "add", "--keychain", "k.kc", "--key-file", "k.key", "db.password", "s3cret",
        ])
        .unwrap();
        if let Command::Add(args) = cli.command {
            assert_eq!(args.name, "db.password");
            assert_eq!(args.value, "s3cret");
            assert_eq!(args.keychain.key_file, Some(PathBuf::from("k.key")));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_change_and_delete() {
        let cli = Cli::try_parse_from(["regis", "change", "name", "value"]).unwrap();
        assert!(matches!(cli.command, Command::Change(_)));
        let cli = Cli::try_parse_from(["regis", "delete", "name"]).unwrap();
        assert!(matches!(cli.command, Command::Delete(_)));
    }

    #[test]
    fn parse_list_print_values() {
        let cli = Cli::try_parse_from(["regis", "list", "--print-values"]).unwrap();
        if let Command::List(args) = cli.command {
            assert!(args.print_values);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn plain_conflicts_with_key_file() {
        let result =
            Cli::try_parse_from(["regis", "read", "--plain", "--key-file", "k.key", "name"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_keygen() {
        let cli = Cli::try_parse_from(["regis", "keygen", "app.key", "--force"]).unwrap();
        if let Command::Keygen(args) = cli.command {
            assert_eq!(args.path, PathBuf::from("app.key"));
            assert!(args.force);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_get() {
        let cli = Cli::try_parse_from(["regis", "get", "app.json", "db.host"]).unwrap();
        if let Command::Get(args) = cli.command {
            assert_eq!(args.path, "db.host");
            assert_eq!(args.format, None);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_flatten_defaults() {
        let cli = Cli::try_parse_from(["regis", "flatten", "app.yaml"]).unwrap();
        if let Command::Flatten(args) = cli.command {
            assert_eq!(args.separator, ".");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_convert() {
        let cli = Cli::try_parse_from(["regis", "convert", "app.ini", "--to", "yaml", "--pretty"])
            .unwrap();
        if let Command::Convert(args) = cli.command {
            assert_eq!(args.to.as_deref(), Some("yaml"));
            assert!(args.pretty);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli =
            Cli::try_parse_from(["regis", "list", "--verbose", "--config", "regis.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("regis.toml")));
    }
}
