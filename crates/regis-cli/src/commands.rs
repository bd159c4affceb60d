use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use colored::Colorize;
use tracing::debug;

use regis_crypto::{PassthroughCipher, SecretBoxCipher, SecretKey};
use regis_format::{CodecRegistry, FormatOptions};
use regis_keychain::Keychain;
use regis_registry::Registry;

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let codecs = CodecRegistry::with_defaults();
    match cli.command {
        Command::Init(args) => cmd_init(&config, args),
        Command::Add(args) => cmd_add(&config, args),
        Command::Change(args) => cmd_change(&config, args),
        Command::Delete(args) => cmd_delete(&config, args),
        Command::Read(args) => cmd_read(&config, args),
        Command::List(args) => cmd_list(&config, args),
        Command::Keygen(args) => cmd_keygen(args),
        Command::Get(args) => cmd_get(&codecs, args),
        Command::Flatten(args) => cmd_flatten(&codecs, args),
        Command::Convert(args) => cmd_convert(&codecs, &config, args),
    }
}

fn cmd_init(config: &CliConfig, args: KeychainArgs) -> anyhow::Result<()> {
    let (mut keychain, path) = keychain_for(config, &args)?;
    init_keychain(&mut keychain, &path)?;
    println!("{} Created keychain {}", "✓".green().bold(), path.display().to_string().bold());
    Ok(())
}

fn cmd_add(config: &CliConfig, args: EntryArgs) -> anyhow::Result<()> {
    let (mut keychain, path) = open_keychain(config, &args.keychain)?;
    add_entry(&mut keychain, &args.name, &args.value)?;
    save(&mut keychain, &path)?;
    println!("{} Added {}", "✓".green().bold(), args.name.yellow());
    Ok(())
}

fn cmd_change(config: &CliConfig, args: EntryArgs) -> anyhow::Result<()> {
    let (mut keychain, path) = open_keychain(config, &args.keychain)?;
    change_entry(&mut keychain, &args.name, &args.value)?;
    save(&mut keychain, &path)?;
    println!("{} Changed {}", "✓".green().bold(), args.name.yellow());
    Ok(())
}

fn cmd_delete(config: &CliConfig, args: NameArgs) -> anyhow::Result<()> {
    let (mut keychain, path) = open_keychain(config, &args.keychain)?;
    delete_entry(&mut keychain, &args.name)?;
    save(&mut keychain, &path)?;
    println!("{} Deleted {}", "✓".green().bold(), args.name.yellow());
    Ok(())
}

fn cmd_read(config: &CliConfig, args: NameArgs) -> anyhow::Result<()> {
    let (keychain, _) = open_keychain(config, &args.keychain)?;
    println!("{}", read_entry(&keychain, &args.name)?);
    Ok(())
}

fn cmd_list(config: &CliConfig, args: ListArgs) -> anyhow::Result<()> {
    let (keychain, _) = open_keychain(config, &args.keychain)?;
    let entries = list_entries(&keychain);
    if entries.is_empty() {
        println!("No entries.");
    }
    for (name, value) in entries {
        if args.print_values {
            println!("{} = {}", name.bold(), value);
        } else {
            println!("{name}");
        }
    }
    Ok(())
}

fn cmd_keygen(args: KeygenArgs) -> anyhow::Result<()> {
    if args.path.exists() && !args.force {
        bail!("{} already exists; pass --force to overwrite", args.path.display());
    }
    let key = SecretKey::generate();
    key.write_to(&args.path)?;
    println!("{} Wrote key {}", "✓".green().bold(), args.path.display().to_string().bold());
    println!("  Fingerprint: {}", key.fingerprint().cyan());
    Ok(())
}

fn cmd_get(codecs: &CodecRegistry, args: GetArgs) -> anyhow::Result<()> {
    let registry = load_registry(codecs, &args.file, args.format.as_deref())?;
    match registry.get(&args.path) {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => bail!("{} is not set in {}", args.path, args.file.display()),
    }
}

fn cmd_flatten(codecs: &CodecRegistry, args: FlattenArgs) -> anyhow::Result<()> {
    let registry = load_registry(codecs, &args.file, args.format.as_deref())?;
    for (path, value) in registry.flatten(Some(&args.separator)) {
        println!("{} = {}", path.bold(), value);
    }
    Ok(())
}

fn cmd_convert(
    codecs: &CodecRegistry,
    config: &CliConfig,
    args: ConvertArgs,
) -> anyhow::Result<()> {
    let Some(to) = args.to.as_deref().or(config.format.as_deref()) else {
        bail!("no output format; pass --to or set `format` in the config");
    };
    let options = FormatOptions {
        pretty_print: args.pretty || config.pretty,
        ..FormatOptions::default()
    };
    let text = convert_file(codecs, &args.file, args.from.as_deref(), to, &options)?;
    print!("{text}");
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Keychain helpers
// ---------------------------------------------------------------------------

/// Build an unloaded keychain from flags, falling back to the config file.
fn keychain_for(config: &CliConfig, args: &KeychainArgs) -> anyhow::Result<(Keychain, PathBuf)> {
    let Some(path) = args.keychain.clone().or_else(|| config.keychain.clone()) else {
        bail!("no keychain file; pass --keychain or set `keychain` in the config");
    };
    if args.plain {
        return Ok((Keychain::new(PassthroughCipher), path));
    }
    let Some(key_file) = args.key_file.as_ref().or(config.key_file.as_ref()) else {
        bail!("no key file; pass --key-file, set `key_file` in the config, or use --plain");
    };
    let key = SecretKey::read_from(key_file)?;
    debug!(fingerprint = %key.fingerprint(), "using secret-box cipher");
    Ok((Keychain::new(SecretBoxCipher::new(&key)), path))
}

fn open_keychain(config: &CliConfig, args: &KeychainArgs) -> anyhow::Result<(Keychain, PathBuf)> {
    let (mut keychain, path) = keychain_for(config, args)?;
    keychain
        .load_keychain(&path)
        .with_context(|| format!("failed to open keychain {}", path.display()))?;
    Ok((keychain, path))
}

fn save(keychain: &mut Keychain, path: &Path) -> anyhow::Result<()> {
    if !keychain.save_keychain(path)? {
        bail!("failed to save keychain {}", path.display());
    }
    Ok(())
}

fn init_keychain(keychain: &mut Keychain, path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    save(keychain, path)
}

fn add_entry(keychain: &mut Keychain, name: &str, value: &str) -> anyhow::Result<()> {
    if keychain.exists(name) {
        bail!("entry `{name}` already exists; use `change` to update it");
    }
    keychain.set(name, value);
    Ok(())
}

fn change_entry(keychain: &mut Keychain, name: &str, value: &str) -> anyhow::Result<()> {
    if !keychain.exists(name) {
        bail!("entry `{name}` does not exist; use `add` to create it");
    }
    keychain.set(name, value);
    Ok(())
}

fn delete_entry(keychain: &mut Keychain, name: &str) -> anyhow::Result<()> {
    if keychain.delete_value(name).is_none() {
        bail!("entry `{name}` does not exist");
    }
    Ok(())
}

fn read_entry(keychain: &Keychain, name: &str) -> anyhow::Result<String> {
    match keychain.get(name) {
        Some(value) => Ok(value.to_string()),
        None => bail!("entry `{name}` does not exist"),
    }
}

/// Every leaf entry as `(path, value)`, in stored order.
fn list_entries(keychain: &Keychain) -> Vec<(String, String)> {
    keychain
        .flatten(None)
        .into_iter()
        .map(|(name, value)| (name, value.to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// Registry file helpers
// ---------------------------------------------------------------------------

fn load_registry(
    codecs: &CodecRegistry,
    file: &Path,
    format: Option<&str>,
) -> anyhow::Result<Registry> {
    let mut registry = Registry::new();
    let options = FormatOptions::new().with_sections().with_array_values();
    match format {
        Some(format) => registry.load_file(codecs, file, format, &options)?,
        None => registry.load_path(codecs, file, &options)?,
    };
    Ok(registry)
}

fn convert_file(
    codecs: &CodecRegistry,
    file: &Path,
    from: Option<&str>,
    to: &str,
    options: &FormatOptions,
) -> anyhow::Result<String> {
    let registry = load_registry(codecs, file, from)?;
    let text = registry
        .to_string_as(codecs, to, options)
        .with_context(|| format!("cannot encode {} as {to}", file.display()))?;
    Ok(text)
}
