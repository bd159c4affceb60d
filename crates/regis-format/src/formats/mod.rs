//! Built-in format implementations.

pub(crate) mod ini;
mod json;
mod php;
mod toml;
mod yaml;

pub use self::ini::IniFormat;
pub use self::json::JsonFormat;
pub use self::php::PhpFormat;
pub use self::toml::TomlFormat;
pub use self::yaml::YamlFormat;
