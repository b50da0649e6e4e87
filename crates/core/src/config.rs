use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use toml_edit::{value, DocumentMut, Item, Table};
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access config file: {0}")]
    Io(#[from] io::Error),
    #[error("config file is not valid TOML: {0}")]
    Syntax(#[from] toml_edit::TomlError),
    #[error("config file has an invalid value: {0}")]
    Invalid(#[from] toml::de::Error),
}

trait ConfigSerializeDefault {
    fn fix_config(self, name: &str, doc: &mut DocumentMut);
}

macro_rules! impl_simple_default {
    ( $( $type:ty ),* ) => {
        $(
            impl ConfigSerializeDefault for $type {
                fn fix_config(self, name: &str, doc: &mut DocumentMut) {
                    doc.entry(name).or_insert_with(|| value(self));
                }
            }
        )*
    }
}

impl_simple_default!(String, i64, bool);

impl ConfigSerializeDefault for IndexMap<String, String> {
    fn fix_config(self, name: &str, doc: &mut DocumentMut) {
        doc.entry(name).or_insert_with(|| {
            let mut table = Table::new();
            for (key, val) in self {
                table.insert(&key, value(val));
            }
            Item::Table(table)
        });
    }
}

macro_rules! gen_config {
    (
        $( $(#[$meta:meta])* $name:ident: $type:ty = $default:expr ),*
    ) => {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct CloudConfig {
            $(
                $(#[$meta])*
                pub $name: $type,
            )*
        }

        impl Default for CloudConfig {
            fn default() -> Self {
                CloudConfig {
                    $( $name: $default, )*
                }
            }
        }

        impl CloudConfig {
            /// Adds every missing key with its default value to `source`.
            ///
            /// Returns the patched document text and the parsed config.
            pub fn patch(source: &str) -> Result<(String, CloudConfig), ConfigError> {
                let mut doc = source.parse::<DocumentMut>()?;

                $(
                    <$type as ConfigSerializeDefault>::fix_config($default, stringify!($name), &mut doc);
                )*

                let patched = doc.to_string();
                let config = toml::from_str(&patched)?;
                Ok((patched, config))
            }
        }
    };
}

gen_config! {
    /// Printed before every line read by the console.
    prompt: String = "> ".to_string(),
    /// Directory of the rolling log files.
    log_directory: String = "./logs".to_string(),
    /// Match literal command names regardless of case.
    case_insensitive_literals: bool = false,
    /// Command line prefixes rewritten before parsing. A `{}` in the
    /// replacement is substituted with the rest of the line.
    command_aliases: IndexMap<String, String> = IndexMap::new()
}

impl CloudConfig {
    /// Reads `path`, writing back any defaults that were missing.
    ///
    /// A missing file is created with the full default config.
    pub fn load(path: impl AsRef<Path>) -> Result<CloudConfig, ConfigError> {
        let path = path.as_ref();
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err.into()),
        };

        let (patched, config) = Self::patch(&source)?;
        if source != patched {
            info!("Writing default values to {}", path.display());
            fs::write(path, &patched)?;
        }

        Ok(config)
    }
}
