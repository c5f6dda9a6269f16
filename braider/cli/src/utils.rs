use std::path::Path;

use cordframe::{Arrangement, Color};
use serde::{de::DeserializeOwned, Deserialize};

/// A starting [`Arrangement`], which can be written either as a list of colour names (e.g.
/// `start = ["R", "B", "G", "Y"]`) or as one whitespace-separated string (`start = "R B G Y"`)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ArrangementSpec {
    Names(Vec<Color>),
    String(String),
}

impl ArrangementSpec {
    pub fn to_arrangement(&self) -> anyhow::Result<Arrangement> {
        match self {
            Self::Names(colors) => Ok(Arrangement::new(colors.clone())),
            Self::String(s) => Arrangement::parse(s)
                .map_err(|e| anyhow::Error::msg(format!("Can't parse start {:?}: {}", s, e))),
        }
    }
}

/// Attempt to read a file as a [`String`], returning a helpful error message on failure
pub fn read_file_to_string(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::Error::msg(format!("Can't open {:?}: {}", path, e)))
}

/// Attempt to parse a request file, returning a helpful error message on failure
pub fn parse_toml<T: DeserializeOwned>(s: &str) -> anyhow::Result<T> {
    toml::from_str(s).map_err(|e| anyhow::Error::msg(format!("Error parsing request file: {}", e)))
}
