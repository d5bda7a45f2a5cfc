//! Structured keys identifying design ports and their map names.
//!
//! A [`HierKey`] identifies one design port in the registry: the board id
//! followed by the nested container names down to the port. A [`MapKey`] is
//! the key one *assignment* lives under: the same path plus an optional
//! subpin label used when a multi-pin port is decomposed into individually
//! mapped single pins. Both render to the legacy textual forms
//! (`/Top/LED1` and `board:/Top/LED1#Segment_A`) through `Display`, and a
//! `MapKey` parses back from that form, so no use site ever string-splits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hierarchical registry key: board id, then nested container names.
///
/// Equality and ordering are structural; the registry iterates keys in
/// `Ord` order, which makes every "first port" behavior deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HierKey(Vec<String>);

impl HierKey {
    /// Builds a key from the board id and the port's path segments.
    pub fn new(board: impl Into<String>, path: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut segments = vec![board.into()];
        segments.extend(path.into_iter().map(Into::into));
        Self(segments)
    }

    /// The board id (the first segment).
    pub fn board(&self) -> &str {
        &self.0[0]
    }

    /// The path segments below the board id.
    pub fn path(&self) -> &[String] {
        &self.0[1..]
    }

    /// All segments including the board id.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for HierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.board())?;
        for segment in self.path() {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Errors produced when parsing a textual map name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyParseError {
    /// The text has no `:` separating the board id from the path.
    #[error("map name '{0}' has no board separator")]
    MissingBoard(String),
    /// The path part does not start with `/`.
    #[error("map name '{0}' has no absolute path")]
    MissingPath(String),
    /// The path or subpin part is empty.
    #[error("map name '{0}' has an empty component")]
    EmptyComponent(String),
}

/// The key an assignment lives under: board, path, optional subpin label.
///
/// Renders as `board:/seg1/seg2` for a whole-port mapping and
/// `board:/seg1/seg2#label` for one sub-pin of a decomposed port.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MapKey {
    /// The board id.
    pub board: String,
    /// The port's path segments below the board.
    pub path: Vec<String>,
    /// The sub-pin label, present only for decomposed (alternate) mappings.
    pub subpin: Option<String>,
}

impl MapKey {
    /// The whole-port map name for a registry key.
    pub fn whole(key: &HierKey) -> Self {
        Self {
            board: key.board().to_string(),
            path: key.path().to_vec(),
            subpin: None,
        }
    }

    /// The map name of one sub-pin of a decomposed port.
    pub fn subpin(key: &HierKey, label: impl Into<String>) -> Self {
        Self {
            board: key.board().to_string(),
            path: key.path().to_vec(),
            subpin: Some(label.into()),
        }
    }

    /// Recovers the registry key this map name belongs to.
    pub fn hier_key(&self) -> HierKey {
        HierKey::new(self.board.clone(), self.path.iter().cloned())
    }

    /// The path-with-subpin part, e.g. `/Top/DS1#Segment_A`.
    ///
    /// This is the part shown to the user after the resource-type prefix in
    /// display names.
    pub fn path_display(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            out.push('/');
            out.push_str(segment);
        }
        if let Some(subpin) = &self.subpin {
            out.push('#');
            out.push_str(subpin);
        }
        out
    }

    /// Parses the legacy textual form `board:/a/b[#subpin]`.
    pub fn parse(text: &str) -> Result<Self, KeyParseError> {
        let (board, rest) = text
            .split_once(':')
            .ok_or_else(|| KeyParseError::MissingBoard(text.to_string()))?;
        let (path_part, subpin) = match rest.split_once('#') {
            Some((p, s)) => (p, Some(s)),
            None => (rest, None),
        };
        if !path_part.starts_with('/') {
            return Err(KeyParseError::MissingPath(text.to_string()));
        }
        let path: Vec<String> = path_part
            .split('/')
            .skip(1)
            .map(str::to_string)
            .collect();
        if board.is_empty()
            || path.iter().any(String::is_empty)
            || subpin.is_some_and(str::is_empty)
        {
            return Err(KeyParseError::EmptyComponent(text.to_string()));
        }
        Ok(Self {
            board: board.to_string(),
            path,
            subpin: subpin.map(str::to_string),
        })
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.board, self.path_display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hier_key_structure() {
        let key = HierKey::new("FPGA4U", ["Top", "LED1"]);
        assert_eq!(key.board(), "FPGA4U");
        assert_eq!(key.path(), ["Top".to_string(), "LED1".to_string()]);
        assert_eq!(key.to_string(), "FPGA4U:/Top/LED1");
    }

    #[test]
    fn whole_port_display() {
        let key = HierKey::new("FPGA4U", ["LED1"]);
        let name = MapKey::whole(&key);
        assert_eq!(name.to_string(), "FPGA4U:/LED1");
        assert_eq!(name.path_display(), "/LED1");
    }

    #[test]
    fn subpin_display() {
        let key = HierKey::new("FPGA4U", ["DS1"]);
        let name = MapKey::subpin(&key, "Segment_A");
        assert_eq!(name.to_string(), "FPGA4U:/DS1#Segment_A");
    }

    #[test]
    fn parse_roundtrip() {
        for text in ["FPGA4U:/LED1", "FPGA4U:/Top/DS1#Segment_A"] {
            let name = MapKey::parse(text).unwrap();
            assert_eq!(name.to_string(), text);
        }
    }

    #[test]
    fn parse_recovers_hier_key() {
        let name = MapKey::parse("FPGA4U:/Top/DS1#sw_2").unwrap();
        assert_eq!(name.hier_key(), HierKey::new("FPGA4U", ["Top", "DS1"]));
        assert_eq!(name.subpin.as_deref(), Some("sw_2"));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(matches!(
            MapKey::parse("no-separator"),
            Err(KeyParseError::MissingBoard(_))
        ));
        assert!(matches!(
            MapKey::parse("board:relative/path"),
            Err(KeyParseError::MissingPath(_))
        ));
        assert!(matches!(
            MapKey::parse("board://x"),
            Err(KeyParseError::EmptyComponent(_))
        ));
        assert!(matches!(
            MapKey::parse("board:/x#"),
            Err(KeyParseError::EmptyComponent(_))
        ));
    }

    #[test]
    fn ordering_groups_subpins_after_whole() {
        let key = HierKey::new("b", ["p"]);
        let whole = MapKey::whole(&key);
        let sub = MapKey::subpin(&key, "Pin");
        assert!(whole < sub);
    }
}
