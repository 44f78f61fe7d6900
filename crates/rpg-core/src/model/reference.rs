//! Identidad estructurada de mecánicas: `module:type:id`.
//!
//! Una `Reference` identifica un pipeline (o cualquier mecánica registrable)
//! mediante la tripleta módulo / categoría / identificador. Su forma canónica
//! en string es la clave del `Registry`; dos referencias con la misma
//! tripleta comparan y hashean igual.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

const SEPARATOR: char = ':';
const EXPECTED_PARTS: usize = 3;

/// Identificador único de una mecánica de juego.
///
/// Diseñado para ser extensible: módulos externos pueden acuñar nuevas
/// referencias sin tocar el core.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// Módulo que define la mecánica ("core", "dnd5e", ...).
    pub module: String,
    /// Categoría ("pipeline", "feature", "condition", ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Identificador único dentro del módulo.
    #[serde(rename = "value")]
    pub id: String,
}

impl Reference {
    pub fn new(module: impl Into<String>, kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self { module: module.into(),
               kind: kind.into(),
               id: id.into() }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}{SEPARATOR}{}", self.module, self.kind, self.id)
    }
}

fn is_valid_segment(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

impl FromStr for Reference {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(EngineError::InvalidReference { input: s.to_string(),
                                                       reason: "empty string".to_string() });
        }

        let segments: Vec<&str> = s.split(SEPARATOR).collect();
        if segments.len() != EXPECTED_PARTS {
            return Err(EngineError::InvalidReference {
                input: s.to_string(),
                reason: format!("expected {EXPECTED_PARTS} segments, got {}", segments.len()),
            });
        }

        for segment in &segments {
            if !is_valid_segment(segment) {
                return Err(EngineError::InvalidReference {
                    input: s.to_string(),
                    reason: format!("invalid segment '{segment}'"),
                });
            }
        }

        Ok(Reference::new(segments[0], segments[1], segments[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_canonical_form() {
        let r = Reference::new("test", "pipeline", "attack");
        assert_eq!(r.to_string(), "test:pipeline:attack");
    }

    #[test]
    fn parse_round_trips() {
        let r: Reference = "dnd5e:pipeline:short-rest".parse().expect("valid reference");
        assert_eq!(r, Reference::new("dnd5e", "pipeline", "short-rest"));
        assert_eq!(r.to_string().parse::<Reference>().unwrap(), r);
    }

    #[test]
    fn equal_triples_compare_and_hash_equal() {
        use std::collections::HashMap;

        let a = Reference::new("core", "pipeline", "damage");
        let b = Reference::new("core", "pipeline", "damage");
        assert_eq!(a, b);

        let mut map = HashMap::new();
        map.insert(a, 1);
        assert_eq!(map.get(&b), Some(&1));
    }

    #[test]
    fn parse_rejects_bad_shapes() {
        assert!(matches!("".parse::<Reference>(),
                         Err(EngineError::InvalidReference { .. })));
        assert!(matches!("only:two".parse::<Reference>(),
                         Err(EngineError::InvalidReference { .. })));
        assert!(matches!("a:b:c:d".parse::<Reference>(),
                         Err(EngineError::InvalidReference { .. })));
        assert!(matches!("a::c".parse::<Reference>(),
                         Err(EngineError::InvalidReference { .. })));
        assert!(matches!("a:b:c d".parse::<Reference>(),
                         Err(EngineError::InvalidReference { .. })));
    }

    #[test]
    fn serde_uses_wire_field_names() {
        let r = Reference::new("core", "pipeline", "attack");
        let json = serde_json::to_value(&r).expect("serialize reference");
        assert_eq!(json, serde_json::json!({
            "module": "core",
            "type": "pipeline",
            "value": "attack",
        }));
    }
}
