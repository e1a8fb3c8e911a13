// src/models/ids.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Os routers relacionais devolvem ids inteiros; os de documento (pipeline,
// notas, anexos) devolvem ObjectId em string. Guardamos a forma original para
// mandar de volta do mesmo jeito.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("id vazio".to_string());
        }
        Ok(match s.parse::<i64>() {
            Ok(n) => RecordId::Number(n),
            Err(_) => RecordId::Text(s.to_string()),
        })
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Number(n)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RecordId::Number(n) => serializer.serialize_i64(*n),
            RecordId::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => RecordId::Number(n),
            Raw::Text(s) => RecordId::Text(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numbers_and_strings() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[7, "65f1c0ffee"]"#).unwrap();
        assert_eq!(ids[0], RecordId::Number(7));
        assert_eq!(ids[1], RecordId::Text("65f1c0ffee".into()));
    }

    #[test]
    fn keeps_original_shape_on_the_wire() {
        assert_eq!(serde_json::to_string(&RecordId::Number(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&RecordId::Text("abc".into())).unwrap(), r#""abc""#);
    }

    #[test]
    fn parses_cli_arguments() {
        assert_eq!("42".parse::<RecordId>().unwrap(), RecordId::Number(42));
        assert_eq!("65f1".parse::<RecordId>().unwrap(), RecordId::Text("65f1".into()));
        assert!("  ".parse::<RecordId>().is_err());
    }
}
