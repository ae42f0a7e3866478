use serde::{Deserialize, Serialize};

/// A link to another record.
///
/// Depending on the endpoint the backend sends either the bare id or the
/// populated document; both decode into this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl Reference {
    pub fn id(&self) -> &str {
        match self {
            Reference::Id(id) => id,
            Reference::Populated { id, .. } => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Reference::Id(_) => None,
            Reference::Populated { name, .. } => name.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_accepts_both_shapes() {
        let bare: Reference = serde_json::from_str(r#""b1""#).unwrap();
        assert_eq!(bare.id(), "b1");
        assert_eq!(bare.name(), None);

        let populated: Reference =
            serde_json::from_str(r#"{"_id":"b2","name":"Lagos","description":"HQ"}"#).unwrap();
        assert_eq!(populated.id(), "b2");
        assert_eq!(populated.name(), Some("Lagos"));
    }
}
