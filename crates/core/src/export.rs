//! Comic export snapshot.
//!
//! [`ComicExport`] is the plain serializable document handed to the
//! file-save collaborator: the ordered panel list (number, script, image
//! reference) plus the character roster (name, description). Building it is
//! a pure read/transform over already-loaded data; it performs no I/O.

use serde::Serialize;

/// Default download filename for an exported comic.
pub const EXPORT_FILE_NAME: &str = "comic-export.json";

/// One panel in the export document.
#[derive(Debug, Clone, Serialize)]
pub struct PanelExport {
    pub number: i32,
    pub script: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

/// One character in the export document.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterExport {
    pub name: String,
    pub description: Option<String>,
}

/// The full export document.
#[derive(Debug, Clone, Serialize)]
pub struct ComicExport {
    pub panels: Vec<PanelExport>,
    pub characters: Vec<CharacterExport>,
}

impl ComicExport {
    pub fn new(panels: Vec<PanelExport>, characters: Vec<CharacterExport>) -> Self {
        Self { panels, characters }
    }

    /// Serialize as pretty-printed JSON, matching the downloadable artifact.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ComicExport {
        ComicExport::new(
            vec![
                PanelExport {
                    number: 1,
                    script: Some("New panel".to_string()),
                    image_url: None,
                },
                PanelExport {
                    number: 2,
                    script: Some("The chase begins".to_string()),
                    image_url: Some("https://img.example/p2.png".to_string()),
                },
            ],
            vec![CharacterExport {
                name: "Nova".to_string(),
                description: Some("masked vigilante".to_string()),
            }],
        )
    }

    #[test]
    fn export_preserves_panel_order() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        let numbers: Vec<i64> = json["panels"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["number"].as_i64().unwrap())
            .collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn image_reference_uses_camel_case_key() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert!(json["panels"][1].get("imageUrl").is_some());
        assert_eq!(json["panels"][1]["imageUrl"], "https://img.example/p2.png");
    }

    #[test]
    fn missing_image_serializes_as_null() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert!(json["panels"][0]["imageUrl"].is_null());
    }

    #[test]
    fn characters_carry_name_and_description() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(json["characters"][0]["name"], "Nova");
        assert_eq!(json["characters"][0]["description"], "masked vigilante");
    }
}
