use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Body of the classification POST: the image as raw base64,
/// without the data-URL prefix.
#[derive(Serialize, Deserialize, Clone)]
pub struct ClassifyRequest {
    pub image: String,
}

/// What the classification endpoint sends back. Both fields are
/// optional on the wire; missing ones get defaults on conversion.
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct ClassifyResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default, Display, EnumString)]
pub enum VenomStatus {
    #[strum(serialize = "Venomous")]
    Venomous,
    #[serde(rename = "Mildly Venomous")]
    #[strum(serialize = "Mildly Venomous")]
    MildlyVenomous,
    #[serde(rename = "Not Venomous")]
    #[strum(serialize = "Not Venomous")]
    NotVenomous,
    #[default]
    #[strum(serialize = "Unknown")]
    Unknown,
}

/// Badge styling for a venom status.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct StatusDisplay {
    pub background: &'static str,
    pub text: &'static str,
    pub icon: &'static str,
}

impl VenomStatus {
    /// Parses a wire label, treating anything unrecognized as `Unknown`.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(VenomStatus::Unknown)
    }

    /// Fixed lookup from status to badge colors and icon. Total; every
    /// status renders as something, with a neutral gray default.
    pub fn display(self) -> StatusDisplay {
        match self {
            VenomStatus::Venomous => StatusDisplay {
                background: "#8b0000",
                text: "#ffffff",
                icon: "fa-solid fa-triangle-exclamation",
            },
            VenomStatus::MildlyVenomous => StatusDisplay {
                background: "#ffd700",
                text: "#000000",
                icon: "fa-solid fa-shield",
            },
            VenomStatus::NotVenomous => StatusDisplay {
                background: "#228b22",
                text: "#000000",
                icon: "fa-solid fa-shield-heart",
            },
            VenomStatus::Unknown => StatusDisplay {
                background: "#6b7280",
                text: "#ffffff",
                icon: "fa-solid fa-shield",
            },
        }
    }
}

/// The verdict shown to the user once a classification resolves.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct SnakeReport {
    pub status: VenomStatus,
    pub description: String,
}

impl SnakeReport {
    /// Fallback for any transport or parse failure. Deliberately looks
    /// like a normal result rather than an error banner.
    pub fn request_failed() -> Self {
        Self {
            status: VenomStatus::Unknown,
            description: "Error identifying snake. Please try again.".to_string(),
        }
    }
}

impl From<ClassifyResponse> for SnakeReport {
    fn from(response: ClassifyResponse) -> Self {
        Self {
            status: response
                .status
                .as_deref()
                .map(VenomStatus::from_label)
                .unwrap_or_default(),
            description: response
                .description
                .unwrap_or_else(|| "Unable to identify snake".to_string()),
        }
    }
}

/// Strips the `data:<mime>;base64,` prefix from a data URL, leaving the
/// raw base64 payload. A string with no prefix passes through unchanged.
pub fn data_url_payload(data_url: &str) -> &str {
    data_url
        .split_once(',')
        .map(|(_, payload)| payload)
        .unwrap_or(data_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_strum() {
        for status in [
            VenomStatus::Venomous,
            VenomStatus::MildlyVenomous,
            VenomStatus::NotVenomous,
            VenomStatus::Unknown,
        ] {
            assert_eq!(VenomStatus::from_label(&status.to_string()), status);
        }
    }

    #[test]
    fn unrecognized_labels_become_unknown() {
        assert_eq!(VenomStatus::from_label("Highly Venomous"), VenomStatus::Unknown);
        assert_eq!(VenomStatus::from_label("venomous"), VenomStatus::Unknown);
        assert_eq!(VenomStatus::from_label(""), VenomStatus::Unknown);
    }

    #[test]
    fn display_table_matches_badge_colors() {
        let venomous = VenomStatus::Venomous.display();
        assert_eq!(venomous.background, "#8b0000");
        assert_eq!(venomous.text, "#ffffff");
        assert_eq!(venomous.icon, "fa-solid fa-triangle-exclamation");

        let mild = VenomStatus::MildlyVenomous.display();
        assert_eq!(mild.background, "#ffd700");
        assert_eq!(mild.text, "#000000");

        let safe = VenomStatus::NotVenomous.display();
        assert_eq!(safe.background, "#228b22");
        assert_eq!(safe.text, "#000000");
    }

    #[test]
    fn unknown_status_gets_the_gray_default() {
        let display = VenomStatus::Unknown.display();
        assert_eq!(display.background, "#6b7280");
        assert_eq!(display.text, "#ffffff");
        assert_eq!(display.icon, "fa-solid fa-shield");
    }

    #[test]
    fn empty_response_defaults_both_fields() {
        let response: ClassifyResponse = serde_json::from_str("{}").unwrap();
        let report = SnakeReport::from(response);
        assert_eq!(report.status, VenomStatus::Unknown);
        assert_eq!(report.description, "Unable to identify snake");
    }

    #[test]
    fn populated_response_carries_through() {
        let response: ClassifyResponse =
            serde_json::from_str(r#"{"status":"Venomous","description":"Test"}"#).unwrap();
        let report = SnakeReport::from(response);
        assert_eq!(report.status, VenomStatus::Venomous);
        assert_eq!(report.description, "Test");
    }

    #[test]
    fn unexpected_response_fields_are_ignored() {
        let response: ClassifyResponse =
            serde_json::from_str(r#"{"status":"Not Venomous","confidence":0.9}"#).unwrap();
        assert_eq!(SnakeReport::from(response).status, VenomStatus::NotVenomous);
    }

    #[test]
    fn request_failed_report_is_fixed() {
        let report = SnakeReport::request_failed();
        assert_eq!(report.status, VenomStatus::Unknown);
        assert_eq!(report.description, "Error identifying snake. Please try again.");
    }

    #[test]
    fn data_url_prefix_is_stripped() {
        assert_eq!(
            data_url_payload("data:image/jpeg;base64,/9j/4AAQ"),
            "/9j/4AAQ"
        );
    }

    #[test]
    fn bare_payload_passes_through() {
        assert_eq!(data_url_payload("/9j/4AAQ"), "/9j/4AAQ");
    }

    #[test]
    fn request_serializes_with_image_key() {
        let request = ClassifyRequest { image: "abc123".to_string() };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"image":"abc123"}"#
        );
    }
}
