use serde::{Deserialize, Serialize};
use std::fmt;

/// One submitted expense-report line item as stored by the remote store.
///
/// Wire fields are camelCase (`fileUrl`, `commentAdmin`, ...) and the
/// expense category travels as `type`, matching the remote API. The `date`
/// stays a plain `YYYY-MM-DD` string on the wire; it is parsed in the
/// domain layer so one malformed record degrades instead of failing the
/// whole deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    /// Email of the employee who submitted this bill
    pub email: String,
    /// Expense category, serialized as `type`
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub name: String,
    pub amount: f64,
    /// ISO 8601 date format (YYYY-MM-DD)
    pub date: String,
    pub vat: Option<f64>,
    /// Tax percentage
    pub pct: u32,
    #[serde(default)]
    pub commentary: String,
    /// URL of the stored justification file, if one was uploaded
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub status: BillStatus,
    /// Free-text note left by the administrator who reviewed the bill
    pub comment_admin: Option<String>,
}

/// A bill under construction, before the store has assigned it an id.
///
/// Create payload: the store assigns `id` and, when an attachment rides
/// along, `fileUrl`/`fileName`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDraft {
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub vat: Option<f64>,
    pub pct: u32,
    #[serde(default)]
    pub commentary: String,
    pub status: BillStatus,
    /// Validated local file to upload with the draft; never serialized,
    /// it travels as its own multipart part
    #[serde(skip)]
    pub attachment: Option<AttachmentUpload>,
}

/// A validated local file selected through the file input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Expense categories offered by the submission form.
///
/// Serializes as the plain French label so unknown categories coming back
/// from the store land in `Other` instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExpenseType {
    Transport,
    RestaurantsAndBars,
    HotelAndLodging,
    OnlineServices,
    ItAndElectronics,
    EquipmentAndMaterial,
    OfficeSupplies,
    Other(String),
}

impl ExpenseType {
    pub fn as_str(&self) -> &str {
        match self {
            ExpenseType::Transport => "Transports",
            ExpenseType::RestaurantsAndBars => "Restaurants et bars",
            ExpenseType::HotelAndLodging => "Hôtel et logement",
            ExpenseType::OnlineServices => "Services en ligne",
            ExpenseType::ItAndElectronics => "IT et électronique",
            ExpenseType::EquipmentAndMaterial => "Equipement et matériel",
            ExpenseType::OfficeSupplies => "Fournitures de bureau",
            ExpenseType::Other(label) => label,
        }
    }

    /// All categories the form offers, in display order
    pub fn all() -> [ExpenseType; 7] {
        [
            ExpenseType::Transport,
            ExpenseType::RestaurantsAndBars,
            ExpenseType::HotelAndLodging,
            ExpenseType::OnlineServices,
            ExpenseType::ItAndElectronics,
            ExpenseType::EquipmentAndMaterial,
            ExpenseType::OfficeSupplies,
        ]
    }
}

impl Default for ExpenseType {
    fn default() -> Self {
        ExpenseType::Transport
    }
}

impl From<String> for ExpenseType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Transports" => ExpenseType::Transport,
            "Restaurants et bars" => ExpenseType::RestaurantsAndBars,
            "Hôtel et logement" => ExpenseType::HotelAndLodging,
            "Services en ligne" => ExpenseType::OnlineServices,
            "IT et électronique" => ExpenseType::ItAndElectronics,
            "Equipement et matériel" => ExpenseType::EquipmentAndMaterial,
            "Fournitures de bureau" => ExpenseType::OfficeSupplies,
            _ => ExpenseType::Other(label),
        }
    }
}

impl From<ExpenseType> for String {
    fn from(expense_type: ExpenseType) -> Self {
        expense_type.as_str().to_string()
    }
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Review status of a bill.
///
/// Transitions only `pending -> accepted | refused`, driven by an
/// administrator through the remote store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

/// Role of the logged-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Employee,
    Admin,
}

/// The authenticated user, as serialized in session storage at login.
/// Read-only for the expense core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "type")]
    pub role: UserRole,
    pub email: String,
}

/// View model handed to the bills table renderer.
///
/// Raw copies ride next to the formatted ones so the view can fall back
/// when a record could not be formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedBill {
    pub id: String,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub name: String,
    /// Raw ISO date as fetched
    pub date: String,
    /// French short form, e.g. "4 Avr. 04"; raw date when unparseable
    pub formatted_date: String,
    pub amount: f64,
    pub formatted_amount: String,
    pub status: BillStatus,
    /// French label, e.g. "En attente"
    pub formatted_status: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
}

/// Configuration for attachment validation on the submission form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttachmentPolicy {
    /// Accepted file extensions, compared case-insensitively
    pub allowed_extensions: Vec<String>,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
            ],
        }
    }
}

impl AttachmentPolicy {
    /// Extract the extension from a selected file name.
    ///
    /// Browsers may report a fake path (`C:\fakepath\photo.png`), so the
    /// basename is taken first. A name without a dot has no extension.
    pub fn extension_of(file_name: &str) -> Option<&str> {
        let basename = file_name
            .rsplit(['\\', '/'])
            .next()
            .unwrap_or(file_name);
        basename.rsplit_once('.').map(|(_, ext)| ext)
    }

    pub fn is_allowed(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }

    /// Validate a selected file name against the policy
    pub fn validate(&self, file_name: &str) -> Result<(), AttachmentValidationError> {
        match Self::extension_of(file_name) {
            Some(extension) if self.is_allowed(extension) => Ok(()),
            _ => Err(AttachmentValidationError::UnsupportedExtension {
                file_name: file_name.to_string(),
            }),
        }
    }
}

/// Validation error for a selected attachment.
///
/// Consumed locally by the submission form; it never crosses the
/// component boundary as an error value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttachmentValidationError {
    UnsupportedExtension { file_name: String },
}

impl fmt::Display for AttachmentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentValidationError::UnsupportedExtension { file_name } => {
                write!(f, "Unsupported attachment extension: {}", file_name)
            }
        }
    }
}

impl std::error::Error for AttachmentValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(AttachmentPolicy::extension_of("preview.jpg"), Some("jpg"));
        assert_eq!(AttachmentPolicy::extension_of("archive.tar.gz"), Some("gz"));
        assert_eq!(
            AttachmentPolicy::extension_of("C:\\fakepath\\photo.PNG"),
            Some("PNG")
        );
        assert_eq!(
            AttachmentPolicy::extension_of("/tmp/upload/scan.jpeg"),
            Some("jpeg")
        );
        assert_eq!(AttachmentPolicy::extension_of("noextension"), None);
    }

    #[test]
    fn test_policy_accepts_image_extensions() {
        let policy = AttachmentPolicy::default();
        assert!(policy.validate("preview.jpg").is_ok());
        assert!(policy.validate("preview.jpeg").is_ok());
        assert!(policy.validate("preview.png").is_ok());
        // Case-insensitive
        assert!(policy.validate("PREVIEW.JPG").is_ok());
        assert!(policy.validate("photo.Png").is_ok());
        // Browser fake path
        assert!(policy.validate("C:\\fakepath\\facture.png").is_ok());
    }

    #[test]
    fn test_policy_rejects_other_extensions() {
        let policy = AttachmentPolicy::default();
        assert_eq!(
            policy.validate("test.txt"),
            Err(AttachmentValidationError::UnsupportedExtension {
                file_name: "test.txt".to_string()
            })
        );
        assert!(policy.validate("facture.pdf").is_err());
        assert!(policy.validate("noextension").is_err());
        assert!(policy.validate("jpg").is_err());
    }

    #[test]
    fn test_expense_type_round_trip() {
        for expense_type in ExpenseType::all() {
            let label: String = expense_type.clone().into();
            assert_eq!(ExpenseType::from(label), expense_type);
        }
    }

    #[test]
    fn test_expense_type_unknown_label_lands_in_other() {
        let parsed = ExpenseType::from("Frais divers".to_string());
        assert_eq!(parsed, ExpenseType::Other("Frais divers".to_string()));
        assert_eq!(parsed.as_str(), "Frais divers");
    }

    #[test]
    fn test_bill_wire_field_names() {
        let bill = Bill {
            id: "47qAXb6fIm2zOKkLzMro".to_string(),
            email: "a@a".to_string(),
            expense_type: ExpenseType::HotelAndLodging,
            name: "encore".to_string(),
            amount: 400.0,
            date: "2004-04-04".to_string(),
            vat: Some(80.0),
            pct: 20,
            commentary: "séminaire billed".to_string(),
            file_url: Some("https://test.storage/preview.jpg".to_string()),
            file_name: Some("preview.jpg".to_string()),
            status: BillStatus::Pending,
            comment_admin: Some("ok".to_string()),
        };

        let json = serde_json::to_value(&bill).unwrap();
        assert_eq!(json["type"], "Hôtel et logement");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["fileUrl"], "https://test.storage/preview.jpg");
        assert_eq!(json["fileName"], "preview.jpg");
        assert_eq!(json["commentAdmin"], "ok");

        let back: Bill = serde_json::from_value(json).unwrap();
        assert_eq!(back, bill);
    }

    #[test]
    fn test_session_user_wire_shape() {
        let user: SessionUser =
            serde_json::from_str(r#"{"type":"Employee","email":"employee@test.tld"}"#).unwrap();
        assert_eq!(user.role, UserRole::Employee);
        assert_eq!(user.email, "employee@test.tld");
    }

    #[test]
    fn test_bill_draft_attachment_is_not_serialized() {
        let draft = BillDraft {
            email: "a@a".to_string(),
            attachment: Some(AttachmentUpload {
                file_name: "preview.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                data: vec![1, 2, 3],
            }),
            ..Default::default()
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("attachment").is_none());

        let back: BillDraft = serde_json::from_value(json).unwrap();
        assert!(back.attachment.is_none());
        assert_eq!(back.email, "a@a");
    }
}
