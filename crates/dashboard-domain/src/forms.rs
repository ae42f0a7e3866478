//! Form Payloads
//!
//! Request bodies built by the create/edit modals. Each derives `Validate`;
//! [`validate_form`] runs before anything is sent and turns failures into a
//! single toast message.

use serde::Serialize;
use validator::{Validate, ValidationError};

use crate::model::{KpiType, PermissionGrant, Priority, Stage, TaskKpi};
use crate::util::{date_formatter, INVALID_DATE};
use crate::{DomainError, DomainResult};

// ========================
// Field validators
// ========================

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn iso_date(value: &str) -> Result<(), ValidationError> {
    if date_formatter(value) == INVALID_DATE {
        return Err(ValidationError::new("date"));
    }
    Ok(())
}

fn known_kpi_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<KpiType>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("kpi_type"))
}

/// Run the derived rules; all failing messages, ordered by field name
pub fn validate_form<T: Validate>(form: &T) -> DomainResult<()> {
    let Err(errors) = form.validate() else {
        return Ok(());
    };

    let mut messages: Vec<(String, String)> = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"));
            messages.push((field.to_string(), message));
        }
    }
    messages.sort();

    let joined: Vec<String> = messages.into_iter().map(|(_, m)| m).collect();
    Err(DomainError::Validation(joined.join(" ")))
}

// ========================
// Authentication
// ========================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Email Address is required!"))]
    pub email: String,
    #[validate(custom(function = "non_blank", message = "Password is required!"))]
    pub password: String,
}

// ========================
// Organization
// ========================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct BranchForm {
    #[validate(custom(function = "non_blank", message = "Branch name is required"))]
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentForm {
    #[validate(custom(function = "non_blank", message = "Department name is required"))]
    pub name: String,
    pub description: String,
    #[validate(length(min = 1, message = "Please select a branch"))]
    pub branch_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct KpiForm {
    #[validate(custom(function = "non_blank", message = "KPI name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(custom(function = "known_kpi_type", message = "Please choose a KPI type"))]
    pub kind: String,
    #[validate(length(min = 1, message = "Please select a branch"))]
    pub branch_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoleForm {
    #[validate(custom(function = "non_blank", message = "Role name is required"))]
    pub name: String,
    pub description: String,
    /// Only the checked grants
    pub permissions: Vec<PermissionGrant>,
    pub branch_id: String,
}

// ========================
// Users
// ========================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    #[validate(custom(function = "non_blank", message = "Full name is required!"))]
    pub name: String,
    #[validate(custom(function = "non_blank", message = "Title is required!"))]
    pub title: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(custom(function = "non_blank", message = "Department is required!"))]
    pub department: String,
    #[validate(custom(function = "non_blank", message = "Gender is required!"))]
    pub gender: String,
    #[validate(length(min = 1, message = "Role is required!"))]
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    pub is_admin: bool,
    #[serde(rename = "profilePictureURL", skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    /// Only set when registering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserForm {
    /// New accounts start with their email as the password
    pub fn into_registration(mut self) -> Self {
        self.password = Some(self.email.trim().to_string());
        self
    }
}

/// Text offered for download after an account is created
pub fn credentials_text(email: &str, password: &str) -> String {
    format!("Email: {email}\nPassword: {password}")
}

// ========================
// Tasks
// ========================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskForm {
    #[validate(custom(function = "non_blank", message = "Task title is required!"))]
    pub title: String,
    #[validate(custom(function = "iso_date", message = "Date is required!"))]
    pub date: String,
    pub stage: Stage,
    pub priority: Priority,
    /// User ids
    pub team: Vec<String>,
    pub assets: Vec<String>,
    #[validate(required(message = "Please select a KPI before submitting."))]
    pub kpi: Option<TaskKpi>,
    pub monetary_value: f64,
    pub percent_value: f64,
    pub branch: String,
    pub department: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct SubTaskForm {
    #[validate(custom(function = "non_blank", message = "Title is required!"))]
    pub title: String,
    #[validate(custom(function = "iso_date", message = "Date is required!"))]
    pub date: String,
    pub tag: String,
}

/// Timeline entry posted on a task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActivityForm {
    #[serde(rename = "type")]
    pub kind: String,
    #[validate(custom(function = "non_blank", message = "Please add a comment"))]
    pub activity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monetary_value_achieved: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_value_achieved: Option<f64>,
}

impl ActivityForm {
    /// The achieved value is attached to the field matching the KPI type
    pub fn new(kind: &str, activity: &str, kpi: Option<&TaskKpi>, achieved: &str) -> Self {
        let value = achieved.trim().parse::<f64>().ok();
        let kpi_kind = kpi.map(|k| k.kind);
        Self {
            kind: kind.to_lowercase(),
            activity: activity.to_string(),
            monetary_value_achieved: value.filter(|_| kpi_kind == Some(KpiType::Monetary)),
            percent_value_achieved: value.filter(|_| kpi_kind == Some(KpiType::Percentage)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kpi(kind: KpiType) -> TaskKpi {
        TaskKpi {
            id: "k1".into(),
            name: "Sales".into(),
            kind,
        }
    }

    #[test]
    fn test_task_without_kpi_is_blocked() {
        let form = TaskForm {
            title: "Close Q3 deals".into(),
            date: "2024-07-01".into(),
            ..TaskForm::default()
        };
        assert_eq!(
            validate_form(&form),
            Err(DomainError::Validation("Please select a KPI before submitting.".into()))
        );

        let form = TaskForm {
            kpi: Some(kpi(KpiType::Metric)),
            ..form
        };
        assert!(validate_form(&form).is_ok());
    }

    #[test]
    fn test_sub_task_date_must_be_readable() {
        let form = SubTaskForm {
            title: "Call client".into(),
            date: "next week".into(),
            tag: String::new(),
        };
        assert_eq!(validate_form(&form), Err(DomainError::Validation("Date is required!".into())));

        for date in ["2024-07-01", "2024-07-01T09:00:00Z"] {
            let form = SubTaskForm {
                date: date.into(),
                ..form.clone()
            };
            assert!(validate_form(&form).is_ok(), "{date}");
        }
    }

    #[test]
    fn test_messages_are_ordered_by_field() {
        let form = UserForm {
            email: "not-an-email".into(),
            ..UserForm::default()
        };
        let Err(DomainError::Validation(message)) = validate_form(&form) else {
            panic!("expected validation failure");
        };
        assert!(message.starts_with("Department is required!"));
        assert!(message.contains("Please enter a valid email address"));
        assert!(message.ends_with("Title is required!"));
    }

    #[test]
    fn test_blank_names_are_rejected() {
        let form = BranchForm {
            name: "   ".into(),
            description: String::new(),
        };
        assert_eq!(validate_form(&form), Err(DomainError::Validation("Branch name is required".into())));
    }

    #[test]
    fn test_kpi_type_must_be_known() {
        let mut form = KpiForm {
            name: "Revenue".into(),
            kind: "percentage".into(),
            branch_id: "b1".into(),
        };
        assert!(validate_form(&form).is_ok());

        form.kind = "Speed".into();
        assert_eq!(validate_form(&form), Err(DomainError::Validation("Please choose a KPI type".into())));
    }

    #[test]
    fn test_registration_uses_email_as_password() {
        let form = UserForm {
            email: "jane@example.com".into(),
            ..UserForm::default()
        }
        .into_registration();
        let body = serde_json::to_value(&form).unwrap();
        assert_eq!(body["password"], "jane@example.com");
        assert!(body.get("profilePictureURL").is_none());
        assert_eq!(
            credentials_text("jane@example.com", "jane@example.com"),
            "Email: jane@example.com\nPassword: jane@example.com"
        );
    }

    #[test]
    fn test_activity_value_follows_kpi_type() {
        let monetary = ActivityForm::new("In Progress", "Closed two deals", Some(&kpi(KpiType::Monetary)), "250");
        let body = serde_json::to_value(&monetary).unwrap();
        assert_eq!(body["type"], "in progress");
        assert_eq!(body["monetaryValueAchieved"], 250.0);
        assert!(body.get("percentValueAchieved").is_none());

        let percent = ActivityForm::new("Completed", "Done", Some(&kpi(KpiType::Percentage)), "40");
        assert_eq!(percent.percent_value_achieved, Some(40.0));
        assert_eq!(percent.monetary_value_achieved, None);

        let plain = ActivityForm::new("Todo", "Note", None, "12");
        assert_eq!(plain.monetary_value_achieved, None);
        assert_eq!(plain.percent_value_achieved, None);
    }
}
