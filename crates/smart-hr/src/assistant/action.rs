use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};
use tracing::warn;

const ADMIN_ORDER: &str = "ADMIN_ORDER";
const EMPLOYEE_CARD: &str = "EMPLOYEE_CARD";
const ANALYSIS_CHART: &str = "ANALYSIS_CHART";

/// Draft of an administrative order for the operator to review and sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminOrderDraft {
    pub title: String,
    pub content: String,
}

/// Employee summary card; fields beyond name and role are passed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeCard {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Structured widget the assistant asked the dashboard to render.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantAction {
    AdminOrder(AdminOrderDraft),
    EmployeeCard(EmployeeCard),
    AnalysisChart(Value),
    /// Tag not understood here, or a known tag whose payload did not fit.
    Unknown { kind: String, data: Value },
}

impl AssistantAction {
    /// Decode a `{"type": ..., "data": ...}` payload. Never fails: anything that
    /// does not match a known shape lands in [`AssistantAction::Unknown`].
    pub fn from_value(value: Value) -> Self {
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return AssistantAction::Unknown {
                    kind: String::new(),
                    data: other,
                }
            }
        };

        let kind = match object.remove("type") {
            Some(Value::String(kind)) => kind,
            other => {
                if let Some(tag) = other {
                    object.insert("type".to_string(), tag);
                }
                return AssistantAction::Unknown {
                    kind: String::new(),
                    data: Value::Object(object),
                };
            }
        };
        let data = object.remove("data").unwrap_or(Value::Null);

        match kind.as_str() {
            ADMIN_ORDER => match serde_json::from_value::<AdminOrderDraft>(data.clone()) {
                Ok(order) => AssistantAction::AdminOrder(order),
                Err(err) => {
                    warn!(%err, "admin order payload did not decode");
                    AssistantAction::Unknown { kind, data }
                }
            },
            EMPLOYEE_CARD => match serde_json::from_value::<EmployeeCard>(data.clone()) {
                Ok(card) => AssistantAction::EmployeeCard(card),
                Err(err) => {
                    warn!(%err, "employee card payload did not decode");
                    AssistantAction::Unknown { kind, data }
                }
            },
            ANALYSIS_CHART => AssistantAction::AnalysisChart(data),
            _ => AssistantAction::Unknown { kind, data },
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            AssistantAction::AdminOrder(_) => ADMIN_ORDER,
            AssistantAction::EmployeeCard(_) => EMPLOYEE_CARD,
            AssistantAction::AnalysisChart(_) => ANALYSIS_CHART,
            AssistantAction::Unknown { kind, .. } => kind.as_str(),
        }
    }

    pub fn to_value(&self) -> Value {
        let data = match self {
            AssistantAction::AdminOrder(order) => json!(order),
            AssistantAction::EmployeeCard(card) => json!(card),
            AssistantAction::AnalysisChart(data) | AssistantAction::Unknown { data, .. } => {
                data.clone()
            }
        };
        json!({ "type": self.kind(), "data": data })
    }
}

impl Serialize for AssistantAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_admin_order() {
        let action = AssistantAction::from_value(json!({
            "type": "ADMIN_ORDER",
            "data": { "title": "Thanks and appreciation", "content": "Order text" }
        }));

        assert_eq!(
            action,
            AssistantAction::AdminOrder(AdminOrderDraft {
                title: "Thanks and appreciation".to_string(),
                content: "Order text".to_string(),
            })
        );
    }

    #[test]
    fn employee_card_keeps_extra_fields() {
        let action = AssistantAction::from_value(json!({
            "type": "EMPLOYEE_CARD",
            "data": { "name": "Zainab", "role": "Auditor", "grade": 7 }
        }));

        match action {
            AssistantAction::EmployeeCard(card) => {
                assert_eq!(card.name, "Zainab");
                assert_eq!(card.role.as_deref(), Some("Auditor"));
                assert_eq!(card.details.get("grade"), Some(&json!(7)));
            }
            other => panic!("expected employee card, got {other:?}"),
        }
    }

    #[test]
    fn unknown_tag_is_preserved() {
        let action = AssistantAction::from_value(json!({
            "type": "LEAVE_CALENDAR",
            "data": { "month": "2024-10" }
        }));

        assert_eq!(action.kind(), "LEAVE_CALENDAR");
        assert_eq!(
            action.to_value(),
            json!({ "type": "LEAVE_CALENDAR", "data": { "month": "2024-10" } })
        );
    }

    #[test]
    fn malformed_known_payload_falls_back_to_unknown() {
        let action = AssistantAction::from_value(json!({
            "type": "ADMIN_ORDER",
            "data": { "title": "Missing content" }
        }));

        assert!(matches!(
            action,
            AssistantAction::Unknown { ref kind, .. } if kind == "ADMIN_ORDER"
        ));
    }

    #[test]
    fn untagged_payload_is_unknown() {
        let action = AssistantAction::from_value(json!([1, 2, 3]));
        assert_eq!(action.kind(), "");

        let action = AssistantAction::from_value(json!({ "type": 5 }));
        assert!(matches!(
            action,
            AssistantAction::Unknown { ref data, .. } if data["type"] == json!(5)
        ));
    }
}
