use super::action::AssistantAction;
use serde::Serialize;
use tracing::warn;

const FENCE_OPEN: &str = "```json\n";
const FENCE_CLOSE: &str = "\n```";

/// Assistant answer split into display text and an optional widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantReply {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<AssistantAction>,
}

impl AssistantReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: None,
        }
    }

    /// Pull the first fenced ```json block out of `raw` and decode it.
    ///
    /// When the block is not valid JSON the raw text is returned untouched.
    pub fn parse(raw: &str) -> Self {
        let Some((start, body, end)) = find_json_fence(raw) else {
            return Self::text(raw);
        };

        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => {
                let mut text = String::with_capacity(raw.len());
                text.push_str(&raw[..start]);
                text.push_str(&raw[end..]);
                Self {
                    text: text.trim().to_string(),
                    action: Some(AssistantAction::from_value(value)),
                }
            }
            Err(err) => {
                warn!(%err, "assistant action block is not valid JSON");
                Self::text(raw)
            }
        }
    }
}

/// Byte range of the whole fence plus the slice between the fence lines.
fn find_json_fence(raw: &str) -> Option<(usize, &str, usize)> {
    let start = raw.find(FENCE_OPEN)?;
    let body_start = start + FENCE_OPEN.len();
    let body_len = raw[body_start..].find(FENCE_CLOSE)?;
    let body_end = body_start + body_len;
    Some((start, &raw[body_start..body_end], body_end + FENCE_CLOSE.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::action::AdminOrderDraft;

    #[test]
    fn plain_text_has_no_action() {
        let reply = AssistantReply::parse("The section is short by 12 staff.");
        assert_eq!(reply.text, "The section is short by 12 staff.");
        assert!(reply.action.is_none());
    }

    #[test]
    fn strips_action_block_from_text() {
        let raw = "Here is the draft:\n```json\n{\"type\": \"ADMIN_ORDER\", \"data\": {\"title\": \"Transfer\", \"content\": \"Body\"}}\n```\nPlease review.";

        let reply = AssistantReply::parse(raw);

        assert_eq!(reply.text, "Here is the draft:\n\nPlease review.");
        assert_eq!(
            reply.action,
            Some(AssistantAction::AdminOrder(AdminOrderDraft {
                title: "Transfer".to_string(),
                content: "Body".to_string(),
            }))
        );
    }

    #[test]
    fn only_first_block_is_taken() {
        let raw = "```json\n{\"type\": \"ANALYSIS_CHART\", \"data\": {\"bars\": [1]}}\n```\nthen\n```json\n{\"type\": \"ADMIN_ORDER\"}\n```";

        let reply = AssistantReply::parse(raw);

        assert_eq!(reply.action.as_ref().map(AssistantAction::kind), Some("ANALYSIS_CHART"));
        assert!(reply.text.starts_with("then"));
        assert!(reply.text.contains("ADMIN_ORDER"));
    }

    #[test]
    fn invalid_json_leaves_text_untouched() {
        let raw = "Draft:\n```json\n{not json}\n```";

        let reply = AssistantReply::parse(raw);

        assert_eq!(reply.text, raw);
        assert!(reply.action.is_none());
    }

    #[test]
    fn unterminated_fence_is_plain_text() {
        let raw = "```json\n{\"type\": \"ADMIN_ORDER\"}";
        assert_eq!(AssistantReply::parse(raw), AssistantReply::text(raw));
    }
}
