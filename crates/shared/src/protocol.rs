use serde::{Deserialize, Serialize};

use crate::domain::ContactMessage;

/// Body of an EmailJS `email/send` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSendRequest {
    pub service_id: String,
    pub template_id: String,
    /// EmailJS calls the public key `user_id` on the wire.
    pub user_id: String,
    pub template_params: TemplateParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
}

impl From<&ContactMessage> for TemplateParams {
    fn from(value: &ContactMessage) -> Self {
        Self {
            from_name: value.name.clone(),
            from_email: value.email.clone(),
            message: value.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    Github,
    Demo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum TrackedEvent {
    ButtonClick {
        button_text: String,
        section: String,
    },
    ProjectLinkClick {
        project: String,
        link_type: LinkType,
    },
    SocialLinkClick {
        platform: String,
    },
}

impl TrackedEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TrackedEvent::ButtonClick { .. } => "button_click",
            TrackedEvent::ProjectLinkClick { .. } => "project_link_click",
            TrackedEvent::SocialLinkClick { .. } => "social_link_click",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_request_uses_emailjs_field_names() {
        let message = ContactMessage {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "hello".into(),
        };
        let request = EmailSendRequest {
            service_id: "service_x".into(),
            template_id: "template_y".into(),
            user_id: "public_z".into(),
            template_params: TemplateParams::from(&message),
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["user_id"], "public_z");
        assert_eq!(json["template_params"]["from_name"], "Ada");
        assert_eq!(json["template_params"]["from_email"], "ada@example.com");
        assert_eq!(json["template_params"]["message"], "hello");
    }

    #[test]
    fn tracked_events_serialize_with_event_tag() {
        let event = TrackedEvent::ProjectLinkClick {
            project: "Inventory App".into(),
            link_type: LinkType::Github,
        };
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["event"], "project_link_click");
        assert_eq!(json["data"]["link_type"], "github");
        assert_eq!(event.name(), "project_link_click");
    }
}
