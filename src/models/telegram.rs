use serde::{Deserialize, Serialize};

use crate::models::submission::SubmissionRecord;

pub const PARSE_MODE_MARKDOWN: &str = "Markdown";

/// Body of a Bot API `sendMessage` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub chat_id: String,
    pub text: String,
    pub parse_mode: String,
}

impl NotificationMessage {
    pub fn from_submission(chat_id: &str, record: &SubmissionRecord) -> Self {
        Self {
            chat_id: chat_id.to_string(),
            text: format_submission(record),
            parse_mode: PARSE_MODE_MARKDOWN.to_string(),
        }
    }
}

pub fn format_submission(record: &SubmissionRecord) -> String {
    format!(
        "📝 *Nova Simulação Recebida*:\n\
         👤 Nome: {}\n\
         📞 Telefone: {}\n\
         📧 E-mail: {}\n\
         💳 Tipo: {}\n\
         📂 Categoria: {}\n\
         💰 Valor: R$ {:.2}",
        record.name,
        record.phone,
        record.email,
        record.plan_type,
        record.category,
        record.value,
    )
}
