use tracing::info;
use uuid::Uuid;

use crate::{
    clients::Notifier,
    error::RelayError,
    models::{submission::SubmissionRecord, telegram::NotificationMessage},
};

/// Decodes one submission, formats it and forwards it through `notifier`.
/// A body that fails to decode never reaches the notifier.
pub async fn relay_submission(
    body: &[u8],
    chat_id: &str,
    notifier: &dyn Notifier,
) -> Result<(), RelayError> {
    let record = SubmissionRecord::from_body(body).map_err(RelayError::MalformedSubmission)?;

    let trace_id = Uuid::new_v4();
    info!(
        trace_id = %trace_id,
        chat_id,
        plan_type = %record.plan_type,
        category = %record.category,
        "Relaying simulation submission"
    );

    let message = NotificationMessage::from_submission(chat_id, &record);

    notifier
        .send_notification(&message)
        .await
        .map_err(RelayError::Downstream)?;

    info!(trace_id = %trace_id, "Simulation submission relayed");

    Ok(())
}
