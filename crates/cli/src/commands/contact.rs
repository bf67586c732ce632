//! `fire contact`.

use fire_productions_core::{ContactMessage, ContactReceipt};

use crate::ApiClient;
use crate::error::Result;

/// Send a contact form message. Blank fields are refused before anything
/// goes over the network.
///
/// # Errors
///
/// Returns `CliError::Contact` for a blank field or implausible email, or
/// the API error if the server refuses the message.
pub async fn send(api: &ApiClient, name: &str, email: &str, message: &str) -> Result<String> {
    let message = ContactMessage::new(name, email, message)?;
    let receipt = api.send_message(&message).await?;
    Ok(render_receipt(&receipt))
}

fn render_receipt(receipt: &ContactReceipt) -> String {
    match (&receipt.note, &receipt.id) {
        (Some(note), _) => format!("Message accepted but not stored: {note}\n"),
        (None, Some(id)) => format!("Message sent (reference {id}).\n"),
        (None, None) => "Message sent.\n".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use fire_productions_core::ContactError;

    use super::*;
    use crate::{CliConfig, CliError};

    fn offline_api() -> ApiClient {
        ApiClient::new(&CliConfig {
            api_url: "http://127.0.0.1:9/api".to_string(),
            whatsapp_number: "94743678001".to_string(),
            state_file: PathBuf::from("unused.json"),
            http_timeout: Duration::from_secs(1),
            admin_token: None,
        })
        .unwrap_or_else(|e| panic!("{e}"))
    }

    #[tokio::test]
    async fn test_blank_fields_never_reach_the_api() {
        let api = offline_api();
        assert!(matches!(
            send(&api, "Nimal", "nimal@example.lk", "   ").await,
            Err(CliError::Contact(ContactError::MissingField("Message")))
        ));
        assert!(matches!(
            send(&api, "", "nimal@example.lk", "Hi").await,
            Err(CliError::Contact(ContactError::MissingField("Name")))
        ));
        // A complete message does go out, and fails on the dead port.
        assert!(matches!(
            send(&api, "Nimal", "nimal@example.lk", "Hi").await,
            Err(CliError::Api(_))
        ));
    }

    #[test]
    fn test_render_receipt() {
        let stored = ContactReceipt {
            ok: true,
            id: Some("66b0".to_string()),
            note: None,
        };
        assert_eq!(render_receipt(&stored), "Message sent (reference 66b0).\n");

        let queued = ContactReceipt {
            ok: true,
            id: Some("queued-demo".to_string()),
            note: Some("DB not connected".to_string()),
        };
        assert!(render_receipt(&queued).contains("not stored: DB not connected"));
    }
}
