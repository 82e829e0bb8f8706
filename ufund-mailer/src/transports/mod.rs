mod file;
pub mod smtp;

pub use file::FileTransport;
pub use smtp::{SmtpTransport, TlsConfig};

use crate::{Email, MailerError};
use lettre::Message;
use lettre::message::SinglePart;

/// Build the wire message for a rendered email.
///
/// `message_id` is set when the transport assigns its own id (SMTP); file
/// delivery lets lettre generate one.
pub(crate) fn build_message(
    email: Email,
    message_id: Option<String>,
) -> Result<Message, MailerError> {
    let mut message_builder = Message::builder()
        .from(email.from.parse()?)
        .subject(email.subject);

    if let Some(id) = message_id {
        message_builder = message_builder.message_id(Some(id));
    }

    for to in email.to {
        message_builder = message_builder.to(to.parse()?);
    }

    for cc in email.cc {
        message_builder = message_builder.cc(cc.parse()?);
    }

    for bcc in email.bcc {
        message_builder = message_builder.bcc(bcc.parse()?);
    }

    if let Some(reply_to) = email.reply_to {
        message_builder = message_builder.reply_to(reply_to.parse()?);
    }

    let message = message_builder.singlepart(SinglePart::html(email.html_body))?;

    Ok(message)
}
