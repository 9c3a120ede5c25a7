//! `TwiML` documents
//!
//! Twilio expects XML both as the webhook response envelope and as the
//! instructions attached to an outbound call.

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Language of everything spoken on calls
pub const SPEECH_LANGUAGE: &str = "fr-FR";

/// Escape text for use inside XML elements and attributes
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Webhook reply carrying one chat message
pub fn messaging_response(body: &str) -> String {
    format!(
        "{XML_HEADER}<Response><Message>{}</Message></Response>",
        escape_xml(body)
    )
}

/// Voice reply speaking `text` with an optional voice
pub fn voice_response(text: &str, voice: Option<&str>) -> String {
    format!("{XML_HEADER}{}", say(text, voice))
}

/// Instructions for an outbound call, without the XML header
pub fn call_script(text: &str) -> String {
    say(text, None)
}

fn say(text: &str, voice: Option<&str>) -> String {
    let voice = voice
        .map(|v| format!(r#" voice="{}""#, escape_xml(v)))
        .unwrap_or_default();
    format!(
        r#"<Response><Say{voice} language="{SPEECH_LANGUAGE}">{}</Say></Response>"#,
        escape_xml(text)
    )
}
