// XML-RPC client for the flowgraph control server
//
// The flowgraph exposes its tunable variables as XML-RPC methods taking a
// single string. Selection needs exactly two of them, so the requests are
// built and parsed by hand rather than pulling in a full RPC stack.

use async_trait::async_trait;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::time::Duration;
use thiserror::Error;

/// Result type for control-plane operations
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors talking to the flowgraph.
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("XML-RPC fault {code}: {message}")]
    Fault { code: i32, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Command interface to the signal flowgraph.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Point the flowgraph at a recorded IQ capture.
    async fn set_source_file(&self, file: &str) -> ControlResult<()>;

    /// Set the RDS correlator bit pattern.
    async fn set_station_code(&self, code: &str) -> ControlResult<()>;
}

// Callback names exported by the flowgraph's XML-RPC server
const METHOD_SOURCE_FILE: &str = "set_fichier";
const METHOD_STATION_CODE: &str = "set_code";

/// XML-RPC over HTTP client with a fixed per-call timeout.
pub struct XmlRpcControlPlane {
    url: String,
    client: reqwest::Client,
}

impl XmlRpcControlPlane {
    pub fn new(url: impl Into<String>, timeout: Duration) -> ControlResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    async fn call(&self, method: &str, arg: &str) -> ControlResult<()> {
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml")
            .body(method_call_body(method, arg))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ControlError::Status(status));
        }

        let body = response.text().await?;
        parse_method_response(&body)
    }
}

#[async_trait]
impl ControlPlane for XmlRpcControlPlane {
    async fn set_source_file(&self, file: &str) -> ControlResult<()> {
        self.call(METHOD_SOURCE_FILE, file).await
    }

    async fn set_station_code(&self, code: &str) -> ControlResult<()> {
        self.call(METHOD_STATION_CODE, code).await
    }
}

/// Build a `<methodCall>` document with one string parameter.
fn method_call_body(method: &str, arg: &str) -> String {
    format!(
        "<?xml version=\"1.0\"?><methodCall><methodName>{}</methodName>\
         <params><param><value><string>{}</string></value></param></params></methodCall>",
        escape(method),
        escape(arg)
    )
}

/// A call succeeds iff the response is a `<methodResponse>` without a
/// `<fault>`. Fault code and string are pulled out of the fault struct.
fn parse_method_response(body: &str) -> ControlResult<()> {
    let mut reader = Reader::from_str(body);
    let config = reader.config_mut();
    config.trim_text_start = true;
    config.trim_text_end = true;

    let mut saw_response = false;
    let mut saw_fault = false;
    let mut in_member_name = false;
    let mut in_member_value = false;
    let mut member_name: Option<String> = None;
    let mut fault_code: Option<i32> = None;
    let mut fault_string: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"methodResponse" => saw_response = true,
                b"fault" => saw_fault = true,
                b"name" if saw_fault => in_member_name = true,
                b"value" if saw_fault => in_member_value = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"name" => in_member_name = false,
                b"value" => in_member_value = false,
                b"member" => member_name = None,
                _ => {}
            },
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| ControlError::InvalidResponse(format!("bad XML text: {}", e)))?;
                if in_member_name {
                    member_name = Some(text.into_owned());
                } else if in_member_value {
                    match member_name.as_deref() {
                        Some("faultCode") => fault_code = text.trim().parse().ok(),
                        Some("faultString") => fault_string = Some(text.into_owned()),
                        _ => {}
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ControlError::InvalidResponse(format!("XML error: {}", e)));
            }
        }
    }

    if !saw_response {
        return Err(ControlError::InvalidResponse(
            "missing methodResponse element".to_string(),
        ));
    }
    if saw_fault {
        return Err(ControlError::Fault {
            code: fault_code.unwrap_or(0),
            message: fault_string.unwrap_or_else(|| "unspecified fault".to_string()),
        });
    }
    Ok(())
}
