// mailsoap-cli/src/output.rs
use mailsoap_types::TypeError;
use serde::Serialize;
use std::fmt;
use std::io::IsTerminal;

/// Output format option
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Auto-detect based on TTY
    Auto,
    /// Force JSON output
    Json,
    /// Force human-readable output
    Human,
}

impl OutputFormat {
    fn is_human(self) -> bool {
        match self {
            Self::Json => false,
            Self::Human => true,
            Self::Auto => std::io::stdout().is_terminal(),
        }
    }
}

/// Types that have a human rendering besides their JSON form
pub trait Formattable: Serialize {
    fn to_human(&self) -> String;
}

/// Standard JSON response envelope
#[derive(Debug, Serialize)]
pub struct Response<T> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<Meta>,
}

impl<T> Response<T> {
    pub fn ok(result: T) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
            meta: None,
        }
    }

    pub fn ok_with_meta(result: T, meta: Meta) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
            meta: Some(meta),
        }
    }

    pub fn error(error: ErrorResponse) -> Response<()> {
        Response::<()> {
            ok: false,
            result: None,
            error: Some(error),
            meta: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    type_: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
}

impl ErrorResponse {
    pub fn validation_failed(message: String, subject: Option<String>) -> Self {
        Self {
            type_: "validation_failed",
            message,
            subject,
        }
    }

    pub fn permanent(message: String) -> Self {
        Self {
            type_: "permanent_error",
            message,
            subject: None,
        }
    }

    /// Classifies an error into its envelope and exit code.
    ///
    /// Bad tokens, absent required fields and serde data errors are
    /// validation failures; everything else is permanent.
    pub fn from_error(err: &anyhow::Error) -> (Self, ExitCode) {
        let message = format!("{:#}", err);
        if let Some(type_error) = err.downcast_ref::<TypeError>() {
            let subject = Some(type_error.subject().to_string());
            return (Self::validation_failed(message, subject), ExitCode::ValidationFailed);
        }
        if let Some(json_error) = err.downcast_ref::<serde_json::Error>() {
            if json_error.is_data() {
                return (Self::validation_failed(message, None), ExitCode::ValidationFailed);
            }
        }
        (Self::permanent(message), ExitCode::PermanentError)
    }
}

#[derive(Debug, Default, Serialize)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<&'static str>,
}

/// Exit codes for scripted callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    PermanentError = 2,
    ValidationFailed = 4,
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::PermanentError => write!(f, "permanent_error"),
            Self::ValidationFailed => write!(f, "validation_failed"),
        }
    }
}

impl ExitCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

/// Where and how command results are printed.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl Printer {
    pub fn new(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }

    fn to_json<T: Serialize>(&self, value: &T) -> anyhow::Result<String> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(text)
    }

    pub fn success<T: Formattable>(&self, result: &T, meta: Option<Meta>) -> anyhow::Result<()> {
        if self.format.is_human() {
            println!("{}", result.to_human());
            return Ok(());
        }
        let resp = match meta {
            Some(meta) => Response::ok_with_meta(result, meta),
            None => Response::ok(result),
        };
        println!("{}", self.to_json(&resp)?);
        Ok(())
    }

    /// Prints the error and returns the exit code to leave with.
    pub fn failure(&self, err: &anyhow::Error) -> ExitCode {
        let (error, code) = ErrorResponse::from_error(err);
        if self.format.is_human() {
            print_error(&error.message);
            return code;
        }
        let resp = Response::<()>::error(error);
        match self.to_json(&resp) {
            Ok(text) => println!("{}", text),
            Err(e) => print_error(&e.to_string()),
        }
        code
    }
}

/// Print a styled error message
pub fn print_error(message: &str) {
    let term = console::Term::stderr();
    let _ = term.write_str(&format!("{} {}\n", console::style("Error:").red(), message));
}

/// Style a label for human output
pub fn label(key: &str) -> String {
    console::style(key).bold().to_string()
}
