use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Structured acknowledgement returned by JSON-mode writes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusAck {
    pub status: String,
}

impl StatusAck {
    pub fn success() -> Self {
        Self { status: "success".to_string() }
    }
}

/// How the stored record is accepted on write and represented on read.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// Non-empty text stored verbatim, served as `text/plain`.
    #[default]
    Text,
    /// Title line plus CSV rows stored verbatim, served as an HTML table.
    Html,
    /// Any JSON value, stored pretty-printed, served as `application/json`.
    Json,
}

impl RecordFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordFormat::Text => "text",
            RecordFormat::Html => "html",
            RecordFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" | "plain" => Ok(RecordFormat::Text),
            "html" | "csv" => Ok(RecordFormat::Html),
            "json" => Ok(RecordFormat::Json),
            other => Err(format!("unknown record format `{other}` (expected text, html or json)")),
        }
    }
}
