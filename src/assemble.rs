// src/assemble.rs

use crate::error::BuildError;

/// External resources and title of the generated document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shell {
    pub title: String,
    pub stylesheet: String,
    pub script: String,
}

impl Default for Shell {
    fn default() -> Self {
        Shell {
            title: "ThreatCanvas \u{2014} OWASP Threat Modeler".to_string(),
            stylesheet: "main.css".to_string(),
            script: "src/main.js".to_string(),
        }
    }
}

impl Shell {
    /// Shell values are inserted as-is, so reject any that would end the
    /// element or attribute they are spliced into.
    pub fn validate(&self) -> Result<(), BuildError> {
        let checks: [(&'static str, &str, &[char]); 3] = [
            ("title", &self.title, &['<', '&']),
            ("stylesheet", &self.stylesheet, &['"', '<', '>', '&']),
            ("script", &self.script, &['"', '<', '>', '&']),
        ];
        for (field, value, forbidden) in checks {
            if value.contains(forbidden) {
                return Err(BuildError::InvalidShell {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Splice `fragment` verbatim into the shell template.
    pub fn render(&self, fragment: &str) -> String {
        let mut out = String::with_capacity(fragment.len() + 512);
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"UTF-8\">\n");
        out.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        out.push_str("<title>");
        out.push_str(&self.title);
        out.push_str("</title>\n");
        out.push_str("<link rel=\"stylesheet\" href=\"");
        out.push_str(&self.stylesheet);
        out.push_str("\">\n</head>\n<body>\n");
        out.push_str(fragment);
        out.push_str("\n<script type=\"module\" src=\"");
        out.push_str(&self.script);
        out.push_str("\"></script>\n</body>\n</html>\n");
        out
    }
}
