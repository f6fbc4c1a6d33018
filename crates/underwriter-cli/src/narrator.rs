use std::io::Write;
use std::process::{Command, Stdio};

use underwriter_core::verdict::{NarrativeGenerator, NarrativeRequest};
use underwriter_core::{UnderwriterError, UnderwriterResult};

/// Narrative generator backed by an external program.
///
/// The program receives the request as JSON on stdin, with the plain-text
/// prompt under `prompt`, and must print the narrative on stdout.
pub struct ExternalCommandNarrator {
    program: String,
    args: Vec<String>,
}

impl ExternalCommandNarrator {
    pub fn new(program: &str, args: &[String]) -> Self {
        Self {
            program: program.trim().to_string(),
            args: args.to_vec(),
        }
    }
}

impl NarrativeGenerator for ExternalCommandNarrator {
    fn generate(&self, request: &NarrativeRequest) -> UnderwriterResult<String> {
        let mut payload = serde_json::to_value(request)?;
        payload["prompt"] = serde_json::Value::String(request.prompt());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| UnderwriterError::Narrative(format!("cannot start '{}': {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(payload.to_string().as_bytes())
                .map_err(|e| UnderwriterError::Narrative(format!("write to '{}': {}", self.program, e)))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| UnderwriterError::Narrative(format!("wait on '{}': {}", self.program, e)))?;

        if !output.status.success() {
            return Err(UnderwriterError::Narrative(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| UnderwriterError::Narrative(format!("non UTF-8 output: {}", e)))
    }
}
