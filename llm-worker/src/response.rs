//! Parses the model's JSON-only reply into a `tool` or `answer` shape (spec
//! §4.3, step 5).

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(tag = "model")]
pub enum LlmResponse {
    #[serde(rename = "tool")]
    Tool { tool_call: ToolCall },
    #[serde(rename = "answer")]
    Answer { content: Vec<AnswerItem> },
}

#[derive(Debug, Deserialize)]
pub struct ToolCall {
    pub tool: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct AnswerItem {
    pub line: u32,
    pub comment: String,
}

pub fn parse(raw: &str) -> Result<LlmResponse, serde_json::Error> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tool_response() {
        let raw = r#"{"model":"tool","tool_call":{"tool":"read_file","args":{"file_path":"utils.py"}}}"#;
        match parse(raw).unwrap() {
            LlmResponse::Tool { tool_call } => {
                assert_eq!(tool_call.tool, "read_file");
                assert_eq!(tool_call.args["file_path"], "utils.py");
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn parses_answer_response() {
        let raw = r#"{"model":"answer","content":[{"line":11,"comment":"Avoid blocking call here"}]}"#;
        match parse(raw).unwrap() {
            LlmResponse::Answer { content } => {
                assert_eq!(content.len(), 1);
                assert_eq!(content[0].line, 11);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn parses_empty_answer_response() {
        let raw = r#"{"model":"answer","content":[]}"#;
        match parse(raw).unwrap() {
            LlmResponse::Answer { content } => assert!(content.is_empty()),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn rejects_unknown_model_value() {
        let raw = r#"{"model":"mystery","content":[]}"#;
        assert!(parse(raw).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse("not json").is_err());
    }
}
