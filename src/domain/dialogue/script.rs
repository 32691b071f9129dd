//! Dialogue Script - 对话脚本
//!
//! 脚本是有序的 (text, voice_id) 条目序列，顺序同时决定合成顺序
//! 和最终播放顺序。缺字段的条目在解析阶段保留，由合成器跳过。

use serde::Deserialize;

use super::errors::DialogueError;

/// 对话条目
///
/// 只有 `text` 和 `voice_id` 参与处理，其余字段是描述性元数据
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueEntry {
    /// 要合成的文本
    #[serde(default)]
    pub text: String,

    /// 音色 ID（远端 TTS 服务的 voice id）
    #[serde(default)]
    pub voice_id: String,

    /// 音色显示名（仅用于日志）
    #[serde(default)]
    pub voice_name: Option<String>,

    /// 标签（仅用于日志）
    #[serde(default)]
    pub labels: Vec<String>,
}

impl DialogueEntry {
    /// 条目是否可合成
    ///
    /// text 或 voice_id 为空的条目跳过，不中断整个脚本
    pub fn is_valid(&self) -> bool {
        !self.text.trim().is_empty() && !self.voice_id.trim().is_empty()
    }

    /// 不可合成的原因，条目有效时返回 None
    pub fn invalid_reason(&self) -> Option<&'static str> {
        if self.text.trim().is_empty() {
            Some("missing or empty 'text'")
        } else if self.voice_id.trim().is_empty() {
            Some("missing or empty 'voice_id'")
        } else {
            None
        }
    }
}

/// 脚本 JSON 的顶层结构
#[derive(Debug, Deserialize)]
struct ScriptDocument {
    content: Option<serde_json::Value>,
}

/// 对话脚本 - 有序条目序列
#[derive(Debug, Clone)]
pub struct DialogueScript {
    entries: Vec<DialogueEntry>,
}

impl DialogueScript {
    /// 从原始 JSON 文本解析脚本
    ///
    /// 顶层必须包含 `content` 键且为数组；空数组视为校验错误，
    /// 运行不会开始。条目内部缺字段不是解析错误。
    pub fn parse(raw: &str) -> Result<Self, DialogueError> {
        let document: ScriptDocument = serde_json::from_str(raw)
            .map_err(|e| DialogueError::MalformedJson(e.to_string()))?;

        let content = document.content.ok_or(DialogueError::MissingContent)?;

        let items = match content {
            serde_json::Value::Array(items) => items,
            _ => return Err(DialogueError::ContentNotArray),
        };

        if items.is_empty() {
            return Err(DialogueError::EmptyScript);
        }

        let entries = items
            .into_iter()
            .map(|item| {
                // 非对象条目解析为全空条目，由合成器按无效条目跳过
                serde_json::from_value(item).unwrap_or(DialogueEntry {
                    text: String::new(),
                    voice_id: String::new(),
                    voice_name: None,
                    labels: Vec::new(),
                })
            })
            .collect();

        Ok(Self { entries })
    }

    /// 条目列表（脚本顺序）
    pub fn entries(&self) -> &[DialogueEntry] {
        &self.entries
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_script() {
        let raw = r#"{
            "content": [
                {"text": "Hi", "voice_id": "V1", "voice_name": "Rachel", "labels": ["neutral"]},
                {"text": "Bye", "voice_id": "V2"}
            ]
        }"#;

        let script = DialogueScript::parse(raw).unwrap();
        assert_eq!(script.len(), 2);
        assert_eq!(script.entries()[0].text, "Hi");
        assert_eq!(script.entries()[0].voice_name.as_deref(), Some("Rachel"));
        assert_eq!(script.entries()[1].voice_id, "V2");
        assert!(script.entries().iter().all(|e| e.is_valid()));
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = DialogueScript::parse("{not json").unwrap_err();
        assert!(matches!(err, DialogueError::MalformedJson(_)));
    }

    #[test]
    fn test_parse_missing_content() {
        let err = DialogueScript::parse(r#"{"dialogue": []}"#).unwrap_err();
        assert!(matches!(err, DialogueError::MissingContent));
    }

    #[test]
    fn test_parse_content_not_array() {
        let err = DialogueScript::parse(r#"{"content": "oops"}"#).unwrap_err();
        assert!(matches!(err, DialogueError::ContentNotArray));
    }

    #[test]
    fn test_parse_empty_content_is_validation_error() {
        let err = DialogueScript::parse(r#"{"content": []}"#).unwrap_err();
        assert!(matches!(err, DialogueError::EmptyScript));
    }

    #[test]
    fn test_entry_missing_fields_kept_but_invalid() {
        let raw = r#"{
            "content": [
                {"text": "Hi", "voice_id": "V1"},
                {"text": "no voice"},
                {"voice_id": "V3"},
                {"text": "   ", "voice_id": "V4"}
            ]
        }"#;

        let script = DialogueScript::parse(raw).unwrap();
        assert_eq!(script.len(), 4);
        assert!(script.entries()[0].is_valid());
        assert_eq!(
            script.entries()[1].invalid_reason(),
            Some("missing or empty 'voice_id'")
        );
        assert_eq!(
            script.entries()[2].invalid_reason(),
            Some("missing or empty 'text'")
        );
        assert_eq!(
            script.entries()[3].invalid_reason(),
            Some("missing or empty 'text'")
        );
    }

    #[test]
    fn test_non_object_entry_treated_as_invalid() {
        let raw = r#"{"content": [{"text": "Hi", "voice_id": "V1"}, 42]}"#;
        let script = DialogueScript::parse(raw).unwrap();
        assert_eq!(script.len(), 2);
        assert!(!script.entries()[1].is_valid());
    }
}
