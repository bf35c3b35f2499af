//! In-memory store of historical incidents used for similarity retrieval.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A historical incident record. Only `description` and `cause` are used by
/// the matching pipeline; the remaining fields enrich response suggestions
/// when present. Unknown fields supplied by callers are preserved as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Incident {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cause: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prevention: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Map of incident id -> record. Inserting an existing id overwrites.
///
/// The store does no internal locking; concurrent mutators must serialize
/// access externally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeBase {
    incidents: HashMap<String, Incident>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Knowledge base seeded with a small set of representative incidents.
    pub fn with_defaults() -> Self {
        let mut kb = Self::new();
        kb.insert(
            "EVT-2024-001",
            Incident {
                description: "aladdin请求超时，连接失败，用户无法登录".to_string(),
                cause: "aladdin服务连接池配置过小，高峰期连接耗尽".to_string(),
                solution: Some("重启aladdin连接池并临时扩容服务实例".to_string()),
                prevention: Some("调高连接池上限并增加连接数告警".to_string()),
                severity: Some("高".to_string()),
                duration: Some("45分钟".to_string()),
                extra: HashMap::new(),
            },
        );
        kb.insert(
            "EVT-2024-002",
            Incident {
                description: "MySQL数据库连接池耗尽，新连接无法建立".to_string(),
                cause: "慢查询堆积导致连接长时间不释放".to_string(),
                solution: Some("终止慢查询会话并重启应用连接池".to_string()),
                prevention: Some("优化慢查询并为连接池使用率设置告警".to_string()),
                severity: Some("严重".to_string()),
                duration: Some("30分钟".to_string()),
                extra: HashMap::new(),
            },
        );
        kb.insert(
            "EVT-2024-003",
            Incident {
                description: "内存使用率达到95%，CPU持续高负载，系统响应缓慢".to_string(),
                cause: "应用内存泄漏导致可用内存逐步耗尽".to_string(),
                solution: Some("滚动重启泄漏实例并临时扩容".to_string()),
                prevention: Some("引入内存泄漏检测和定期压测".to_string()),
                severity: Some("中".to_string()),
                duration: Some("2小时".to_string()),
                extra: HashMap::new(),
            },
        );
        kb
    }

    /// Insert or overwrite an incident. Record shape is not validated;
    /// missing fields degrade gracefully at read time.
    pub fn insert(&mut self, id: impl Into<String>, incident: Incident) {
        self.incidents.insert(id.into(), incident);
    }

    pub fn get(&self, id: &str) -> Option<&Incident> {
        self.incidents.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Incident)> {
        self.incidents.iter()
    }

    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_existing_id() {
        let mut kb = KnowledgeBase::new();
        kb.insert(
            "EVT-1",
            Incident {
                description: "first".to_string(),
                ..Default::default()
            },
        );
        kb.insert(
            "EVT-1",
            Incident {
                description: "second".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(kb.len(), 1);
        assert_eq!(kb.get("EVT-1").unwrap().description, "second");
    }

    #[test]
    fn deserializes_free_form_fields() {
        let json = r#"{
            "EVT-9": {
                "description": "网关超时",
                "cause": "上游服务过载",
                "operator": "oncall-a",
                "ticket": 4711
            }
        }"#;
        let kb: KnowledgeBase = serde_json::from_str(json).unwrap();
        let incident = kb.get("EVT-9").unwrap();
        assert_eq!(incident.cause, "上游服务过载");
        assert!(incident.solution.is_none());
        assert_eq!(incident.extra.get("ticket").unwrap(), 4711);
    }

    #[test]
    fn default_knowledge_base_is_seeded() {
        let kb = KnowledgeBase::with_defaults();
        assert!(!kb.is_empty());
        assert!(kb.get("EVT-2024-002").unwrap().solution.is_some());
    }
}
