//! Impact assessment: severity classification and blast-radius narrative.

use super::causes::components_in;
use crate::lexicon::{DEFAULT_SEVERITY, SEVERITY_TABLE};

/// Determine the severity label for an alert: the highest-weight severity
/// with a keyword hit wins, ties keep the first table entry. Defaults to
/// the informational label.
pub fn detect_severity(alert_text: &str) -> (&'static str, u32) {
    let alert_lower = alert_text.to_lowercase();

    let mut max_severity = DEFAULT_SEVERITY;
    let mut max_weight = 0;

    for entry in SEVERITY_TABLE {
        let hit = entry
            .keywords
            .iter()
            .any(|keyword| alert_lower.contains(&keyword.to_lowercase()));

        if hit && entry.weight > max_weight {
            max_weight = entry.weight;
            max_severity = entry.label;
        }
    }

    (max_severity, max_weight)
}

/// Build the impact-assessment text block: severity, affected systems,
/// cascading-impact narrative, and estimated scope.
pub fn assess_impact(alert_text: &str) -> String {
    let (severity, _) = detect_severity(alert_text);
    let affected = components_in(alert_text);

    let mut description = format!("严重程度: {}", severity);

    if !affected.is_empty() {
        description.push_str(&format!("\n受影响的系统/服务: {}", affected.join(", ")));
    }

    match severity {
        "严重" | "高" => description
            .push_str("\n潜在级联影响: 高风险 - 可能导致业务中断，影响用户体验和业务收入"),
        "中" => description.push_str("\n潜在级联影响: 中等风险 - 可能影响系统性能，需要密切监控"),
        "低" => description.push_str("\n潜在级联影响: 低风险 - 轻微影响，可计划处理"),
        _ => {}
    }

    if alert_text.contains("用户") || alert_text.contains("业务") {
        description.push_str("\n影响范围: 可能影响最终用户和业务流程");
    } else if ["数据库", "网络", "服务"].iter().any(|c| alert_text.contains(c)) {
        description.push_str("\n影响范围: 主要影响系统内部组件");
    }

    description
}
