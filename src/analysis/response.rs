//! Response generation: remediation suggestions matched to the detected
//! problem categories and historical precedent.

use super::causes::HISTORICAL_MARKER;
use crate::knowledge::KnowledgeBase;
use crate::lexicon::{GENERIC_IMMEDIATE, GENERIC_LONG_TERM, RESPONSE_TEMPLATES};
use std::collections::HashSet;
use tracing::debug;

/// Build the two-section response block for an alert. Category templates
/// are additive; historical-match causes contribute stored solutions and
/// prevention steps; a generic template backs everything up.
pub fn generate_response(
    alert_text: &str,
    possible_causes: &[String],
    knowledge_base: &KnowledgeBase,
) -> String {
    let alert_lower = alert_text.to_lowercase();

    let mut immediate = Vec::new();
    let mut long_term = Vec::new();
    let mut template_used = false;

    for template in RESPONSE_TEMPLATES {
        if template.triggers.iter().any(|t| alert_lower.contains(t)) {
            debug!(category = template.category, "response template matched");
            immediate.extend(template.immediate.iter().map(|s| s.to_string()));
            long_term.extend(template.long_term.iter().map(|s| s.to_string()));
            template_used = true;
        }
    }

    // Historical matches carry the incident id in their cause line; pull the
    // recorded fix for each. Ids no longer present are skipped silently.
    for cause in possible_causes {
        if !cause.contains(HISTORICAL_MARKER) {
            continue;
        }
        for (id, incident) in knowledge_base.iter() {
            if !cause.contains(id.as_str()) {
                continue;
            }
            if let Some(solution) = &incident.solution {
                immediate.push(format!("参考历史解决方案: {}", solution));
            }
            if let Some(prevention) = &incident.prevention {
                long_term.push(format!("预防措施: {}", prevention));
            }
        }
    }

    if !template_used {
        immediate.extend(GENERIC_IMMEDIATE.iter().map(|s| s.to_string()));
        long_term.extend(GENERIC_LONG_TERM.iter().map(|s| s.to_string()));
    }

    let immediate = dedup_preserving_order(immediate);
    let long_term = dedup_preserving_order(long_term);

    let mut response = String::from("即时措施:\n");
    for (i, measure) in immediate.iter().enumerate() {
        response.push_str(&format!("{}. {}\n", i + 1, measure));
    }

    response.push_str("\n长期措施:\n");
    for (i, measure) in long_term.iter().enumerate() {
        response.push_str(&format!("{}. {}\n", i + 1, measure));
    }

    response.trim_end().to_string()
}

fn dedup_preserving_order(measures: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    measures
        .into_iter()
        .filter(|measure| seen.insert(measure.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::Incident;

    #[test]
    fn generic_fallback_when_no_category_matches() {
        let response = generate_response("不明原因抖动", &[], &KnowledgeBase::new());
        for measure in GENERIC_IMMEDIATE {
            assert!(response.contains(measure));
        }
        for measure in GENERIC_LONG_TERM {
            assert!(response.contains(measure));
        }
        assert!(response.starts_with("即时措施:\n1. "));
        assert!(response.contains("\n\n长期措施:\n1. "));
    }

    #[test]
    fn aladdin_template_selected() {
        let response = generate_response("aladdin连接超时", &[], &KnowledgeBase::new());
        assert!(response.contains("检查aladdin服务进程状态和健康检查接口"));
        // Generic fallback must not leak in once a template matched.
        assert!(!response.contains(GENERIC_IMMEDIATE[0]));
    }

    #[test]
    fn multiple_categories_are_additive() {
        let response = generate_response("数据库连接超时，网络抖动", &[], &KnowledgeBase::new());
        assert!(response.contains("检查数据库连接池状态和当前连接数"));
        assert!(response.contains("检查网络链路连通性和丢包率"));
    }

    #[test]
    fn historical_cause_pulls_solution_and_prevention() {
        let mut kb = KnowledgeBase::new();
        kb.insert(
            "EVT-42",
            Incident {
                description: "desc".to_string(),
                cause: "cause".to_string(),
                solution: Some("重启连接池".to_string()),
                prevention: Some("增加告警".to_string()),
                ..Default::default()
            },
        );

        let causes = vec![format!("{}相似性分析 (0.88): 事件 EVT-42 - cause", HISTORICAL_MARKER)];
        let response = generate_response("数据库异常", &causes, &kb);
        assert!(response.contains("参考历史解决方案: 重启连接池"));
        assert!(response.contains("预防措施: 增加告警"));
    }

    #[test]
    fn stale_historical_id_is_tolerated() {
        let causes = vec![format!(
            "{}相似性分析 (0.88): 事件 EVT-GONE - cause",
            HISTORICAL_MARKER
        )];
        let response = generate_response("数据库异常", &causes, &KnowledgeBase::new());
        assert!(!response.contains("参考历史解决方案"));
        assert!(response.contains("检查数据库连接池状态和当前连接数"));
    }

    #[test]
    fn measures_are_deduplicated_in_order() {
        // "mysql" and "数据库" both trigger the database template; its
        // actions must appear exactly once, in template order.
        let response = generate_response("mysql数据库连接失败", &[], &KnowledgeBase::new());
        let first = "检查数据库连接池状态和当前连接数";
        assert_eq!(response.matches(first).count(), 1);
        assert!(response.contains(&format!("1. {}", first)));
    }
}
