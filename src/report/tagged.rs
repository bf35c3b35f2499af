//! Tagged plain-text analysis report. The fixed tag structure is what the
//! downstream prompt-chaining consumers parse, so it must stay stable even
//! on the error path.

/// Assemble the full analysis report from its three sections.
pub fn render(possible_causes: &[String], impact_assessment: &str, response_measures: &str) -> String {
    let mut result = String::from("<analysis>\n");

    result.push_str("<possible_causes>\n");
    for cause in possible_causes {
        result.push_str(&format!("• {}\n", cause));
    }
    result.push_str("</possible_causes>\n\n");

    result.push_str("<impact_assessment>\n");
    result.push_str(impact_assessment);
    result.push_str("\n</impact_assessment>\n\n");

    result.push_str("<response_measures>\n");
    result.push_str(response_measures);
    result.push_str("\n</response_measures>\n");
    result.push_str("</analysis>");

    result
}

/// Degraded report emitted when the analysis pipeline itself fails. Keeps
/// the same tag skeleton so callers always receive a well-formed report.
pub fn render_error(error_message: &str) -> String {
    format!(
        "<analysis>\n\
         <possible_causes>\n\
         • 分析过程中发生错误: {}\n\
         </possible_causes>\n\
         \n\
         <impact_assessment>\n\
         严重程度: 无法评估\n\
         影响范围: 分析系统异常\n\
         </impact_assessment>\n\
         \n\
         <response_measures>\n\
         即时措施:\n\
         1. 检查告警分析系统状态和日志\n\
         2. 验证输入数据格式和完整性\n\
         3. 手动分析告警信息作为备选方案\n\
         4. 联系技术支持团队\n\
         \n\
         长期措施:\n\
         1. 修复分析系统的已知问题\n\
         2. 改进错误处理和容错机制\n\
         3. 增强系统监控和自动恢复能力\n\
         4. 定期进行系统健康检查\n\
         </response_measures>\n\
         </analysis>",
        error_message
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_wraps_sections_in_tags() {
        let causes = vec!["原因一".to_string(), "原因二".to_string()];
        let report = render(&causes, "严重程度: 高", "即时措施:\n1. 检查日志");

        assert!(report.starts_with("<analysis>\n<possible_causes>\n"));
        assert!(report.ends_with("</response_measures>\n</analysis>"));
        assert!(report.contains("• 原因一\n• 原因二\n"));
        assert!(report.contains("<impact_assessment>\n严重程度: 高\n</impact_assessment>"));
        assert!(report.contains("<response_measures>\n即时措施:\n1. 检查日志\n</response_measures>"));
    }

    #[test]
    fn error_report_embeds_message() {
        let report = render_error("boom");
        assert!(report.contains("• 分析过程中发生错误: boom"));
        assert!(report.contains("<possible_causes>"));
        assert!(report.contains("严重程度: 无法评估"));
        assert!(report.contains("1. 检查告警分析系统状态和日志"));
        assert!(report.starts_with("<analysis>"));
        assert!(report.ends_with("</analysis>"));
    }

    #[test]
    fn error_report_keeps_section_order() {
        let report = render_error("x");
        let causes_at = report.find("<possible_causes>").unwrap();
        let impact_at = report.find("<impact_assessment>").unwrap();
        let response_at = report.find("<response_measures>").unwrap();
        assert!(causes_at < impact_at && impact_at < response_at);
    }
}
