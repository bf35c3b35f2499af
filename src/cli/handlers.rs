use super::commands::ReportFormat;
use super::utils::print_info;
use crate::analysis::{AlertAnalyzer, AnalyzerConfig};
use crate::knowledge::KnowledgeBase;
use crate::report::TerminalReporter;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub async fn handle_analyze_command(
    alert: Option<String>,
    file: Option<PathBuf>,
    config: Option<PathBuf>,
    knowledge: Option<PathBuf>,
    report: ReportFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let alert_text = read_alert(alert, file)?;
    let analyzer = build_analyzer(config, knowledge)?;

    let tagged_report = analyzer.analyze_alert(&alert_text);

    if let Some(path) = output {
        fs::write(&path, &tagged_report)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!("Report written to {}", path.display());
        return Ok(());
    }

    match report {
        ReportFormat::Terminal => {
            TerminalReporter::new().print_report(&alert_text, &tagged_report)
        }
        ReportFormat::Tagged => println!("{}", tagged_report),
    }

    Ok(())
}

pub async fn handle_summary_command(
    alert: Option<String>,
    file: Option<PathBuf>,
    config: Option<PathBuf>,
    knowledge: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let alert_text = read_alert(alert, file)?;
    let analyzer = build_analyzer(config, knowledge)?;

    let summary = analyzer.get_summary(&alert_text)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        TerminalReporter::new().print_summary(&summary);
    }

    Ok(())
}

pub async fn handle_triage_command(
    alert: Option<String>,
    file: Option<PathBuf>,
    template: Option<PathBuf>,
) -> Result<()> {
    use crate::llm::prompts::{self, extract_xml};
    use crate::llm::{ChatMessage, CompletionService, LlmService};

    let alert_text = read_alert(alert, file)?;
    let service = LlmService::from_env().context("LLM service is not configured")?;

    let user_prompt = match template {
        Some(path) => prompts::load_template(&path, &alert_text)
            .with_context(|| format!("failed to load template from {}", path.display()))?,
        None => prompts::render_template(
            &format!("{}\n\n{{{{ALERT_DETAILS}}}}", prompts::CLASSIFICATION_PROMPT),
            &alert_text,
        ),
    };

    info!("Classifying alert");
    let classification = service
        .complete(prompts::SYSTEM_PROMPT_BASE, vec![ChatMessage::user(&user_prompt)])
        .await?;

    let category = extract_xml(&classification, "category").unwrap_or("other");
    println!("分类结果: {}", category);
    if let Some(reasoning) = extract_xml(&classification, "reasoning") {
        println!("分类依据: {}", reasoning);
    }
    if let Some(confidence) = extract_xml(&classification, "confidence") {
        println!("置信度: {}", confidence);
    }

    info!(category, "Running specialized analysis");
    let analysis = service
        .complete(
            prompts::SYSTEM_PROMPT_BASE,
            vec![ChatMessage::user(&format!(
                "{}\n\nCategory: {}\nAlert:\n{}",
                prompts::TRIAGE_PROMPT,
                category,
                alert_text
            ))],
        )
        .await?;

    println!("\n{}", analysis);
    Ok(())
}

pub fn handle_info_command() -> Result<()> {
    print_info();
    Ok(())
}

fn read_alert(alert: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match (alert, file) {
        (Some(text), None) => Ok(text),
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("failed to read alert from {}", path.display())),
        (Some(_), Some(_)) => bail!("provide the alert text either inline or via --file, not both"),
        (None, None) => bail!("no alert provided; pass the text inline or via --file"),
    }
}

fn build_analyzer(config: Option<PathBuf>, knowledge: Option<PathBuf>) -> Result<AlertAnalyzer> {
    let config = match config {
        Some(path) => AnalyzerConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };

    let mut analyzer = AlertAnalyzer::with_config(config)?;

    if let Some(path) = knowledge {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read knowledge base from {}", path.display()))?;
        let kb: KnowledgeBase = serde_json::from_str(&content)
            .with_context(|| format!("invalid knowledge base in {}", path.display()))?;
        info!("Loaded {} historical incidents from {}", kb.len(), path.display());
        analyzer = analyzer.with_knowledge_base(kb);
    }

    Ok(analyzer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn read_alert_prefers_inline_text() {
        let text = read_alert(Some("数据库超时".to_string()), None).unwrap();
        assert_eq!(text, "数据库超时");
    }

    #[test]
    fn read_alert_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "磁盘空间不足").unwrap();

        let text = read_alert(None, Some(file.path().to_path_buf())).unwrap();
        assert_eq!(text, "磁盘空间不足");
    }

    #[test]
    fn read_alert_rejects_both_and_neither() {
        assert!(read_alert(Some("a".to_string()), Some(PathBuf::from("b"))).is_err());
        assert!(read_alert(None, None).is_err());
    }

    #[test]
    fn build_analyzer_with_knowledge_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"EVT-X": {{"description": "网关超时", "cause": "上游过载"}}}}"#
        )
        .unwrap();

        let analyzer = build_analyzer(None, Some(file.path().to_path_buf())).unwrap();
        assert_eq!(analyzer.knowledge_base().len(), 1);
    }

    #[test]
    fn build_analyzer_rejects_bad_knowledge_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(build_analyzer(None, Some(file.path().to_path_buf())).is_err());
    }
}
