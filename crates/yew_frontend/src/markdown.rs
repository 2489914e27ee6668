//! Markdown rendering for the diagnosis report
//!
//! The model's reply is displayed as-is. Embedded HTML is shown as text
//! rather than injected into the page.

use pulldown_cmark::{html, Event, Options, Parser};

/// Render Markdown to an HTML fragment, escaping raw HTML
pub fn render(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let events = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_template_renders() {
        let report = "## 🩺 账号成分诊断书 | 锐评\n\n**基础面板**\n* 📍 **疑似平台**：小红书\n\n> 精致的孤独。";
        let out = render(report);
        assert!(out.contains("<h2>🩺 账号成分诊断书 | 锐评</h2>"));
        assert!(out.contains("<strong>基础面板</strong>"));
        assert!(out.contains("<li>📍 <strong>疑似平台</strong>：小红书</li>"));
        assert!(out.contains("<blockquote>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let out = render("hello <script>alert(1)</script>");
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render(""), "");
    }
}
