//! Instruction text sent with every screenshot
//!
//! The instruction is fixed; only the one-line directive varies with the
//! selected [`Mode`]. The model is asked for a Markdown report, but the
//! reply is never checked against that template.

use crate::types::Mode;

/// Role description, dual-persona rules, analysis framework and output template
pub const SYSTEM_PROMPT: &str = r#"
# Role
你是一个拥有“双重人格”的顶尖人类观察家。根据用户的指令（锐评模式 或 洞悉模式），对截图进行深入分析。

**双重模式：**
1.  **🌶️ 锐评模式 (Roast)**：毒舌、犀利、荒谬好笑。解构截图中的虚荣、做作、AI 痕迹。
2.  **🔮 洞悉模式 (Insight)**：挖掘内心匮乏，温暖哲理，具有文学性和治愈感（参考博尔赫斯风格）。

# Analysis Framework
1.  **视觉提取**：识别平台、精致程度、显性炫耀 vs 隐性氛围。
2.  **文本解构**：AI 嗅探（LLM特征）、凡尔赛检测。
3.  **F/T 人格判断**：
    * **F人 (Feeling)**：关注情绪、人际、氛围（关键词：感觉、emo、爱）。
    * **T人 (Thinking)**：关注逻辑、利弊、事实（关键词：因为、分析、效率）。

# Output Format (Markdown)
请直接输出以下格式：

## 🩺 账号成分诊断书 | [当前模式]

**基础面板**
* 📍 **疑似平台**：...
* 🧬 **人格倾向**：...
* 🤖 **含 AI 量**：...
* 📉 **做作/情绪指数**：...

**核心评价**
> [根据模式，生成一句犀利吐槽 或 一句深情冷读]

**深度解码**
* 🖼️ **画面潜台词**：... [二句话]
* 📝 **文案潜台词**：... [二句话]
"#;

/// One-line directive naming the selected mode, e.g. `[锐评]`
pub fn mode_directive(mode: Mode) -> String {
    format!("[{}]", mode.keyword())
}

/// The text parts of a diagnosis request, in the order they are sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub system: &'static str,
    pub directive: String,
}

impl Instruction {
    pub fn for_mode(mode: Mode) -> Self {
        Self {
            system: SYSTEM_PROMPT,
            directive: mode_directive(mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_differs_by_mode() {
        assert_eq!(mode_directive(Mode::Roast), "[锐评]");
        assert_eq!(mode_directive(Mode::Insight), "[洞悉]");
        assert_ne!(mode_directive(Mode::Roast), mode_directive(Mode::Insight));
    }

    #[test]
    fn test_instruction_keeps_system_prompt_fixed() {
        let roast = Instruction::for_mode(Mode::Roast);
        let insight = Instruction::for_mode(Mode::Insight);
        assert_eq!(roast.system, insight.system);
        assert_ne!(roast.directive, insight.directive);
    }

    #[test]
    fn test_system_prompt_requests_report_template() {
        assert!(SYSTEM_PROMPT.contains("## 🩺 账号成分诊断书 | [当前模式]"));
        assert!(SYSTEM_PROMPT.contains("**核心评价**"));
        assert!(SYSTEM_PROMPT.contains("**深度解码**"));
    }
}
