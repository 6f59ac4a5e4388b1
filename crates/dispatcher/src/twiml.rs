//! 最小化的 TwiML 文档构建器
//!
//! 所有文本和属性值都会做 XML 转义，乘客或地址中的 `<`、`&` 不会破坏文档结构。

/// 单个 TwiML 指令
#[derive(Debug, Clone, PartialEq)]
pub enum Verb {
    Say {
        text: String,
        voice: String,
        language: String,
    },
    Pause {
        length: u64,
    },
    Gather {
        action: String,
        method: String,
        num_digits: u32,
        timeout: u64,
    },
    Hangup,
}

/// `<Response>` 根节点
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoiceResponse {
    verbs: Vec<Verb>,
}

impl VoiceResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn say<S, V, L>(mut self, text: S, voice: V, language: L) -> Self
    where
        S: Into<String>,
        V: Into<String>,
        L: Into<String>,
    {
        self.verbs.push(Verb::Say {
            text: text.into(),
            voice: voice.into(),
            language: language.into(),
        });
        self
    }

    pub fn pause(mut self, length: u64) -> Self {
        self.verbs.push(Verb::Pause { length });
        self
    }

    pub fn gather<A: Into<String>>(mut self, action: A, num_digits: u32, timeout: u64) -> Self {
        self.verbs.push(Verb::Gather {
            action: action.into(),
            method: "POST".to_string(),
            num_digits,
            timeout,
        });
        self
    }

    pub fn hangup(mut self) -> Self {
        self.verbs.push(Verb::Hangup);
        self
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?><Response>"#);

        for verb in &self.verbs {
            match verb {
                Verb::Say {
                    text,
                    voice,
                    language,
                } => {
                    xml.push_str(&format!(
                        r#"<Say language="{}" voice="{}">{}</Say>"#,
                        escape(language),
                        escape(voice),
                        escape(text)
                    ));
                }
                Verb::Pause { length } => {
                    xml.push_str(&format!(r#"<Pause length="{length}"/>"#));
                }
                Verb::Gather {
                    action,
                    method,
                    num_digits,
                    timeout,
                } => {
                    xml.push_str(&format!(
                        r#"<Gather action="{}" method="{}" numDigits="{}" timeout="{}"/>"#,
                        escape(action),
                        escape(method),
                        num_digits,
                        timeout
                    ));
                }
                Verb::Hangup => xml.push_str("<Hangup/>"),
            }
        }

        xml.push_str("</Response>");
        xml
    }
}

/// XML 文本与属性转义
///
/// XML 1.0 不允许的字符（NUL 及除 tab/CR/LF 外的 C0 控制符、U+FFFE、U+FFFF）
/// 即使转义为字符引用也不合法，统一替换为空格。
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if is_xml_char(c) => escaped.push(c),
            _ => escaped.push(' '),
        }
    }
    escaped
}

/// XML 1.0 `Char` 产生式
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}
