use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum RelayError {
    #[error("事故记录缺少必填字段: {field}")]
    MissingField { field: String },
    #[error("事故记录字段无效: {field} ({reason})")]
    InvalidField { field: String, reason: String },
    #[error("配置错误: {0}")]
    Configuration(String),
    #[error("呼叫服务商 {provider} 调用失败: {message}")]
    ProviderCall { provider: String, message: String },
    #[error("所有呼叫服务商均失败: {0}")]
    OrchestrationFailure(String),
    #[error("事故数据读取失败: {0}")]
    Store(String),
    #[error("序列化错误: {0}")]
    Serialization(String),
}

pub type RelayResult<T> = Result<T, RelayError>;

impl RelayError {
    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
    pub fn invalid_field<F: Into<String>, R: Into<String>>(field: F, reason: R) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }
    pub fn provider_call<P: Into<String>, S: Into<String>>(provider: P, msg: S) -> Self {
        Self::ProviderCall {
            provider: provider.into(),
            message: msg.into(),
        }
    }
    pub fn store_error<S: Into<String>>(msg: S) -> Self {
        Self::Store(msg.into())
    }

    /// 输入数据错误：在任何网络调用之前终止整个派发
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RelayError::MissingField { .. }
                | RelayError::InvalidField { .. }
                | RelayError::Store(_)
                | RelayError::Serialization(_)
        )
    }

    /// 单个服务商层面的失败，编排器会继续尝试下一个服务商
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            RelayError::Configuration(_) | RelayError::ProviderCall { .. }
        )
    }

    pub fn user_message(&self) -> &str {
        match self {
            RelayError::MissingField { .. } => "事故记录不完整，无法生成紧急呼叫内容",
            RelayError::InvalidField { .. } => "事故记录包含无效字段，无法生成紧急呼叫内容",
            RelayError::Configuration(_) => "呼叫服务商未正确配置",
            RelayError::ProviderCall { .. } => "呼叫服务商请求失败",
            RelayError::OrchestrationFailure(_) => "紧急呼叫未能发出，请立即人工介入",
            RelayError::Store(_) => "事故数据不可用",
            RelayError::Serialization(_) => "事故数据格式错误",
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Serialization(err.to_string())
    }
}
