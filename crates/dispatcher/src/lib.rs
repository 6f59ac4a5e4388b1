//! Emergency call dispatch
//!
//! 组合事故播报脚本，并按优先级依次调用呼叫服务商：
//! 主服务商（AI语音代理）失败后自动转到备用服务商（TwiML呼叫流程）。

pub mod bland;
pub mod composer;
pub mod orchestrator;
pub mod twilio;
pub mod twiml;

pub use bland::BlandProvider;
pub use composer::compose;
pub use orchestrator::DispatchOrchestrator;
pub use twilio::TwilioProvider;
pub use twiml::VoiceResponse;
