use std::future::Future;
use std::sync::Arc;

use tokio::{signal, sync::watch};
use tracing::{error, info};

/// 服务关闭信号
///
/// 关闭状态保存在 watch 通道中，触发之后才订阅的一方也能立即收到。
#[derive(Clone)]
pub struct ShutdownManager {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownManager {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// 触发关闭，重复调用只记录第一次
    pub fn trigger(&self, reason: &str) {
        if !self.tx.send_replace(true) {
            info!("触发服务关闭: {}", reason);
        }
    }

    /// 关闭触发时完成的 future，交给 HTTP 服务做优雅关闭
    pub fn signal(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            let _ = rx.wait_for(|triggered| *triggered).await;
        }
    }

    /// 等待 Ctrl+C 或 SIGTERM 并触发关闭
    pub async fn listen_for_os_signals(&self) {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                error!("安装Ctrl+C信号处理器失败: {e}");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    error!("安装SIGTERM信号处理器失败: {e}");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => self.trigger("收到Ctrl+C信号"),
            _ = terminate => self.trigger("收到SIGTERM信号"),
        }
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}
