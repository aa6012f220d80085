use std::sync::Arc;
use std::time::Duration;

use tokio::{net::TcpListener, signal};
use tokio_util::sync::CancellationToken;
use tracing::info;

use products_api::app::{
    self,
    product::{handler::AppState, store::ProductStore},
};
use products_api::config::load_config;
use products_api::infrastructure::{acl::JsonPlaceholderSynchronizer, logger::Logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;

    Logger::init(&config.logging.level);

    info!(version = env!("CARGO_PKG_VERSION"), "启动产品服务...");

    let acl = Arc::new(JsonPlaceholderSynchronizer::new(&config.upstream)?);

    // 初始数据加载完成后才开始接受请求
    let startup = CancellationToken::new();
    let store = ProductStore::initialize(acl, &startup).await;

    let state = AppState {
        store: Arc::new(store),
    };
    let app = app::router(state, Duration::from_secs(config.http.timeout_seconds));

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr).await?;

    info!(addr = %addr, "🚀 产品服务已启动");
    info!("   GET     /api/products      - 获取所有产品");
    info!("   POST    /api/products      - 创建产品");
    info!("   GET     /api/products/:id  - 获取产品 (支持 If-Modified-Since)");
    info!("   HEAD    /api/products/:id  - 获取 Last-Modified");
    info!("   PUT     /api/products/:id  - 更新产品");
    info!("   DELETE  /api/products/:id  - 删除产品");
    info!("   OPTIONS /api/products      - 支持的方法");
    info!("   GET     /health            - 健康检查");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("产品服务已停止");
    Ok(())
}

/// 等待 Ctrl+C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "无法监听 Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "无法监听 SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("收到 Ctrl+C，开始优雅关闭"),
        _ = terminate => info!("收到 SIGTERM，开始优雅关闭"),
    }
}
