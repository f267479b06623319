use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use four_server::Matchmaker;
use protocol::{Listener, TcpListener, DEFAULT_SERVER_ADDR};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("four_server=debug".parse()?))
        .init();

    let addr = std::env::var("FOUR_SERVER_ADDR")
        .unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string());
    let mut listener = TcpListener::bind(&addr).await?;
    info!(
        "四子棋服务端已启动，监听 {}",
        listener.local_addr().unwrap_or_default()
    );

    let matchmaker = Matchmaker::new();
    tokio::select! {
        result = matchmaker.run(&mut listener) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            // 主动关停：停止接受新连接即可，已运行的会话随进程退出
            info!("收到退出信号，服务端停止");
        }
    }

    Ok(())
}
