use mechanic_match::{api, api::AppState, load_roster, AppConfig, MatcherService, RequestStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env();
    info!("Starting server with config: {:?}", config);

    // 加载roster (文件失败时回退内置数据)
    let roster = load_roster(config.roster.path.as_deref());
    info!("Roster ready: {} mechanics", roster.len());

    // 组装共享状态
    let state = AppState {
        matcher: Arc::new(MatcherService::new(roster, config.matcher.top_n)),
        store: Arc::new(RequestStore::new()),
    };

    let app = api::router(state);

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/requests              - submit request, get ranked matches");
    info!("  GET  /api/requests              - inbox listing");
    info!("  GET  /api/requests/:id          - request detail");
    info!("  GET  /api/requests/:id/text     - request as plain text");
    info!("  GET  /api/requests/export       - inbox CSV export");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
