use anyhow::Result;
use quill_core::{
    application::{
        ports::{
            cache::TagCache,
            security::TokenManager,
            storage::{BlobUrlResolver, ObjectUploader, UploadUrlIssuer},
            time::Clock,
        },
        services::{ApplicationServices, ServicePorts},
    },
    config::AppConfig,
    domain::{
        article::{ArticleReadRepository, ArticleWriteRepository},
        comment::CommentRepository,
    },
    infrastructure::{
        cache::{InMemoryTagCache, RedisTagCache},
        database,
        repositories::{PgCommentChangeFeed, PostgresArticleRepository, PostgresCommentRepository},
        security::token::BiscuitTokenManager,
        storage::{HttpObjectUploader, PublicBlobUrlResolver, SignedUploadUrlIssuer},
        time::SystemClock,
    },
    presentation::http::{routes::build_router, state::HttpState},
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let articles = Arc::new(PostgresArticleRepository::new(pool.clone()));
    let article_write_repo: Arc<dyn ArticleWriteRepository> = articles.clone();
    let article_read_repo: Arc<dyn ArticleReadRepository> = articles;
    let comment_repo: Arc<dyn CommentRepository> =
        Arc::new(PostgresCommentRepository::new(pool.clone()));
    let comment_changes = PgCommentChangeFeed::connect(&pool).await?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let cache: Arc<dyn TagCache> = match config.redis_url() {
        Some(url) => {
            tracing::info!("listing cache backed by redis");
            Arc::new(RedisTagCache::from_url(url)?)
        }
        None => {
            tracing::info!("listing cache held in process memory");
            Arc::new(InMemoryTagCache::new(Arc::clone(&clock)))
        }
    };

    let upload_urls: Arc<dyn UploadUrlIssuer> = Arc::new(SignedUploadUrlIssuer::new(
        config.storage_upload_url(),
        config.upload_url_secret(),
        config.upload_url_ttl(),
        Arc::clone(&clock),
    ));
    let uploader: Arc<dyn ObjectUploader> =
        Arc::new(HttpObjectUploader::new(config.upload_timeout())?);
    let blob_urls: Arc<dyn BlobUrlResolver> =
        Arc::new(PublicBlobUrlResolver::new(config.storage_public_url()));

    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);

    let services = Arc::new(ApplicationServices::new(ServicePorts {
        article_write_repo,
        article_read_repo,
        comment_repo,
        upload_urls,
        uploader,
        blob_urls,
        cache,
        token_manager,
        listing_life: config.listing_cache_life(),
    }));

    let comment_follower = services
        .comment_hub
        .spawn_follower(Box::new(comment_changes));

    let state = HttpState { services };
    let app = build_router(state, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    comment_follower.abort();
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
