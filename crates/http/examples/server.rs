use line_http::handler::make_handler;
use line_http::protocol::{BoxError, StatusLine};
use line_http::{Router, Server};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let router = Router::new().route(
        "GET",
        "/",
        make_handler(|connection, _data| {
            Box::pin(async move {
                info!("writing started");
                connection.write_status(StatusLine::ok()).await?;
                connection.close().await?;
                Ok::<(), BoxError>(())
            })
        }),
    );

    let server = match Server::builder().address("0.0.0.0:4221").router(router).build() {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "failed to build server");
            std::process::exit(1);
        }
    };

    info!("server started");
    if let Err(e) = server.start().await {
        error!(cause = %e, "server stopped");
        std::process::exit(1);
    }
}
