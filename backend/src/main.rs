use ads_server::error::ServerError;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    ads_server::start_server().await
}
