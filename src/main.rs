#[tokio::main]
async fn main() -> std::io::Result<()> {
    rsvp_service::run().await
}
