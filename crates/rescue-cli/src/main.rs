// Rescue Dispatch CLI entry point

use rescue_cli::{output, router::CommandRouter};

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the token may come from the real environment
    dotenv::dotenv().ok();

    if let Err(e) = CommandRouter::route().await {
        output::print_error(&e.user_message());
        std::process::exit(1);
    }
}
