use listing_rules_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("listing rules service error: {err}");
        std::process::exit(1);
    }
}
