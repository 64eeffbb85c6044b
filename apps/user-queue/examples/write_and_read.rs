use user_queue::{read, write, ConnectorConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let connector = ConnectorConfig::resolve(
        std::env::var("VCAP_SERVICES").ok().as_deref(),
        "stackato-rabbitmq",
    )?;

    println!("Publishing users...");

    for i in 1..=3 {
        let user = write(&connector, "users").await?;
        println!("Published user {}: {} <{}>", i, user.username, user.email);
    }

    println!("Draining queue...");

    for user in read(&connector, "users").await? {
        println!("Received {} <{}>", user.username, user.email);
    }

    println!("Done!");
    Ok(())
}
