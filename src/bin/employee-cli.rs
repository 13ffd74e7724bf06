use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "employee-cli")]
#[command(about = "Command-line client for the Employee Gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all employees
    List,
    /// Search employees by name fragment
    Search { fragment: String },
    /// Fetch one employee by id
    Get { id: String },
    /// Show the highest salary
    HighestSalary,
    /// Show the ten highest earners
    TopEarners,
    /// Create an employee
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: i64,
        #[arg(long)]
        age: i64,
        #[arg(long)]
        title: String,
    },
    /// Delete an employee by id
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = format!("{}/api/v1/employees", cli.url.trim_end_matches('/'));

    let request = match cli.command {
        Commands::List => client.get(&base),
        Commands::Search { fragment } => {
            client.get(format!("{}/search/{}", base, encode_segment(&fragment)))
        }
        Commands::Get { id } => client.get(format!("{}/{}", base, encode_segment(&id))),
        Commands::HighestSalary => client.get(format!("{}/highest-salary", base)),
        Commands::TopEarners => client.get(format!("{}/top-ten-earners", base)),
        Commands::Create {
            name,
            salary,
            age,
            title,
        } => client.post(&base).json(&json!({
            "name": name,
            "salary": salary,
            "age": age,
            "title": title,
        })),
        Commands::Delete { id } => client.delete(format!("{}/{}", base, encode_segment(&id))),
    };

    print_response(request.send().await?).await
}

fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let text = res.text().await?;
    if text.is_empty() {
        println!("{}", status);
        return Ok(());
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
