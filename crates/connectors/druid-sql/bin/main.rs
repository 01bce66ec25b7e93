//! Run one query against the engine and print the result as tab-separated text.

use std::process::ExitCode;

use clap::Parser;

use druid_sql::{CellValue, Driver, Value};

#[derive(Debug, Parser)]
#[command(version, about = "Run a SQL query against the engine's HTTP endpoint")]
struct Args {
    /// Base URL of the engine.
    #[arg(long, env = "DRUID_DSN", default_value = "http://127.0.0.1:8888")]
    dsn: String,
    /// The query, with `$1`-style or `?` placeholders.
    query: String,
    /// Placeholder values, passed as strings.
    arguments: Vec<String>,
}

#[tokio::main]
pub async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let driver = Driver::from_process_environment()?;
    let connection = driver.open(&args.dsn)?;

    let arguments: Vec<Value> = args.arguments.into_iter().map(Value::from).collect();
    let cursor = connection.query(&args.query, &arguments).await?;

    println!("{}", cursor.columns().join("\t"));
    while let Some(row) = cursor.next_row()? {
        let line: Vec<String> = row.iter().map(format_cell).collect();
        println!("{}", line.join("\t"));
    }
    cursor.close();
    connection.close()?;

    Ok(())
}

fn format_cell(cell: &CellValue) -> String {
    match cell {
        CellValue::Null => String::new(),
        CellValue::Bool(b) => b.to_string(),
        CellValue::Int32(i) => i.to_string(),
        CellValue::Int64(i) => i.to_string(),
        CellValue::Float64(f) => f.to_string(),
        CellValue::String(s) => s.clone(),
        CellValue::Timestamp(t) => t.to_rfc3339(),
        CellValue::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
    }
}
