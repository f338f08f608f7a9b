use std::path::Path;

use anyhow::Result;
use epiweek_br::{WeekTable, coverage};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // First table access also asserts the calendar invariants
    let (start, end) = coverage();
    println!("Covered epidemiological calendar: {start} to {end}");

    let table = WeekTable::full_calendar()?;
    println!("Mapped {} dates", table.len());

    let out_dir = Path::new("data");
    tokio::fs::create_dir_all(out_dir).await?;
    let out_path = out_dir.join("epidemiological-weeks.json");
    table.save_to_file(&out_path).await?;
    println!("Table written to {}", out_path.display());

    Ok(())
}
