use crate::context::AppContext;
use anyhow::Result;

pub fn run(app: &AppContext) -> Result<()> {
    let config = app.config();
    println!(
        "Configured universe (interval {}, period {}):",
        config.intraday_interval, config.period
    );
    for index in &config.indices {
        println!("  {} ({})", index.name, index.ticker);
        for stock in &index.stocks {
            println!("    {} ({})", stock.name, stock.ticker);
        }
    }
    Ok(())
}
