use super::create_lookup;
use holiday_core::Config;

pub async fn run(config: &Config, query: &str) -> anyhow::Result<()> {
    let lookup = create_lookup(config)?;
    println!("{}", lookup.lookup(query).await);
    Ok(())
}
