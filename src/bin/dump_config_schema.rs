use anyhow::Result;

fn main() -> Result<()> {
    let schema = schemars::schema_for!(pitmap::Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
