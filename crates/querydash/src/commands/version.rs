pub fn run() -> anyhow::Result<()> {
    println!("querydash {}", env!("CARGO_PKG_VERSION"));
    println!("Natural-language analytics queries, answered locally or by a generative model");
    Ok(())
}
