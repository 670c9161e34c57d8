fn main() -> anyhow::Result<()> {
    // Searches are driven by user input one at a time.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(farefinder::run())
}
