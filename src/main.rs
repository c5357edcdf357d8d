fn main() -> anyhow::Result<()> {
    let join = std::thread::Builder::new()
        .name("expresso-term-main".to_string())
        .stack_size(16 * 1024 * 1024)
        .spawn(|| -> anyhow::Result<()> {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(anyhow::Error::from)?;
            rt.block_on(expresso_term::cli_dispatch::run_cli())
        })
        .map_err(anyhow::Error::from)?;
    match join.join() {
        Ok(res) => res,
        Err(_) => Err(anyhow::anyhow!(
            "expresso-term main thread panicked during startup"
        )),
    }
}
