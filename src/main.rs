fn main() {
    #[cfg(feature = "cli")]
    pagedelta::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("pagedelta: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
