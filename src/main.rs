fn main() {
    if let Err(err) = hr_metrics::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
