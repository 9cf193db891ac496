fn main() {
    if let Err(err) = survey_chart_layout::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
